use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::project::Category;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub glow: Color,
    pub selection_bg: Color,
    pub menu_bg: Color,
    /// Per-category accent colors
    pub category_colors: HashMap<Category, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut category_colors = HashMap::new();
        category_colors.insert(Category::UiUx, Color::Rgb(0x7C, 0x9C, 0xFF));
        category_colors.insert(Category::Web, Color::Rgb(0x44, 0xDD, 0xFF));
        category_colors.insert(Category::Visual, Color::Rgb(0xFF, 0x9E, 0x5E));
        category_colors.insert(Category::VisualLegacy, Color::Rgb(0xFF, 0x9E, 0x5E));
        category_colors.insert(Category::Practice, Color::Rgb(0x44, 0xFF, 0x88));
        category_colors.insert(Category::Illustration, Color::Rgb(0xFF, 0x6B, 0xB5));

        Theme {
            background: Color::Rgb(0x0E, 0x0E, 0x10),
            text: Color::Rgb(0xC8, 0xC8, 0xCC),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xD4, 0xFF, 0x3F),
            dim: Color::Rgb(0x6E, 0x6E, 0x78),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            glow: Color::Rgb(0xA8, 0x8B, 0xFF),
            selection_bg: Color::Rgb(0x24, 0x24, 0x2C),
            menu_bg: Color::Rgb(0x16, 0x16, 0x1C),
            category_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Build from `[ui.colors]` and `[ui.category_colors]`, falling back to
    /// defaults for anything missing or unparseable.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!("ignoring color {} = {:?}: expected #RRGGBB", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "glow" => theme.glow = color,
                "selection_bg" => theme.selection_bg = color,
                "menu_bg" => theme.menu_bg = color,
                _ => tracing::warn!("unknown color key {}", key),
            }
        }

        for (name, value) in &ui.category_colors {
            if let (Ok(category), Some(color)) = (name.parse::<Category>(), parse_hex_color(value)) {
                theme.category_colors.insert(category, color);
            }
        }

        theme
    }

    /// Accent color for a category, falling back to text color
    pub fn category_color(&self, category: Category) -> Color {
        self.category_colors.get(&category).copied().unwrap_or(self.text)
    }
}
