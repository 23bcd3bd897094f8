//! Decorative pointer effects: a cursor marker that grows over interactive
//! cards and a glow on the border of the hovered card. Pure functions of
//! pointer position; nothing here touches application state.

use ratatui::layout::{Position, Rect};

/// Default fraction of a card (by normalized distance from its center) in
/// which the glow stays off.
pub const DEFAULT_INACTIVE_ZONE: f64 = 0.7;

/// Last known pointer position and whether it is over something clickable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    pub x: u16,
    pub y: u16,
    pub hovering: bool,
    /// False until the first mouse event arrives.
    pub seen: bool,
}

impl CursorState {
    /// Follow the pointer. `targets` are the rects that count as hoverable.
    pub fn moved(self, x: u16, y: u16, targets: &[Rect]) -> CursorState {
        let pos = Position::new(x, y);
        CursorState {
            x,
            y,
            hovering: targets.iter().any(|r| r.contains(pos)),
            seen: true,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Glyph drawn at the pointer.
    pub fn glyph(&self) -> &'static str {
        if self.hovering { "\u{25C9}" } else { "\u{00B7}" }
    }
}

/// Glow on a card border, pointing from the card center toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Degrees, 0 = right, 90 = down.
    pub angle: f64,
    /// Border cell closest to the pointer.
    pub anchor: Position,
}

impl Glow {
    /// Arrow glyph for the nearest of eight directions.
    pub fn arrow(&self) -> &'static str {
        const ARROWS: [&str; 8] = [
            "\u{2192}", "\u{2198}", "\u{2193}", "\u{2199}", "\u{2190}", "\u{2196}", "\u{2191}",
            "\u{2197}",
        ];
        let sector = ((self.angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
        ARROWS[sector]
    }
}

/// Glow for `rect` with the pointer at `pointer`, or `None` when the
/// pointer is outside the rect or within `inactive_zone` of its center.
pub fn glow_for(rect: Rect, pointer: Position, inactive_zone: f64) -> Option<Glow> {
    if rect.width == 0 || rect.height == 0 || !rect.contains(pointer) {
        return None;
    }
    let half_w = rect.width as f64 / 2.0;
    let half_h = rect.height as f64 / 2.0;
    let dx = (pointer.x - rect.x) as f64 + 0.5 - half_w;
    let dy = (pointer.y - rect.y) as f64 + 0.5 - half_h;

    let max = (half_w * half_w + half_h * half_h).sqrt();
    let normalized = (dx * dx + dy * dy).sqrt() / max;
    if normalized < inactive_zone {
        return None;
    }
    Some(Glow {
        angle: dy.atan2(dx).to_degrees(),
        anchor: nearest_border(rect, pointer),
    })
}

fn nearest_border(rect: Rect, p: Position) -> Position {
    let right = rect.x + rect.width - 1;
    let bottom = rect.y + rect.height - 1;
    let candidates = [
        (p.x - rect.x, Position::new(rect.x, p.y)),
        (right - p.x, Position::new(right, p.y)),
        (p.y - rect.y, Position::new(p.x, rect.y)),
        (bottom - p.y, Position::new(p.x, bottom)),
    ];
    candidates
        .into_iter()
        .min_by_key(|(d, _)| *d)
        .map_or(p, |(_, pos)| pos)
}
