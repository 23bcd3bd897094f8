use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration from folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the project list comes from when a session opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupSource {
    /// Use persisted records when present; seed the store from the bundled
    /// dataset otherwise.
    #[default]
    Persisted,
    /// Always start from the bundled dataset and overwrite the store.
    Bundled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartupConfig {
    #[serde(default)]
    pub source: StartupSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Remote object-storage origin. Empty = resolve against `asset_base`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            base_url: default_base_url(),
            asset_base: default_asset_base(),
            max_retries: default_max_retries(),
        }
    }
}

/// Default: see assets/folio.toml
fn default_base_url() -> String {
    "https://kumotokumo-1305521879.cos.ap-guangzhou.myqcloud.com".to_string()
}

fn default_asset_base() -> String {
    "/".to_string()
}

fn default_max_retries() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_bytes: default_max_bytes(),
        }
    }
}

/// 50 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Owner mode: enables the editing keys in the TUI. Visitors browse
    /// read-only.
    #[serde(default)]
    pub admin: bool,
    /// Delay before swapping screens when navigating with the menu open.
    #[serde(default = "default_menu_close_delay_ms")]
    pub menu_close_delay_ms: u64,
    /// Scroll offset (rows) after which the back-to-top hint appears.
    #[serde(default = "default_back_to_top_rows")]
    pub back_to_top_rows: u16,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub category_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            admin: false,
            menu_close_delay_ms: default_menu_close_delay_ms(),
            back_to_top_rows: default_back_to_top_rows(),
            colors: HashMap::new(),
            category_colors: HashMap::new(),
        }
    }
}

fn default_menu_close_delay_ms() -> u64 {
    500
}

fn default_back_to_top_rows() -> u16 {
    12
}

impl UiConfig {
    pub fn menu_close_delay(&self) -> Duration {
        Duration::from_millis(self.menu_close_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config.startup.source, StartupSource::Persisted);
        assert_eq!(config.upload.max_bytes, 52_428_800);
        assert_eq!(config.images.max_retries, 2);
        assert_eq!(config.ui.menu_close_delay(), Duration::from_millis(500));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: FolioConfig = toml::from_str(
            r#"
[startup]
source = "bundled"

[images]
base_url = ""
"#,
        )
        .unwrap();
        assert_eq!(config.startup.source, StartupSource::Bundled);
        assert_eq!(config.images.base_url, "");
        assert_eq!(config.images.asset_base, "/");
    }

    #[test]
    fn unknown_startup_source_is_rejected() {
        let result: Result<FolioConfig, _> = toml::from_str("[startup]\nsource = \"remote\"\n");
        assert!(result.is_err());
    }
}
