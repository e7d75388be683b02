//! FILENAME: core/pivot-grid/src/config.rs
//! Host configuration read by the grid builder.
//!
//! The widget that embeds a controller owns its configuration; the
//! controller only ever asks two questions of it, through `PivotHost`.

use serde::{Deserialize, Serialize};

/// Locale used when the OS does not report one.
pub const DEFAULT_LOCALE: &str = "en";

/// What the controller needs to know about its host.
pub trait PivotHost {
    /// Whether a totals row should be appended under the data body.
    fn show_summary(&self) -> bool;

    /// Current UI locale (BCP 47 style, e.g. `"ru-RU"`).
    fn locale(&self) -> &str;
}

/// Plain configuration object, deserializable from the widget's config JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PivotConfig {
    pub show_summary: bool,
    pub locale: String,
}

impl PivotConfig {
    pub fn new(show_summary: bool, locale: impl Into<String>) -> Self {
        PivotConfig {
            show_summary,
            locale: locale.into(),
        }
    }

    /// Parses a config object; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for PivotConfig {
    fn default() -> Self {
        PivotConfig {
            show_summary: false,
            locale: sys_locale::get_locale()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        }
    }
}

impl PivotHost for PivotConfig {
    fn show_summary(&self) -> bool {
        self.show_summary
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}
