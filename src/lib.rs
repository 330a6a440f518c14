// Library exports for pivotgrid

pub mod csv_reader;
pub mod data;
pub mod palette;
pub mod parser;
pub mod runtime;
pub mod selector;

// Pipeline phases
pub mod ir;
pub mod resolve;
pub mod aggregate;
pub mod clip;
pub mod order;
pub mod scale;
pub mod layout;
pub mod tooltip;

use data::KeyValue;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum InputFormat {
    #[serde(rename = "csv")]
    #[default]
    Csv,
    #[serde(rename = "json")]
    Json,
}

/// User-facing pivot configuration. Policies are kept as text here and
/// typed during resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct PivotConfig {
    /// Row-key fields; several fields form a composite key
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub cols: Vec<String>,
    /// Summed field
    #[serde(default)]
    pub measure: Option<String>,
    /// Field shown when no measure is configured
    #[serde(default)]
    pub display: Option<String>,
    /// Secondary key for sub-rows
    #[serde(default)]
    pub clip: Option<String>,
    #[serde(default)]
    pub exclude: Vec<KeyValue>,
    /// Derived from the first row field name when absent
    #[serde(default)]
    pub row_order: Option<String>,
    #[serde(default)]
    pub col_order: Option<String>,
    #[serde(default = "default_bands")]
    pub bands: String,
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub hour_variant: Option<String>,
    #[serde(default = "default_text_threshold")]
    pub text_threshold: f64,
    #[serde(default)]
    pub low_color: Option<String>,
    #[serde(default)]
    pub high_color: Option<String>,
    #[serde(default = "default_tooltip_margin")]
    pub tooltip_margin: f64,
}

fn default_bands() -> String { "linear".to_string() }
fn default_text_threshold() -> f64 { palette::DEFAULT_TEXT_THRESHOLD }
fn default_tooltip_margin() -> f64 { tooltip::DEFAULT_MARGIN }

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cols: Vec::new(),
            measure: None,
            display: None,
            clip: None,
            exclude: Vec::new(),
            row_order: None,
            col_order: None,
            bands: default_bands(),
            normalized: false,
            hour_variant: None,
            text_threshold: default_text_threshold(),
            low_color: None,
            high_color: None,
            tooltip_margin: default_tooltip_margin(),
        }
    }
}
