use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

/// Top-level config file.
///
/// Example YAML:
/// ```yaml
/// data:
///   path: "Suburb Excel and Radar January 2025.xlsx"
///   sheet: SA3
/// scoring:
///   buy_affordability: ascending
/// dashboard:
///   top_n: 10
///   histogram_bins: 30
///   theme: auto
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Where the spreadsheet lives
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Workbook path; relative paths resolve against the working directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    #[serde(default = "default_sheet")]
    pub sheet: String,

    #[serde(default = "default_id_column")]
    pub id_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            sheet: default_sheet(),
            id_column: default_id_column(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("Suburb Excel and Radar January 2025.xlsx")
}

fn default_sheet() -> String {
    "SA3".to_string()
}

fn default_id_column() -> String {
    crate::data::ID_COLUMN.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Rows in the investment opportunity table (default: 10)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Bins in the price distribution (default: 30)
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    #[serde(default)]
    pub theme: ThemeMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            histogram_bins: default_histogram_bins(),
            theme: ThemeMode::default(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

fn default_histogram_bins() -> usize {
    30
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
