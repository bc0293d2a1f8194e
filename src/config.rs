//! Book configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the book root next to the five year folders and is optional: stock
//! defaults describe an A4 landscape book over `Infantil1`..`Infantil5`.
//!
//! ## Config File Location
//!
//! ```text
//! book/
//! ├── config.toml              # Optional, overrides stock defaults
//! ├── Infantil1/
//! │   └── ...
//! └── Infantil5/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [book]
//! title = "Photo Book"
//! subtitle = "Infantil 1 - 5"
//! period = ""
//!
//! [[years]]                  # Exactly five entries, in rank order
//! folder = "Infantil1"       # Directory name (matched case-insensitively)
//! title = "Infantil 1"       # Divider page title
//! period = ""                # Divider page period, e.g. "2021"
//!
//! [page]
//! width_mm = 297.0
//! height_mm = 210.0
//!
//! [margins]
//! outer_mm = 10.0            # Every edge
//! spine_extra_mm = 5.0       # Added on the binding edge
//! inner_padding_mm = 3.0     # Inside the margins, every edge
//! gap_mm = 5.0               # Between photos on a page
//!
//! [layout]
//! pair_row_share = 0.6       # Height share of the two-photo row in L3A/L3B
//!
//! [slots]
//! "Infantil2/IMG_0042.jpg" = "full"   # full | left | right | top | bottom
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::book::layout::DEFAULT_PAIR_ROW_SHARE;
use crate::book::{Layout, PageSetup, PageSetupMm, SlotHints};
use crate::types::YEAR_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Book configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Cover text.
    pub book: BookInfo,
    /// The year folders in rank order.
    pub years: Vec<YearConfig>,
    pub page: PageConfig,
    pub margins: MarginsConfig,
    pub layout: LayoutConfig,
    /// Per-image slot overrides, keyed by image id.
    pub slots: SlotHints,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            book: BookInfo::default(),
            years: (1..=YEAR_COUNT).map(YearConfig::stock).collect(),
            page: PageConfig::default(),
            margins: MarginsConfig::default(),
            layout: LayoutConfig::default(),
            slots: SlotHints::new(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl BookConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.len() != YEAR_COUNT as usize {
            return Err(ConfigError::Validation(format!(
                "years must list exactly {YEAR_COUNT} folders, found {}",
                self.years.len()
            )));
        }
        let mut seen = HashSet::new();
        for year in &self.years {
            if year.folder.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "years.folder must not be empty".into(),
                ));
            }
            if !seen.insert(year.folder.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "years.folder '{}' is listed twice",
                    year.folder
                )));
            }
        }
        let page = [self.page.width_mm, self.page.height_mm];
        if !page.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(ConfigError::Validation(
                "page.width_mm and page.height_mm must be positive and finite".into(),
            ));
        }
        let m = &self.margins;
        if [m.outer_mm, m.spine_extra_mm, m.inner_padding_mm, m.gap_mm]
            .iter()
            .any(|v| !(v.is_finite() && *v >= 0.0))
        {
            return Err(ConfigError::Validation(
                "margins must be non-negative and finite".into(),
            ));
        }
        let share = self.layout.pair_row_share;
        if !(share.is_finite() && share > 0.0 && share < 1.0) {
            return Err(ConfigError::Validation(
                "layout.pair_row_share must be between 0 and 1 (exclusive)".into(),
            ));
        }
        self.validate_boxes()
    }

    /// Every layout must leave positive box sizes on both page parities.
    fn validate_boxes(&self) -> Result<(), ConfigError> {
        let setup = self.page_setup();
        for page_index in [1, 2] {
            let usable = setup.usable_rect(page_index);
            for layout in Layout::ALL {
                let degenerate = layout
                    .boxes(&usable, &setup.spacing())
                    .iter()
                    .any(|b| !(b.width > 0.0 && b.height > 0.0));
                if degenerate {
                    return Err(ConfigError::Validation(format!(
                        "margins and gap leave no room for layout {} on the page",
                        layout.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Page size and margins converted to points.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup::from_mm(
            PageSetupMm {
                page_width: self.page.width_mm,
                page_height: self.page.height_mm,
                outer_margin: self.margins.outer_mm,
                spine_extra: self.margins.spine_extra_mm,
                inner_padding: self.margins.inner_padding_mm,
                gap: self.margins.gap_mm,
            },
            self.layout.pair_row_share,
        )
    }

    /// Year entry for a 1-based rank.
    pub fn year(&self, rank: u8) -> Option<&YearConfig> {
        self.years.get(usize::from(rank).checked_sub(1)?)
    }
}

/// Cover page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookInfo {
    pub title: String,
    pub subtitle: String,
    /// Free text such as `"2021 ~ 2025"`.
    pub period: String,
}

impl Default for BookInfo {
    fn default() -> Self {
        Self {
            title: "Photo Book".to_string(),
            subtitle: "Infantil 1 - 5".to_string(),
            period: String::new(),
        }
    }
}

/// One year folder and its divider page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearConfig {
    /// Directory name under the book root, matched case-insensitively.
    pub folder: String,
    /// Divider title. Empty falls back to the folder name.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub period: String,
}

impl YearConfig {
    fn stock(rank: u8) -> Self {
        Self {
            folder: format!("Infantil{rank}"),
            title: format!("Infantil {rank}"),
            period: String::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.folder
        } else {
            &self.title
        }
    }
}

/// Physical page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_mm: 297.0,
            height_mm: 210.0,
        }
    }
}

/// Page margins. The binding edge gets `outer_mm + spine_extra_mm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginsConfig {
    pub outer_mm: f64,
    pub spine_extra_mm: f64,
    pub inner_padding_mm: f64,
    pub gap_mm: f64,
}

impl Default for MarginsConfig {
    fn default() -> Self {
        Self {
            outer_mm: 10.0,
            spine_extra_mm: 5.0,
            inner_padding_mm: 3.0,
            gap_mm: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Share of `usable height - gap` given to the two-photo row of L3A/L3B.
    pub pair_row_share: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pair_row_share: DEFAULT_PAIR_ROW_SHARE,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for identification and grouping.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores).max(1)
}

/// Size the global rayon pool from the processing config.
///
/// The first call wins; later calls leave the running pool alone.
pub fn init_thread_pool(processing: &ProcessingConfig) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(effective_threads(processing))
        .build_global()
        .ok();
}

/// Stock defaults as a TOML value, the base every user config merges over.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BookConfig::default())?)
}

/// Deep-merge two TOML values. Tables merge key by key; anything else
/// (including arrays such as `[[years]]`) is replaced by the overlay.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from a directory, if present.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the base, deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BookConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the book config from `root/config.toml` over stock defaults.
pub fn load_config(root: &Path) -> Result<BookConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// The documented stock `config.toml`, printed by `photobook gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Photobook Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the book root, next to the year folders.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Cover
# ---------------------------------------------------------------------------
[book]
title = "Photo Book"
subtitle = "Infantil 1 - 5"
# Free text shown under the subtitle, e.g. "2021 ~ 2025".
period = ""

# ---------------------------------------------------------------------------
# Year folders, in book order. Exactly five entries.
# Folder names are matched case-insensitively. Each year starts with a
# divider page showing its title and period.
# ---------------------------------------------------------------------------
[[years]]
folder = "Infantil1"
title = "Infantil 1"
period = ""

[[years]]
folder = "Infantil2"
title = "Infantil 2"
period = ""

[[years]]
folder = "Infantil3"
title = "Infantil 3"
period = ""

[[years]]
folder = "Infantil4"
title = "Infantil 4"
period = ""

[[years]]
folder = "Infantil5"
title = "Infantil 5"
period = ""

# ---------------------------------------------------------------------------
# Page size (landscape A4)
# ---------------------------------------------------------------------------
[page]
width_mm = 297.0
height_mm = 210.0

# ---------------------------------------------------------------------------
# Margins
# ---------------------------------------------------------------------------
[margins]
# Applied on every edge.
outer_mm = 10.0
# Added to the binding edge: left on odd pages, right on even pages.
spine_extra_mm = 5.0
# Applied inside the margins on every edge.
inner_padding_mm = 3.0
# Space between neighbouring photos.
gap_mm = 5.0

# ---------------------------------------------------------------------------
# Layouts
# ---------------------------------------------------------------------------
[layout]
# Height share of the two-photo row in three-photo pages (0 < share < 1).
pair_row_share = 0.6

# ---------------------------------------------------------------------------
# Slot overrides, keyed by image path relative to the book root.
# full = page of its own; left/right = side-by-side pair with the next photo;
# top/bottom = stacked pair with the next photo.
# ---------------------------------------------------------------------------
[slots]
# "Infantil2/IMG_0042.jpg" = "full"

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit for auto (= number of CPU cores).
# max_processes = 4
"##
}
