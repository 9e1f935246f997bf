use crate::direction::SortDirection;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-column icon override.
///
/// Any column listed in `rows` uses `class` as its icon base instead of the
/// default icon set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconColumn {
    pub class: String,

    #[serde(default)]
    pub rows: Vec<String>,
}

/// Rendering configuration for sortable links.
///
/// Every option has a default, so a `SortableConfig::default()` renders
/// working links out of the box. Callers construct one per application (or
/// parse it from TOML with [`SortableConfig::from_toml_str`]) and pass it to
/// the renderer explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortableConfig {
    /// Separator between relation and column in a sort key, e.g. the dot in
    /// `user.name`. An empty separator disables splitting.
    #[serde(default = "default_relation_column_separator")]
    pub uri_relation_column_separator: String,

    /// When set, every render reports the resolved title under this key via
    /// [`Rendered::injected_title`](crate::link::Rendered).
    #[serde(default)]
    pub inject_title_as: Option<String>,

    /// Apply the injected title formatter to caller-supplied text titles.
    /// Defaulted titles (column names) are always formatted.
    #[serde(default = "default_true")]
    pub format_custom_titles: bool,

    /// Icon class shown when the column is not the active sort column.
    #[serde(default)]
    pub sortable_icon: String,

    /// Fallback icon base for columns not matched by any `columns` entry.
    #[serde(default)]
    pub default_icon_set: String,

    /// Per-column icon overrides, scanned in order; the last match wins.
    #[serde(default)]
    pub columns: Vec<IconColumn>,

    /// Suffix appended to the icon base when the active direction is
    /// ascending.
    #[serde(default = "default_asc_suffix")]
    pub asc_suffix: String,

    /// Suffix appended to the icon base when the active direction is
    /// descending.
    #[serde(default = "default_desc_suffix")]
    pub desc_suffix: String,

    /// Direction a link requests when its column is not currently sorted.
    #[serde(default)]
    pub default_direction_unsorted: SortDirection,

    /// Render the state icon at all.
    #[serde(default = "default_true")]
    pub enable_icons: bool,

    /// Markup placed between the title and the icon element.
    #[serde(default)]
    pub icon_text_separator: String,

    /// Place the icon inside the anchor so clicking it follows the link.
    #[serde(default)]
    pub clickable_icon: bool,

    /// CSS class applied to every sortable anchor.
    #[serde(default)]
    pub anchor_class: Option<String>,

    /// CSS class applied when the anchor's column is the active sort column.
    #[serde(default)]
    pub active_anchor_class: Option<String>,

    /// Prefix combined with the asc/desc suffix into a direction CSS class
    /// on active anchors.
    #[serde(default)]
    pub direction_anchor_class_prefix: Option<String>,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            uri_relation_column_separator: default_relation_column_separator(),
            inject_title_as: None,
            format_custom_titles: default_true(),
            sortable_icon: String::new(),
            default_icon_set: String::new(),
            columns: Vec::new(),
            asc_suffix: default_asc_suffix(),
            desc_suffix: default_desc_suffix(),
            default_direction_unsorted: SortDirection::default(),
            enable_icons: default_true(),
            icon_text_separator: String::new(),
            clickable_icon: false,
            anchor_class: None,
            active_anchor_class: None,
            direction_anchor_class_prefix: None,
        }
    }
}

impl SortableConfig {
    /// Parse a configuration from a TOML document. Missing options take
    /// their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(contents)
            .map_err(|e| Error::Configuration(format!("failed to parse sortable config: {e}")))?;
        log::debug!("loaded sortable config from TOML");
        Ok(config)
    }

    /// Icon base class for a column: the last `columns` entry listing it, or
    /// the default icon set.
    pub fn icon_for_column(&self, column: &str) -> &str {
        let mut icon = self.default_icon_set.as_str();

        for entry in &self.columns {
            if entry.rows.iter().any(|row| row == column) {
                icon = &entry.class;
            }
        }

        icon
    }
}

fn default_relation_column_separator() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

fn default_asc_suffix() -> String {
    "-asc".to_string()
}

fn default_desc_suffix() -> String {
    "-desc".to_string()
}
