use crate::config::SortableConfig;
use crate::request::SortState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction carried in the `direction` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Parse an ambient direction value. Anything but the two literal
    /// values is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown on a header and the direction its link requests next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionCue {
    pub icon_class: String,
    pub next: SortDirection,
}

/// Decide the icon state and next direction for one header link.
///
/// The toggle compares the ambient sort value against the raw `sort_key`
/// (relation prefix included); the icon lookup uses the resolved `column`.
/// A column counts as actively sorted only when the ambient direction is a
/// recognized value.
pub fn resolve_direction(
    column: &str,
    sort_key: &str,
    state: &SortState,
    config: &SortableConfig,
) -> DirectionCue {
    if state.active_sort.as_deref() == Some(sort_key) {
        if let Some(current) = state
            .active_direction
            .as_deref()
            .and_then(SortDirection::parse)
        {
            let mut icon_class = config.icon_for_column(column).to_string();
            icon_class.push_str(match current {
                SortDirection::Asc => &config.asc_suffix,
                SortDirection::Desc => &config.desc_suffix,
            });

            return DirectionCue {
                icon_class,
                next: current.opposite(),
            };
        }
    }

    DirectionCue {
        icon_class: config.sortable_icon.clone(),
        next: config.default_direction_unsorted,
    }
}
