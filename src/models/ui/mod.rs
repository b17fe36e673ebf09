// View models
// Which calendar window a caller is looking at and how it moves.

use serde::{Deserialize, Serialize};

/// Calendar view granularity used for window filtering and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Week,
    #[default]
    Month,
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            other => Err(format!("Unknown view type '{}'", other)),
        }
    }
}

/// Direction for stepping the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Previous,
    Next,
}
