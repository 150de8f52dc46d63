//! Numeric factor records

use serde::{Deserialize, Serialize};

/// A named numeric series with display attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub category: String,
    pub color: String,
    pub data: Vec<f64>,
}

impl Factor {
    /// Values with six decimals, joined by `|`
    pub fn data_key(&self) -> String {
        self.data
            .iter()
            .map(|value| format!("{:.6}", value))
            .collect::<Vec<_>>()
            .join("|")
    }
}
