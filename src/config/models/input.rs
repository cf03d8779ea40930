//! Input file settings

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}
