//! Bot configuration handling.
//!
//! Extracts the standard knobs from a JSON config while preserving any
//! strategy-specific fields in `custom`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::trait_def::BotError;

fn default_declare_probability() -> f64 {
    0.9
}

fn default_true() -> bool {
    true
}

/// Standard configuration for bots.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "declareProbability": 0.75, "randomTieBreak": false}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// RNG seed for reproducible decisions. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Chance of remembering to declare when down to one card.
    #[serde(default = "default_declare_probability")]
    pub declare_probability: f64,

    /// Break ties between equally ranked moves at random instead of taking
    /// the first in hand order.
    #[serde(default = "default_true")]
    pub random_tie_break: bool,

    #[serde(flatten)]
    pub custom: JsonValue,
}

impl BotConfig {
    /// Parse an optional JSON config. `None` yields the defaults.
    pub fn from_json(config: Option<&JsonValue>) -> Result<Self, BotError> {
        let parsed = match config {
            Some(json) => serde_json::from_value::<Self>(json.clone())
                .map_err(|e| BotError::InvalidConfig(e.to_string()))?,
            None => Self::default(),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), BotError> {
        if !(0.0..=1.0).contains(&self.declare_probability) {
            return Err(BotError::InvalidConfig(format!(
                "declareProbability must be within 0..=1, got {}",
                self.declare_probability
            )));
        }
        Ok(())
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            seed: None,
            declare_probability: default_declare_probability(),
            random_tie_break: true,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }
}
