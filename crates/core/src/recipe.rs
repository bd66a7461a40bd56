//! Reproducible description of a headless render.
//!
//! A [`Recipe`] captures everything needed to redraw the same frame: surface
//! size, parameter overrides, PRNG seed and frame count.

use crate::config::FieldConfig;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Surface size, params, seed and frame count of one render.
///
/// Two identical recipes produce bit-identical particle fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub width: u32,
    pub height: u32,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Recipe {
    /// A recipe with no param overrides and zero frames.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
        }
    }

    /// Checks dimensions, params and the resulting particle count, returning
    /// the resolved field config.
    pub fn validate(&self) -> Result<FieldConfig, FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let config = FieldConfig::from_json(&self.params)?;
        config.check_surface(self.width as f64, self.height as f64)?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, FieldError> {
        serde_json::from_str(json).map_err(|e| FieldError::Io(format!("invalid recipe: {e}")))
    }
}
