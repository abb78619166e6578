//! Priority: 0..=3, 3 が最も緊急。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;

/// Task priority in `{0, 1, 2, 3}`.
///
/// 範囲外の値は `Priority::new` / `TryFrom<u8>` の時点で弾くので、
/// 一度作られた Priority は常に有効。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const LOW: Self = Self(0);
    pub const NORMAL: Self = Self(1);
    pub const HIGH: Self = Self(2);
    pub const URGENT: Self = Self(3);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::URGENT.0 {
            return Err(ValidationError::PriorityOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
