//! Sortable DragDrop Utilities
//!
//! Pointer-driven drag sessions for sortable lists, independent of any UI framework.
//! Uses an activation distance to distinguish click from drag, picks the drop
//! target with the closest-center rule, and routes each gesture to the deepest
//! capture scope under the pointer so nested sortable lists never fight over it.

mod capture;
mod collision;
mod geometry;
mod machine;

pub use capture::{DragLayout, ScopeLayout};
pub use collision::{closest_center, Droppable};
pub use geometry::{Point, Rect};
pub use machine::{
    CancelReason, DragEffect, DragMachine, DragPhase, DragSession, DragState, NoopReason,
    PointerEvent,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default movement threshold (layout units) before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

/// Errors raised while configuring a drag machine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    /// Activation distance must be finite and non-negative
    #[error("activation distance must be finite and >= 0 (got {distance})")]
    InvalidActivationDistance { distance: f64 },
}

/// Drag tuning shared by every session of a machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer displacement that must be exceeded before a drag starts
    pub activation_distance: f64,
}

impl DragConfig {
    /// Build a validated config
    pub fn new(activation_distance: f64) -> Result<Self, DragError> {
        let config = Self { activation_distance };
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<(), DragError> {
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(DragError::InvalidActivationDistance {
                distance: self.activation_distance,
            });
        }
        Ok(())
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}
