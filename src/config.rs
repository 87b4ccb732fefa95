//! Board Configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use sortable_dnd::{DragConfig, DEFAULT_ACTIVATION_DISTANCE};

use crate::domain::{Collaborator, CollaboratorId, ColumnWidth};
use crate::error::{BoardError, BoardResult};
use crate::fields::DEFAULT_CUSTOM_FIELD_WIDTH;
use crate::layout::SELECTION_COLUMN_WIDTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pointer travel (layout units) before a press becomes a drag
    pub activation_distance: f64,
    pub selection_column_width: ColumnWidth,
    /// Width of columns created through "add field"
    pub custom_field_width: ColumnWidth,
    /// Collaborator directory tasks can be assigned from
    pub collaborators: Vec<Collaborator>,
    /// Project names created at startup
    pub projects: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let placeholder = "/placeholder-user.jpg";
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            selection_column_width: SELECTION_COLUMN_WIDTH,
            custom_field_width: DEFAULT_CUSTOM_FIELD_WIDTH,
            collaborators: vec![
                Collaborator::with_avatar(CollaboratorId::new("1"), "Krishna", placeholder),
                Collaborator::with_avatar(CollaboratorId::new("2"), "Bob Wilson", placeholder),
                Collaborator::with_avatar(CollaboratorId::new("3"), "Charlie Davis", placeholder),
            ],
            projects: ["Marketing", "Development", "Design"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BoardError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BoardResult<()> {
        self.drag_config()?;
        let mut seen = std::collections::HashSet::new();
        for collaborator in &self.collaborators {
            if !seen.insert(&collaborator.id) {
                return Err(BoardError::invalid_config(format!(
                    "duplicate collaborator id '{}'",
                    collaborator.id
                )));
            }
        }
        Ok(())
    }

    /// Settings for the drag engine
    pub fn drag_config(&self) -> BoardResult<DragConfig> {
        DragConfig::new(self.activation_distance)
            .map_err(|e| BoardError::invalid_config(e.to_string()))
    }
}
