//! Task Entity
//!
//! A task always lives in exactly one section. Edits never mutate a task in
//! place: each builder returns a new record with the same id, which the section
//! store swaps in by id.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{CollaboratorId, ProjectId, TaskId};

/// A row on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    /// Assigned collaborators, by reference
    pub collaborators: BTreeSet<CollaboratorId>,
    pub project: Option<ProjectId>,
    /// "Only me" when true, public otherwise
    pub is_private: bool,
    /// Values of user-added columns, keyed by accessor key
    #[serde(default)]
    pub custom_values: BTreeMap<String, String>,
}

impl Task {
    /// Create a fresh task: no date, nobody assigned, no project, public
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            due_date: None,
            collaborators: BTreeSet::new(),
            project: None,
            is_private: false,
            custom_values: BTreeMap::new(),
        }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_due_date(&self, due_date: Option<NaiveDate>) -> Self {
        Self {
            due_date,
            ..self.clone()
        }
    }

    /// Add the collaborator if absent, remove it if present
    pub fn toggled_collaborator(&self, collaborator: &CollaboratorId) -> Self {
        let mut next = self.clone();
        if !next.collaborators.remove(collaborator) {
            next.collaborators.insert(collaborator.clone());
        }
        next
    }

    pub fn with_project(&self, project: Option<ProjectId>) -> Self {
        Self {
            project,
            ..self.clone()
        }
    }

    pub fn toggled_visibility(&self) -> Self {
        Self {
            is_private: !self.is_private,
            ..self.clone()
        }
    }

    /// Set (or clear with `None`) the value of a custom column
    pub fn with_custom_value(&self, key: &str, value: Option<String>) -> Self {
        let mut next = self.clone();
        match value {
            Some(value) => {
                next.custom_values.insert(key.to_string(), value);
            }
            None => {
                next.custom_values.remove(key);
            }
        }
        next
    }

    pub fn custom_value(&self, key: &str) -> Option<&str> {
        self.custom_values.get(key).map(String::as_str)
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
