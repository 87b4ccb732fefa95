//! Reference Data
//!
//! Collaborators and projects are immutable records that tasks point at by id.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{CollaboratorId, ProjectId};

/// A person that can be assigned to tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: CollaboratorId,
    pub name: String,
    /// Avatar image URL
    pub avatar: Option<String>,
}

impl Collaborator {
    pub fn new(id: CollaboratorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(id: CollaboratorId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: Some(avatar.into()),
        }
    }

    /// Fallback shown when there is no avatar image
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

impl Entity for Collaborator {
    type Id = CollaboratorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Display color (hex, e.g. "#1d76db")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectColor(String);

impl ProjectColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A project tasks can be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub color: ProjectColor,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, color: ProjectColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
