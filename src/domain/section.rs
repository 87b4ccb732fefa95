//! Section Entity
//!
//! A collapsible group of tasks. Deleting a section deletes its tasks.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::SectionId;
use super::task::Task;
use crate::ordering::OrderedCollection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier
    pub id: SectionId,
    pub title: String,
    /// Whether the task list is shown
    pub expanded: bool,
    /// Tasks in display order
    pub tasks: OrderedCollection<Task>,
}

impl Section {
    /// Create a new expanded section with no tasks
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            expanded: true,
            tasks: OrderedCollection::default(),
        }
    }

    pub fn with_tasks(&self, tasks: OrderedCollection<Task>) -> Self {
        Self {
            tasks,
            ..self.clone()
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            expanded: !self.expanded,
            ..self.clone()
        }
    }
}

impl Entity for Section {
    type Id = SectionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
