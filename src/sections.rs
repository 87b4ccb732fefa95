//! Section Store
//!
//! The two-level board hierarchy (sections, then tasks) as an immutable
//! snapshot. Every operation returns a new store; the receiver stays valid.
//!
//! Structural moves report `NotFound`, task operations against a missing
//! section report `SectionNotFound`, while deletes and updates of missing ids
//! quietly return the snapshot unchanged (double clicks and replayed UI events
//! are expected).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{fresh_id, IdSource, Section, SectionId, Task, TaskId};
use crate::error::{BoardError, BoardResult};
use crate::ordering::OrderedCollection;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionStore {
    sections: OrderedCollection<Section>,
}

impl SectionStore {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections: OrderedCollection::new(sections),
        }
    }

    pub fn sections(&self) -> &OrderedCollection<Section> {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Locate a task and the section that owns it
    pub fn find_task(&self, task_id: &TaskId) -> Option<(&Section, &Task)> {
        self.sections
            .iter()
            .find_map(|section| section.tasks.get(task_id).map(|task| (section, task)))
    }

    pub fn contains_task(&self, task_id: &TaskId) -> bool {
        self.find_task(task_id).is_some()
    }

    /// Append a new expanded, empty section
    pub fn add_section(&self, ids: &dyn IdSource, title: &str) -> Self {
        let id = fresh_id(ids, |candidate| {
            self.sections.contains(&SectionId::new(candidate))
        });
        let section = Section::new(SectionId::new(id), title);
        debug!(section_id = %section.id, title, "section added");
        Self {
            sections: self.sections.appended(section),
        }
    }

    /// Remove a section and every task in it; unknown ids are a no-op
    pub fn delete_section(&self, id: &SectionId) -> Self {
        match self.sections.without(id) {
            Some(sections) => {
                debug!(section_id = %id, "section deleted");
                Self { sections }
            }
            None => {
                debug!(section_id = %id, "delete of unknown section ignored");
                self.clone()
            }
        }
    }

    pub fn reorder_sections(&self, active: &SectionId, over: &SectionId) -> BoardResult<Self> {
        let sections = self.sections.move_item(active, over)?;
        debug!(active = %active, over = %over, "sections reordered");
        Ok(Self { sections })
    }

    /// Append a fresh task to a section.
    ///
    /// The id is unique across every section, not just the target one.
    pub fn add_task(&self, ids: &dyn IdSource, section_id: &SectionId, title: &str) -> BoardResult<Self> {
        if !self.sections.contains(section_id) {
            return Err(BoardError::section_not_found(section_id));
        }
        let id = fresh_id(ids, |candidate| self.contains_task(&TaskId::new(candidate)));
        let task = Task::new(TaskId::new(id), title);
        debug!(section_id = %section_id, task_id = %task.id, title, "task added");

        self.with_section(section_id, |section| {
            section.with_tasks(section.tasks.appended(task))
        })
        .ok_or_else(|| BoardError::section_not_found(section_id))
    }

    /// Swap in `task` for the record with the same id in `section_id`.
    ///
    /// No-op when the section is missing or does not hold that task.
    pub fn update_task(&self, section_id: &SectionId, task: Task) -> Self {
        let task_id = task.id.clone();
        let Some(section) = self.sections.get(section_id) else {
            debug!(section_id = %section_id, task_id = %task_id, "update in unknown section ignored");
            return self.clone();
        };
        let Some(tasks) = section.tasks.replaced(task) else {
            debug!(section_id = %section_id, task_id = %task_id, "update of unknown task ignored");
            return self.clone();
        };
        debug!(section_id = %section_id, task_id = %task_id, "task updated");
        self.with_section(section_id, |section| section.with_tasks(tasks))
            .unwrap_or_else(|| self.clone())
    }

    /// Remove one task; no-op when the section or task is missing
    pub fn delete_task(&self, section_id: &SectionId, task_id: &TaskId) -> Self {
        let tasks = self
            .sections
            .get(section_id)
            .and_then(|section| section.tasks.without(task_id));
        match tasks {
            Some(tasks) => {
                debug!(section_id = %section_id, task_id = %task_id, "task deleted");
                self.with_section(section_id, |section| section.with_tasks(tasks))
                    .unwrap_or_else(|| self.clone())
            }
            None => {
                debug!(section_id = %section_id, task_id = %task_id, "delete of unknown task ignored");
                self.clone()
            }
        }
    }

    /// Reorder tasks within one section; tasks never cross sections here
    pub fn reorder_tasks(
        &self,
        section_id: &SectionId,
        active: &TaskId,
        over: &TaskId,
    ) -> BoardResult<Self> {
        let section = self
            .sections
            .get(section_id)
            .ok_or_else(|| BoardError::section_not_found(section_id))?;
        let tasks = section.tasks.move_item(active, over)?;
        debug!(section_id = %section_id, active = %active, over = %over, "tasks reordered");
        self.with_section(section_id, |section| section.with_tasks(tasks))
            .ok_or_else(|| BoardError::section_not_found(section_id))
    }

    /// Flip `expanded` by replacing the section record; unknown ids are a no-op
    pub fn toggle_expanded(&self, section_id: &SectionId) -> Self {
        match self.with_section(section_id, Section::toggled) {
            Some(next) => {
                debug!(section_id = %section_id, "section expansion toggled");
                next
            }
            None => {
                debug!(section_id = %section_id, "toggle of unknown section ignored");
                self.clone()
            }
        }
    }

    fn with_section(&self, id: &SectionId, f: impl FnOnce(&Section) -> Section) -> Option<Self> {
        self.sections.updated(id, f).map(|sections| Self { sections })
    }
}
