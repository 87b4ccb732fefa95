//! Tree Utilities
//!
//! Flattens the section/task hierarchy into display rows.

use crate::domain::{Section, SectionId, Task};
use crate::sections::SectionStore;

/// One rendered row: a section header or one of its tasks
#[derive(Debug, Clone, PartialEq)]
pub enum BoardRow<'a> {
    Section(&'a Section),
    Task {
        section_id: &'a SectionId,
        task: &'a Task,
    },
}

impl BoardRow<'_> {
    /// Nesting level: 0 for sections, 1 for tasks
    pub fn depth(&self) -> usize {
        match self {
            BoardRow::Section(_) => 0,
            BoardRow::Task { .. } => 1,
        }
    }
}

/// Rows in display order. Collapsed sections contribute only their header.
pub fn flatten_board(store: &SectionStore) -> Vec<BoardRow<'_>> {
    let mut rows = Vec::new();
    for section in store.iter() {
        rows.push(BoardRow::Section(section));
        if section.expanded {
            rows.extend(section.tasks.iter().map(|task| BoardRow::Task {
                section_id: &section.id,
                task,
            }));
        }
    }
    rows
}
