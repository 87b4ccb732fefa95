//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each write intent
//! computes the next snapshot from the current one and writes it back in a
//! single write, so subscribers only ever see whole snapshots.

use leptos::prelude::*;
use reactive_stores::Store;
use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::domain::{
    Collaborator, ColumnWidth, FieldId, FieldKind, IdSource, ProjectId, SectionId, Task, TaskId,
};
use crate::drag::DragCommand;
use crate::error::BoardResult;
use crate::fields::FieldRegistry;
use crate::layout::{project, ColumnTemplate};
use crate::projects::{ColorAssigner, ProjectCatalog};
use crate::sections::SectionStore;

/// Whole board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Sections with their tasks, in display order
    pub sections: SectionStore,
    /// Column definitions
    pub fields: FieldRegistry,
    pub projects: ProjectCatalog,
    /// Collaborator directory
    pub collaborators: Vec<Collaborator>,
}

impl BoardState {
    /// Fresh board seeded from config: no sections, built-in columns
    pub fn new(config: &BoardConfig, ids: &dyn IdSource, colors: &dyn ColorAssigner) -> Self {
        Self {
            sections: SectionStore::default(),
            fields: FieldRegistry::builtin(),
            projects: ProjectCatalog::from_names(
                ids,
                colors,
                config.projects.iter().map(String::as_str),
            ),
            collaborators: config.collaborators.clone(),
        }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

fn commit_sections(
    store: &BoardStore,
    op: &str,
    f: impl FnOnce(&SectionStore) -> BoardResult<SectionStore>,
) -> BoardResult<()> {
    let current = store.sections().get_untracked();
    match f(&current) {
        Ok(next) => {
            if next != current {
                *store.sections().write() = next;
            }
            Ok(())
        }
        Err(e) => {
            warn!(op, error = %e, "section update rejected");
            Err(e)
        }
    }
}

/// Commit an update that cannot fail; unchanged snapshots are not written
fn replace_sections(store: &BoardStore, f: impl FnOnce(&SectionStore) -> SectionStore) {
    let current = store.sections().get_untracked();
    let next = f(&current);
    if next != current {
        *store.sections().write() = next;
    }
}

/// Add a section; blank titles are ignored
pub fn store_add_section(store: &BoardStore, ids: &dyn IdSource, title: &str) -> Option<SectionId> {
    let title = title.trim();
    if title.is_empty() {
        debug!("blank section title ignored");
        return None;
    }
    let next = store.sections().get_untracked().add_section(ids, title);
    let id = next.sections().last().map(|s| s.id.clone());
    *store.sections().write() = next;
    id
}

pub fn store_delete_section(store: &BoardStore, id: &SectionId) {
    replace_sections(store, |s| s.delete_section(id));
}

pub fn store_reorder_sections(store: &BoardStore, active: &SectionId, over: &SectionId) -> BoardResult<()> {
    commit_sections(store, "reorder_sections", |s| s.reorder_sections(active, over))
}

/// Add a task to a section; blank titles are ignored
pub fn store_add_task(
    store: &BoardStore,
    ids: &dyn IdSource,
    section_id: &SectionId,
    title: &str,
) -> BoardResult<Option<TaskId>> {
    let title = title.trim();
    if title.is_empty() {
        debug!(section_id = %section_id, "blank task title ignored");
        return Ok(None);
    }
    let mut added = None;
    commit_sections(store, "add_task", |s| {
        let next = s.add_task(ids, section_id, title)?;
        added = next
            .section(section_id)
            .and_then(|section| section.tasks.last())
            .map(|task| task.id.clone());
        Ok(next)
    })?;
    Ok(added)
}

pub fn store_update_task(store: &BoardStore, section_id: &SectionId, task: Task) {
    replace_sections(store, |s| s.update_task(section_id, task));
}

pub fn store_delete_task(store: &BoardStore, section_id: &SectionId, task_id: &TaskId) {
    replace_sections(store, |s| s.delete_task(section_id, task_id));
}

pub fn store_reorder_tasks(
    store: &BoardStore,
    section_id: &SectionId,
    active: &TaskId,
    over: &TaskId,
) -> BoardResult<()> {
    commit_sections(store, "reorder_tasks", |s| s.reorder_tasks(section_id, active, over))
}

pub fn store_toggle_expanded(store: &BoardStore, section_id: &SectionId) {
    replace_sections(store, |s| s.toggle_expanded(section_id));
}

/// Apply the reorder a drop resolved to
pub fn store_apply_drag(store: &BoardStore, command: &DragCommand) -> BoardResult<()> {
    commit_sections(store, "drag_drop", |s| command.apply(s))
}

pub fn store_toggle_field(store: &BoardStore, id: &FieldId) -> BoardResult<()> {
    let next = store
        .fields()
        .get_untracked()
        .toggle_field(id)
        .inspect_err(|e| warn!(field_id = %id, error = %e, "field toggle rejected"))?;
    *store.fields().write() = next;
    Ok(())
}

/// Add a custom column; blank names are ignored
pub fn store_add_field(
    store: &BoardStore,
    ids: &dyn IdSource,
    name: &str,
    kind: FieldKind,
    width: ColumnWidth,
) -> Option<FieldId> {
    let name = name.trim();
    if name.is_empty() {
        debug!("blank field name ignored");
        return None;
    }
    let next = store
        .fields()
        .get_untracked()
        .add_custom_field(ids, name, kind, width);
    let id = next.fields().last().map(|f| f.id.clone());
    *store.fields().write() = next;
    id
}

/// Add a project; blank names are ignored
pub fn store_add_project(
    store: &BoardStore,
    ids: &dyn IdSource,
    colors: &dyn ColorAssigner,
    name: &str,
) -> Option<ProjectId> {
    let name = name.trim();
    if name.is_empty() {
        debug!("blank project name ignored");
        return None;
    }
    let next = store.projects().get_untracked().add_project(ids, colors, name);
    let id = next.iter().last().map(|p| p.id.clone());
    *store.projects().write() = next;
    id
}

/// Rename a project; blank names and unknown ids are ignored
pub fn store_rename_project(store: &BoardStore, id: &ProjectId, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        debug!(project_id = %id, "blank project name ignored");
        return;
    }
    let current = store.projects().get_untracked();
    let next = current.rename_project(id, name);
    if next != current {
        *store.projects().write() = next;
    }
}

/// Current column template; tracks `fields` when read inside a reactive scope
pub fn column_template(store: &BoardStore, selection: ColumnWidth) -> ColumnTemplate {
    store
        .fields()
        .with(|fields| project(selection, fields.visible_fields()))
}
