//! Board Context
//!
//! Everything a rendering host needs, provided once via Leptos Context API:
//! the reactive store, the id and color sources, config, and the board's one
//! drag coordinator.

use std::sync::{Arc, Mutex, MutexGuard};

use leptos::prelude::*;
use reactive_stores::Store;
use sortable_dnd::{Point, PointerEvent};
use tracing::warn;

use crate::config::BoardConfig;
use crate::domain::{FieldId, FieldKind, IdSource, ProjectId, SectionId, Task, TaskId, UuidIds};
use crate::drag::{stacked_layout, BoardDragCoordinator, BoardDragLayout, DragOutcome};
use crate::error::BoardResult;
use crate::layout::ColumnTemplate;
use crate::projects::{ColorAssigner, PaletteColors};
use crate::store::{self, BoardState, BoardStateStoreFields, BoardStore};

/// App-wide board handles provided via context
#[derive(Clone)]
pub struct BoardContext {
    pub store: BoardStore,
    ids: Arc<dyn IdSource>,
    colors: Arc<dyn ColorAssigner>,
    config: Arc<BoardConfig>,
    drag: Arc<Mutex<BoardDragCoordinator>>,
}

impl BoardContext {
    pub fn new(
        config: BoardConfig,
        ids: Arc<dyn IdSource>,
        colors: Arc<dyn ColorAssigner>,
    ) -> BoardResult<Self> {
        config.validate()?;
        let coordinator = BoardDragCoordinator::new(&config)?;
        let state = BoardState::new(&config, ids.as_ref(), colors.as_ref());
        Ok(Self {
            store: Store::new(state),
            ids,
            colors,
            config: Arc::new(config),
            drag: Arc::new(Mutex::new(coordinator)),
        })
    }

    /// Default config, UUID ids, palette colors
    pub fn with_defaults() -> BoardResult<Self> {
        Self::new(BoardConfig::default(), Arc::new(UuidIds), Arc::new(PaletteColors))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ---- Write intents ----

    pub fn add_section(&self, title: &str) -> Option<SectionId> {
        store::store_add_section(&self.store, self.ids.as_ref(), title)
    }

    pub fn delete_section(&self, id: &SectionId) {
        store::store_delete_section(&self.store, id)
    }

    pub fn reorder_sections(&self, active: &SectionId, over: &SectionId) -> BoardResult<()> {
        store::store_reorder_sections(&self.store, active, over)
    }

    pub fn toggle_expanded(&self, id: &SectionId) {
        store::store_toggle_expanded(&self.store, id)
    }

    pub fn add_task(&self, section_id: &SectionId, title: &str) -> BoardResult<Option<TaskId>> {
        store::store_add_task(&self.store, self.ids.as_ref(), section_id, title)
    }

    pub fn update_task(&self, section_id: &SectionId, task: Task) {
        store::store_update_task(&self.store, section_id, task)
    }

    pub fn delete_task(&self, section_id: &SectionId, task_id: &TaskId) {
        store::store_delete_task(&self.store, section_id, task_id)
    }

    pub fn reorder_tasks(&self, section_id: &SectionId, active: &TaskId, over: &TaskId) -> BoardResult<()> {
        store::store_reorder_tasks(&self.store, section_id, active, over)
    }

    pub fn toggle_field(&self, id: &FieldId) -> BoardResult<()> {
        store::store_toggle_field(&self.store, id)
    }

    /// Add a text column at the configured custom width
    pub fn add_field(&self, name: &str) -> Option<FieldId> {
        self.add_field_with_kind(name, FieldKind::Text)
    }

    pub fn add_field_with_kind(&self, name: &str, kind: FieldKind) -> Option<FieldId> {
        store::store_add_field(
            &self.store,
            self.ids.as_ref(),
            name,
            kind,
            self.config.custom_field_width,
        )
    }

    pub fn add_project(&self, name: &str) -> Option<ProjectId> {
        store::store_add_project(&self.store, self.ids.as_ref(), self.colors.as_ref(), name)
    }

    pub fn rename_project(&self, id: &ProjectId, name: &str) {
        store::store_rename_project(&self.store, id, name)
    }

    // ---- Reads ----

    /// Column template with the configured selection column
    pub fn column_template(&self) -> ColumnTemplate {
        store::column_template(&self.store, self.config.selection_column_width)
    }

    // ---- Drag ----

    fn coordinator(&self) -> MutexGuard<'_, BoardDragCoordinator> {
        self.drag.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Layout for a headless vertical list of equal rows
    pub fn stacked_drag_layout(&self, origin: Point, width: f64, row_height: f64) -> BoardDragLayout {
        self.store
            .sections()
            .with_untracked(|sections| stacked_layout(sections, origin, width, row_height).build(sections))
    }

    /// Feed one pointer event; a drop is applied to the store before returning
    pub fn pointer(&self, layout: &BoardDragLayout, event: PointerEvent) -> DragOutcome {
        let outcome = self.coordinator().handle(layout, event);
        if let Some(command) = &outcome.command {
            if let Err(e) = store::store_apply_drag(&self.store, command) {
                warn!(error = %e, benign = e.is_benign_race(), "drop could not be applied");
            }
        }
        outcome
    }

    pub fn cancel_drag(&self) {
        self.coordinator().cancel();
    }

    pub fn is_dragging(&self) -> bool {
        self.coordinator().is_active()
    }
}

/// Provide the board context to the component tree
pub fn provide_board_context(context: BoardContext) {
    provide_context(context.store);
    provide_context(context);
}

/// Get the board context
pub fn use_board_context() -> BoardContext {
    expect_context::<BoardContext>()
}
