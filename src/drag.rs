//! Board Drag Coordination
//!
//! Binds the generic drag machine to the board: the section list is the outer
//! sortable scope, each expanded section's task list is a nested scope. A drop
//! becomes exactly one reorder command against a `SectionStore` snapshot.

use serde::{Deserialize, Serialize};
use sortable_dnd::{DragEffect, DragLayout, DragMachine, DragState, Point, PointerEvent, Rect, ScopeLayout};
use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::domain::{SectionId, TaskId};
use crate::error::{BoardError, BoardResult};
use crate::sections::SectionStore;
use crate::tree::{flatten_board, BoardRow};

/// Sortable list a gesture belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardScope {
    Sections,
    Tasks(SectionId),
}

/// Draggable thing on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardItem {
    Section(SectionId),
    Task(TaskId),
}

pub type BoardDragLayout = DragLayout<BoardScope, BoardItem>;
pub type BoardDragEffect = DragEffect<BoardScope, BoardItem>;

#[derive(Debug, Clone, PartialEq)]
struct TaskListRects {
    section: SectionId,
    region: Rect,
    tasks: Vec<(TaskId, Rect)>,
}

/// Rectangles reported by the renderer for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    board: Rect,
    sections: Vec<(SectionId, Rect)>,
    task_lists: Vec<TaskListRects>,
}

impl BoardLayout {
    pub fn new(board: Rect) -> Self {
        Self {
            board,
            sections: Vec::new(),
            task_lists: Vec::new(),
        }
    }

    pub fn section(mut self, id: SectionId, rect: Rect) -> Self {
        self.sections.push((id, rect));
        self
    }

    /// Register the region holding a section's task rows
    pub fn task_list(mut self, section: SectionId, region: Rect) -> Self {
        self.task_lists.push(TaskListRects {
            section,
            region,
            tasks: Vec::new(),
        });
        self
    }

    /// Register one task row; its task list must be registered first
    pub fn task(mut self, section: &SectionId, task: TaskId, rect: Rect) -> Self {
        match self.task_lists.iter_mut().find(|list| &list.section == section) {
            Some(list) => list.tasks.push((task, rect)),
            None => debug!(section_id = %section, task_id = %task, "task rect without task list ignored"),
        }
        self
    }

    /// Resolve against the current snapshot.
    ///
    /// Rects for ids the snapshot no longer has are dropped, and collapsed
    /// sections get no task scope.
    pub fn build(&self, store: &SectionStore) -> BoardDragLayout {
        let mut sections = ScopeLayout::new(BoardScope::Sections, 0, self.board);
        for (id, rect) in &self.sections {
            if store.section(id).is_some() {
                sections.push_item(BoardItem::Section(id.clone()), *rect);
            }
        }
        let mut layout = DragLayout::new().with_scope(sections);

        for list in &self.task_lists {
            let Some(section) = store.section(&list.section) else {
                continue;
            };
            if !section.expanded {
                continue;
            }
            let mut scope = ScopeLayout::new(BoardScope::Tasks(section.id.clone()), 1, list.region);
            for (task, rect) in &list.tasks {
                if section.tasks.contains(task) {
                    scope.push_item(BoardItem::Task(task.clone()), *rect);
                }
            }
            layout.push_scope(scope);
        }
        layout
    }
}

/// Layout for a plain vertical list of equal-height rows, as produced by
/// `flatten_board`. Each section's box spans its header and visible tasks.
pub fn stacked_layout(store: &SectionStore, origin: Point, width: f64, row_height: f64) -> BoardLayout {
    let rows = flatten_board(store);
    let row_rect = |index: usize| Rect::new(origin.x, origin.y + index as f64 * row_height, width, row_height);
    let total = Rect::new(origin.x, origin.y, width, rows.len() as f64 * row_height);

    let mut layout = BoardLayout::new(total);
    let mut index = 0;
    while index < rows.len() {
        let BoardRow::Section(section) = &rows[index] else {
            index += 1;
            continue;
        };
        let start = index;
        index += 1;
        let mut tasks = Vec::new();
        while let Some(BoardRow::Task { task, .. }) = rows.get(index) {
            tasks.push((task.id.clone(), row_rect(index)));
            index += 1;
        }

        let block = Rect::new(
            origin.x,
            row_rect(start).y,
            width,
            (index - start) as f64 * row_height,
        );
        layout = layout.section(section.id.clone(), block);
        if !tasks.is_empty() {
            let region = Rect::new(
                origin.x,
                row_rect(start + 1).y,
                width,
                tasks.len() as f64 * row_height,
            );
            layout = layout.task_list(section.id.clone(), region);
            for (task, rect) in tasks {
                layout = layout.task(&section.id, task, rect);
            }
        }
    }
    layout
}

/// The single mutation a drop produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DragCommand {
    ReorderSections {
        active: SectionId,
        over: SectionId,
    },
    ReorderTasks {
        section: SectionId,
        active: TaskId,
        over: TaskId,
    },
}

impl DragCommand {
    /// Command for a `Dropped` effect; `None` for every other effect
    pub fn from_effect(effect: &BoardDragEffect) -> Option<Self> {
        let DragEffect::Dropped { scope, active, over } = effect else {
            return None;
        };
        match (scope, active, over) {
            (BoardScope::Sections, BoardItem::Section(active), BoardItem::Section(over)) => {
                Some(DragCommand::ReorderSections {
                    active: active.clone(),
                    over: over.clone(),
                })
            }
            (BoardScope::Tasks(section), BoardItem::Task(active), BoardItem::Task(over)) => {
                Some(DragCommand::ReorderTasks {
                    section: section.clone(),
                    active: active.clone(),
                    over: over.clone(),
                })
            }
            _ => {
                warn!(?scope, ?active, ?over, "drop mixes items from different scopes");
                None
            }
        }
    }

    pub fn apply(&self, store: &SectionStore) -> BoardResult<SectionStore> {
        match self {
            DragCommand::ReorderSections { active, over } => store.reorder_sections(active, over),
            DragCommand::ReorderTasks {
                section,
                active,
                over,
            } => store.reorder_tasks(section, active, over),
        }
    }
}

/// Result of feeding one pointer event to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub effect: BoardDragEffect,
    pub command: Option<DragCommand>,
}

/// Owns the one drag session of a board surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardDragCoordinator {
    machine: DragMachine<BoardScope, BoardItem>,
}

impl BoardDragCoordinator {
    pub fn new(config: &BoardConfig) -> BoardResult<Self> {
        let machine = DragMachine::new(config.drag_config()?)
            .map_err(|e| BoardError::invalid_config(e.to_string()))?;
        Ok(Self { machine })
    }

    pub fn state(&self) -> DragState {
        self.machine.state()
    }

    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    /// Active item and hovered candidate of the running drag, for rendering
    pub fn preview(&self) -> Option<(&BoardItem, Option<&BoardItem>)> {
        self.machine.session().map(|s| (s.active(), s.over()))
    }

    /// Feed one pointer event. `layout` is only consulted on pointer-down.
    pub fn handle(&mut self, layout: &BoardDragLayout, event: PointerEvent) -> DragOutcome {
        let effect = self.machine.apply(layout, event);
        let command = DragCommand::from_effect(&effect);
        if let Some(command) = &command {
            debug!(?command, "drop resolved");
        }
        DragOutcome { effect, command }
    }

    pub fn cancel(&mut self) -> BoardDragEffect {
        self.machine.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SequentialIds;
    use sortable_dnd::{CancelReason, NoopReason};

    const ROW: f64 = 40.0;

    /// s1 [t1, t2], s2 [t3]; rows: s1 0..40, t1 40..80, t2 80..120, s2 120..160, t3 160..200
    fn store() -> SectionStore {
        let sections = SequentialIds::new("s");
        let tasks = SequentialIds::new("t");
        SectionStore::default()
            .add_section(&sections, "Work")
            .add_section(&sections, "Home")
            .add_task(&tasks, &"s1".into(), "one")
            .and_then(|s| s.add_task(&tasks, &"s1".into(), "two"))
            .and_then(|s| s.add_task(&tasks, &"s2".into(), "three"))
            .unwrap()
    }

    fn layout(store: &SectionStore) -> BoardDragLayout {
        stacked_layout(store, Point::new(0.0, 0.0), 300.0, ROW).build(store)
    }

    fn drag(
        coordinator: &mut BoardDragCoordinator,
        layout: &BoardDragLayout,
        from: Point,
        to: Point,
    ) -> DragOutcome {
        coordinator.handle(layout, PointerEvent::Down(from));
        coordinator.handle(layout, PointerEvent::Move(to));
        coordinator.handle(layout, PointerEvent::Up(to))
    }

    #[test]
    fn test_stacked_layout_scopes() {
        let store = store();
        let layout = layout(&store);
        assert_eq!(layout.scopes().len(), 3);

        let sections = layout.scope(&BoardScope::Sections).unwrap();
        assert_eq!(sections.items[0].rect, Rect::new(0.0, 0.0, 300.0, 120.0));
        assert_eq!(sections.items[1].rect, Rect::new(0.0, 120.0, 300.0, 80.0));

        let s1 = layout.scope(&BoardScope::Tasks("s1".into())).unwrap();
        assert_eq!(s1.region, Rect::new(0.0, 40.0, 300.0, 80.0));
        assert_eq!(s1.items.len(), 2);
    }

    #[test]
    fn test_task_drag_reorders_tasks() {
        let store = store();
        let layout = layout(&store);
        let mut coordinator = BoardDragCoordinator::default();

        let outcome = drag(&mut coordinator, &layout, Point::new(10.0, 50.0), Point::new(10.0, 95.0));
        let command = outcome.command.unwrap();
        assert_eq!(
            command,
            DragCommand::ReorderTasks {
                section: "s1".into(),
                active: "t1".into(),
                over: "t2".into(),
            }
        );
        let next = command.apply(&store).unwrap();
        let order: Vec<_> = next
            .section(&"s1".into())
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(order, ["t2", "t1"]);
        assert_eq!(coordinator.state(), DragState::Idle);
    }

    #[test]
    fn test_section_drag_reorders_sections() {
        let store = store();
        let layout = layout(&store);
        let mut coordinator = BoardDragCoordinator::default();

        let outcome = drag(&mut coordinator, &layout, Point::new(10.0, 130.0), Point::new(10.0, 20.0));
        assert_eq!(
            outcome.command,
            Some(DragCommand::ReorderSections {
                active: "s2".into(),
                over: "s1".into(),
            })
        );
    }

    #[test]
    fn test_task_drag_never_reorders_sections() {
        let store = store();
        let layout = layout(&store);
        let mut coordinator = BoardDragCoordinator::default();

        // Dragged past its own list into s2: no sibling under it, nothing moves
        let outcome = drag(&mut coordinator, &layout, Point::new(10.0, 50.0), Point::new(10.0, 170.0));
        assert_eq!(
            outcome.effect,
            DragEffect::Cancelled {
                reason: CancelReason::NoDropTarget
            }
        );
        assert!(outcome.command.is_none());
    }

    #[test]
    fn test_click_produces_no_command() {
        let store = store();
        let layout = layout(&store);
        let mut coordinator = BoardDragCoordinator::default();

        let outcome = drag(&mut coordinator, &layout, Point::new(10.0, 50.0), Point::new(15.0, 53.0));
        assert_eq!(
            outcome.effect,
            DragEffect::Cancelled {
                reason: CancelReason::ReleasedBeforeActivation
            }
        );
        assert!(outcome.command.is_none());
    }

    #[test]
    fn test_one_session_at_a_time() {
        let store = store();
        let layout = layout(&store);
        let mut coordinator = BoardDragCoordinator::default();

        coordinator.handle(&layout, PointerEvent::Down(Point::new(10.0, 50.0)));
        let second = coordinator.handle(&layout, PointerEvent::Down(Point::new(10.0, 130.0)));
        assert_eq!(
            second.effect,
            DragEffect::Noop {
                reason: NoopReason::ActiveDragAlreadyInProgress
            }
        );
        assert_eq!(
            coordinator.preview(),
            Some((&BoardItem::Task("t1".into()), None))
        );
        assert_eq!(
            coordinator.cancel(),
            DragEffect::Cancelled {
                reason: CancelReason::Explicit
            }
        );
        assert!(!coordinator.is_active());
    }

    #[test]
    fn test_collapsed_section_has_no_task_scope() {
        let store = store().toggle_expanded(&"s1".into());
        let stacked = stacked_layout(&store, Point::new(0.0, 0.0), 300.0, ROW);
        let layout = stacked.build(&store);
        assert!(layout.scope(&BoardScope::Tasks("s1".into())).is_none());
        assert!(layout.scope(&BoardScope::Tasks("s2".into())).is_some());

        // Renderer-supplied rects for a collapsed section are refused too
        let manual = BoardLayout::new(Rect::new(0.0, 0.0, 300.0, 400.0))
            .task_list("s1".into(), Rect::new(0.0, 40.0, 300.0, 80.0))
            .task(&"s1".into(), "t1".into(), Rect::new(0.0, 40.0, 300.0, 40.0))
            .build(&store);
        assert!(manual.scope(&BoardScope::Tasks("s1".into())).is_none());
    }

    #[test]
    fn test_stale_rects_are_dropped() {
        let store = store();
        let layout = BoardLayout::new(Rect::new(0.0, 0.0, 300.0, 200.0))
            .section("s1".into(), Rect::new(0.0, 0.0, 300.0, 100.0))
            .section("gone".into(), Rect::new(0.0, 100.0, 300.0, 100.0))
            .build(&store);
        let sections = layout.scope(&BoardScope::Sections).unwrap();
        assert_eq!(sections.items.len(), 1);
    }

    #[test]
    fn test_command_on_stale_snapshot_reports_not_found() {
        let store = store();
        let command = DragCommand::ReorderSections {
            active: "s1".into(),
            over: "s2".into(),
        };
        let shrunk = store.delete_section(&"s2".into());
        assert_eq!(command.apply(&shrunk), Err(BoardError::not_found("s2")));
    }

    #[test]
    fn test_invalid_activation_distance() {
        let config = BoardConfig {
            activation_distance: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            BoardDragCoordinator::new(&config),
            Err(BoardError::InvalidConfig { .. })
        ));
    }
}
