//! Drag session lifecycle.
//!
//! ```text
//! Idle -> Armed -> Dragging -> Idle (Dropped | Cancelled)
//!           \-----------------> Idle (released before activation, or cancel)
//! ```
//!
//! A machine owns at most one session. A pointer-down while a session exists
//! is ignored, so two gestures can never both hold a capture.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::capture::DragLayout;
use crate::collision::{closest_center, Droppable};
use crate::geometry::{Point, Rect};
use crate::{DragConfig, DragError};

/// Gesture input from the pointer source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Explicit cancel (e.g. escape)
    Cancel,
}

/// Lifecycle state visible to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    Idle,
    Armed,
    Dragging,
}

/// Phase of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    /// Pointer is down but has not moved past the activation distance
    Armed,
    Dragging,
}

/// Why an event was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    NoScopeUnderPointer,
    NoItemUnderPointer,
    ThresholdNotReached,
}

/// Why a session ended without a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Pointer went up before the activation distance was exceeded (a click)
    ReleasedBeforeActivation,
    /// Released while no candidate intersected the dragged item
    NoDropTarget,
    /// Cancel signal from the gesture source
    Explicit,
}

/// Outcome of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect<S, Id> {
    Armed { scope: S, active: Id },
    Started { scope: S, active: Id, over: Option<Id> },
    Hovered { over: Option<Id> },
    Dropped { scope: S, active: Id, over: Id },
    Cancelled { reason: CancelReason },
    Noop { reason: NoopReason },
}

/// One gesture from pointer-down to pointer-up.
///
/// Carries a snapshot of the candidates taken at pointer-down, so later layout
/// changes never leak into a running drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession<S, Id> {
    scope: S,
    active: Id,
    active_rect: Rect,
    candidates: Vec<Droppable<Id>>,
    origin: Point,
    current: Point,
    phase: DragPhase,
    over: Option<Id>,
}

impl<S, Id> DragSession<S, Id> {
    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn active(&self) -> &Id {
        &self.active
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Currently hovered candidate
    pub fn over(&self) -> Option<&Id> {
        self.over.as_ref()
    }

    /// Box of the dragged item following the pointer
    pub fn dragged_rect(&self) -> Rect {
        self.active_rect.translated(
            self.current.x - self.origin.x,
            self.current.y - self.origin.y,
        )
    }
}

impl<S, Id: Clone> DragSession<S, Id> {
    fn resolve_over(&self) -> Option<Id> {
        closest_center(&self.dragged_rect(), &self.candidates).map(|c| c.id.clone())
    }
}

/// Drag lifecycle machine for one interaction surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragMachine<S, Id> {
    config: DragConfig,
    session: Option<DragSession<S, Id>>,
}

impl<S, Id> Default for DragMachine<S, Id> {
    fn default() -> Self {
        Self {
            config: DragConfig::default(),
            session: None,
        }
    }
}

impl<S, Id> DragMachine<S, Id>
where
    S: Clone + PartialEq + fmt::Debug,
    Id: Clone + PartialEq + fmt::Debug,
{
    pub fn new(config: DragConfig) -> Result<Self, DragError> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
        })
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn state(&self) -> DragState {
        match self.session.as_ref().map(|s| s.phase) {
            None => DragState::Idle,
            Some(DragPhase::Armed) => DragState::Armed,
            Some(DragPhase::Dragging) => DragState::Dragging,
        }
    }

    pub fn session(&self) -> Option<&DragSession<S, Id>> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Dispatch one pointer event
    pub fn apply(&mut self, layout: &DragLayout<S, Id>, event: PointerEvent) -> DragEffect<S, Id> {
        match event {
            PointerEvent::Down(at) => self.pointer_down(layout, at),
            PointerEvent::Move(at) => self.pointer_move(at),
            PointerEvent::Up(at) => self.pointer_up(at),
            PointerEvent::Cancel => self.cancel(),
        }
    }

    /// Record a pending drag on the item under the pointer
    pub fn pointer_down(&mut self, layout: &DragLayout<S, Id>, at: Point) -> DragEffect<S, Id> {
        if self.session.is_some() {
            return DragEffect::Noop {
                reason: NoopReason::ActiveDragAlreadyInProgress,
            };
        }
        let Some(scope) = layout.claim(at) else {
            return DragEffect::Noop {
                reason: NoopReason::NoScopeUnderPointer,
            };
        };
        let Some(item) = scope.item_at(at) else {
            return DragEffect::Noop {
                reason: NoopReason::NoItemUnderPointer,
            };
        };

        debug!(scope = ?scope.scope, active = ?item.id, "drag armed");
        self.session = Some(DragSession {
            scope: scope.scope.clone(),
            active: item.id.clone(),
            active_rect: item.rect,
            candidates: scope.items.clone(),
            origin: at,
            current: at,
            phase: DragPhase::Armed,
            over: None,
        });
        DragEffect::Armed {
            scope: scope.scope.clone(),
            active: item.id.clone(),
        }
    }

    /// Track the pointer; starts the drag once it moved far enough
    pub fn pointer_move(&mut self, at: Point) -> DragEffect<S, Id> {
        let threshold = self.config.activation_distance;
        let Some(session) = self.session.as_mut() else {
            return DragEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            };
        };
        session.current = at;

        match session.phase {
            DragPhase::Armed => {
                if session.origin.distance_to(at) <= threshold {
                    return DragEffect::Noop {
                        reason: NoopReason::ThresholdNotReached,
                    };
                }
                session.phase = DragPhase::Dragging;
                session.over = session.resolve_over();
                debug!(active = ?session.active, over = ?session.over, "drag started");
                DragEffect::Started {
                    scope: session.scope.clone(),
                    active: session.active.clone(),
                    over: session.over.clone(),
                }
            }
            DragPhase::Dragging => {
                session.over = session.resolve_over();
                trace!(x = at.x, y = at.y, over = ?session.over, "drag moved");
                DragEffect::Hovered {
                    over: session.over.clone(),
                }
            }
        }
    }

    /// End the gesture: drop on the hovered candidate or cancel
    pub fn pointer_up(&mut self, at: Point) -> DragEffect<S, Id> {
        let Some(mut session) = self.session.take() else {
            return DragEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            };
        };
        session.current = at;

        if session.phase == DragPhase::Armed {
            debug!(active = ?session.active, "released before activation");
            return DragEffect::Cancelled {
                reason: CancelReason::ReleasedBeforeActivation,
            };
        }

        match session.resolve_over() {
            Some(over) => {
                debug!(active = ?session.active, over = ?over, "dropped");
                DragEffect::Dropped {
                    scope: session.scope,
                    active: session.active,
                    over,
                }
            }
            None => {
                debug!(active = ?session.active, "released without a drop target");
                DragEffect::Cancelled {
                    reason: CancelReason::NoDropTarget,
                }
            }
        }
    }

    /// Abort the running session, if any
    pub fn cancel(&mut self) -> DragEffect<S, Id> {
        match self.session.take() {
            Some(session) => {
                debug!(active = ?session.active, "drag cancelled");
                DragEffect::Cancelled {
                    reason: CancelReason::Explicit,
                }
            }
            None => DragEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ScopeLayout;

    type Machine = DragMachine<&'static str, &'static str>;

    fn list() -> DragLayout<&'static str, &'static str> {
        DragLayout::new().with_scope(
            ScopeLayout::new("list", 0, Rect::new(0.0, 0.0, 200.0, 120.0))
                .with_item("a", Rect::new(0.0, 0.0, 200.0, 40.0))
                .with_item("b", Rect::new(0.0, 40.0, 200.0, 40.0))
                .with_item("c", Rect::new(0.0, 80.0, 200.0, 40.0)),
        )
    }

    #[test]
    fn test_full_drag_lifecycle() {
        let layout = list();
        let mut machine = Machine::default();

        let effect = machine.pointer_down(&layout, Point::new(10.0, 10.0));
        assert_eq!(effect, DragEffect::Armed { scope: "list", active: "a" });
        assert_eq!(machine.state(), DragState::Armed);

        let effect = machine.pointer_move(Point::new(10.0, 50.0));
        assert!(matches!(effect, DragEffect::Started { active: "a", .. }));
        assert_eq!(machine.state(), DragState::Dragging);

        // Dragged box now spans 80..120, right on top of "c"
        let effect = machine.pointer_move(Point::new(10.0, 90.0));
        assert_eq!(effect, DragEffect::Hovered { over: Some("c") });

        let effect = machine.pointer_up(Point::new(10.0, 90.0));
        assert_eq!(effect, DragEffect::Dropped { scope: "list", active: "a", over: "c" });
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn test_click_never_becomes_drag() {
        let layout = list();
        let mut machine = Machine::default();

        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        let effect = machine.pointer_move(Point::new(14.0, 14.0));
        assert_eq!(effect, DragEffect::Noop { reason: NoopReason::ThresholdNotReached });

        let effect = machine.pointer_up(Point::new(14.0, 14.0));
        assert_eq!(
            effect,
            DragEffect::Cancelled { reason: CancelReason::ReleasedBeforeActivation }
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn test_exactly_threshold_does_not_activate() {
        let layout = list();
        let mut machine = Machine::default();
        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        let effect = machine.pointer_move(Point::new(18.0, 10.0));
        assert_eq!(effect, DragEffect::Noop { reason: NoopReason::ThresholdNotReached });
        let effect = machine.pointer_move(Point::new(18.5, 10.0));
        assert!(matches!(effect, DragEffect::Started { .. }));
    }

    #[test]
    fn test_release_far_away_cancels() {
        let layout = list();
        let mut machine = Machine::default();
        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        machine.pointer_move(Point::new(10.0, 30.0));
        let effect = machine.pointer_up(Point::new(900.0, 900.0));
        assert_eq!(effect, DragEffect::Cancelled { reason: CancelReason::NoDropTarget });
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn test_explicit_cancel() {
        let layout = list();
        let mut machine = Machine::default();
        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        machine.pointer_move(Point::new(10.0, 60.0));
        assert_eq!(
            machine.apply(&layout, PointerEvent::Cancel),
            DragEffect::Cancelled { reason: CancelReason::Explicit }
        );
        assert_eq!(
            machine.pointer_up(Point::new(10.0, 60.0)),
            DragEffect::Noop { reason: NoopReason::IdleWithoutActiveDrag }
        );
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let layout = list();
        let mut machine = Machine::default();
        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        let effect = machine.pointer_down(&layout, Point::new(10.0, 90.0));
        assert_eq!(
            effect,
            DragEffect::Noop { reason: NoopReason::ActiveDragAlreadyInProgress }
        );
        assert_eq!(machine.session().map(|s| *s.active()), Some("a"));
    }

    #[test]
    fn test_pointer_down_outside_any_item() {
        let layout = list();
        let mut machine = Machine::default();
        assert_eq!(
            machine.pointer_down(&layout, Point::new(500.0, 10.0)),
            DragEffect::Noop { reason: NoopReason::NoScopeUnderPointer }
        );
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn test_zero_distance_starts_on_first_move() {
        let layout = list();
        let mut machine = Machine::new(DragConfig::new(0.0).unwrap()).unwrap();
        machine.pointer_down(&layout, Point::new(10.0, 10.0));
        assert!(matches!(
            machine.pointer_move(Point::new(10.0, 10.5)),
            DragEffect::Started { over: Some("a"), .. }
        ));
    }
}
