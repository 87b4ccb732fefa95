//! Capture scopes for nested sortable regions.
//!
//! Each sortable list registers a region and a nesting depth. On pointer-down
//! the deepest region containing the pointer claims the gesture; outer scopes
//! only see gestures that start outside every deeper region.

use serde::{Deserialize, Serialize};

use crate::collision::Droppable;
use crate::geometry::{Point, Rect};

/// One sortable list: its capture region and the items it orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeLayout<S, Id> {
    pub scope: S,
    /// Nesting depth, 0 = outermost
    pub depth: u16,
    pub region: Rect,
    pub items: Vec<Droppable<Id>>,
}

impl<S, Id> ScopeLayout<S, Id> {
    pub fn new(scope: S, depth: u16, region: Rect) -> Self {
        Self {
            scope,
            depth,
            region,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: Id, rect: Rect) -> Self {
        self.items.push(Droppable::new(id, rect));
        self
    }

    pub fn push_item(&mut self, id: Id, rect: Rect) {
        self.items.push(Droppable::new(id, rect));
    }

    /// Item under the pointer, first registered wins on overlap
    pub fn item_at(&self, point: Point) -> Option<&Droppable<Id>> {
        self.items.iter().find(|item| item.rect.contains(point))
    }
}

/// Every sortable scope on screen at the moment a gesture starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragLayout<S, Id> {
    scopes: Vec<ScopeLayout<S, Id>>,
}

impl<S, Id> Default for DragLayout<S, Id> {
    fn default() -> Self {
        Self { scopes: Vec::new() }
    }
}

impl<S: PartialEq, Id> DragLayout<S, Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: ScopeLayout<S, Id>) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn push_scope(&mut self, scope: ScopeLayout<S, Id>) {
        self.scopes.push(scope);
    }

    pub fn scopes(&self) -> &[ScopeLayout<S, Id>] {
        &self.scopes
    }

    pub fn scope(&self, scope: &S) -> Option<&ScopeLayout<S, Id>> {
        self.scopes.iter().find(|s| &s.scope == scope)
    }

    /// Scope that owns a gesture starting at `point`.
    ///
    /// Deepest containing region wins; at equal depth the first registered wins.
    pub fn claim(&self, point: Point) -> Option<&ScopeLayout<S, Id>> {
        let mut claimed: Option<&ScopeLayout<S, Id>> = None;
        for scope in &self.scopes {
            if !scope.region.contains(point) {
                continue;
            }
            match claimed {
                Some(current) if scope.depth <= current.depth => {}
                _ => claimed = Some(scope),
            }
        }
        claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Scope {
        Outer,
        Inner,
    }

    fn nested() -> DragLayout<Scope, u32> {
        DragLayout::new()
            .with_scope(
                ScopeLayout::new(Scope::Outer, 0, Rect::new(0.0, 0.0, 100.0, 200.0))
                    .with_item(1, Rect::new(0.0, 0.0, 100.0, 200.0)),
            )
            .with_scope(
                ScopeLayout::new(Scope::Inner, 1, Rect::new(0.0, 40.0, 100.0, 80.0))
                    .with_item(10, Rect::new(0.0, 40.0, 100.0, 40.0))
                    .with_item(11, Rect::new(0.0, 80.0, 100.0, 40.0)),
            )
    }

    #[test]
    fn test_inner_scope_claims_first() {
        let layout = nested();
        let claimed = layout.claim(Point::new(10.0, 90.0)).unwrap();
        assert_eq!(claimed.scope, Scope::Inner);
        assert_eq!(claimed.item_at(Point::new(10.0, 90.0)).map(|d| d.id), Some(11));
    }

    #[test]
    fn test_outer_scope_outside_inner_region() {
        let layout = nested();
        let claimed = layout.claim(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(claimed.scope, Scope::Outer);
    }

    #[test]
    fn test_registration_order_does_not_matter() {
        let mut scopes = nested().scopes().to_vec();
        scopes.reverse();
        let mut layout = DragLayout::new();
        for scope in scopes {
            layout.push_scope(scope);
        }
        assert_eq!(layout.claim(Point::new(10.0, 50.0)).unwrap().scope, Scope::Inner);
    }

    #[test]
    fn test_nothing_claimed_outside() {
        assert!(nested().claim(Point::new(500.0, 500.0)).is_none());
    }
}
