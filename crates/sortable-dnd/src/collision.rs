//! Drop target selection.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A sortable item that can be grabbed and dropped onto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable<Id> {
    pub id: Id,
    pub rect: Rect,
}

impl<Id> Droppable<Id> {
    pub fn new(id: Id, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Closest-center rule.
///
/// Among the candidates whose box intersects `dragged`, returns the one whose
/// center is nearest the center of `dragged`. Candidates are scanned in their
/// original order and only a strictly closer one replaces the current pick,
/// so ties go to the lower index.
pub fn closest_center<'a, Id>(
    dragged: &Rect,
    candidates: &'a [Droppable<Id>],
) -> Option<&'a Droppable<Id>> {
    let center = dragged.center();
    let mut best: Option<(&Droppable<Id>, f64)> = None;

    for candidate in candidates {
        if !candidate.rect.intersects(dragged) {
            continue;
        }
        let distance = candidate.rect.center().distance_to(center);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
