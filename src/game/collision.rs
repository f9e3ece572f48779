//! Self-collision rule
//!
//! A move collides when the new head lands on a body cell that is still
//! occupied once the move completes. The tail cell is released in the same
//! tick the head advances unless the snake is growing, so chasing the own
//! tail is legal while running into any other segment is not. The rule needs
//! no special cases for short bodies: a one-cell snake that does not grow
//! leaves nothing behind to hit, and a growing one keeps its tail occupied.

use std::collections::VecDeque;

use super::grid::Cell;

/// A detected self-collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// Cell the head tried to enter
    pub cell: Cell,
    /// Body length at the moment of impact
    pub length: usize,
}

/// Check the would-be head against the cells that stay occupied after the move
pub fn check_self_collision(
    body: &VecDeque<Cell>,
    new_head: Cell,
    tail_vacates: bool,
) -> Option<CollisionEvent> {
    let staying = if tail_vacates {
        body.len().saturating_sub(1)
    } else {
        body.len()
    };

    body.iter()
        .take(staying)
        .any(|segment| *segment == new_head)
        .then_some(CollisionEvent {
            cell: new_head,
            length: body.len(),
        })
}
