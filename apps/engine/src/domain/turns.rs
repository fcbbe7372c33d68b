//! Circular turn order with a direction flag.
//!
//! Index arithmetic over an ordered `Vec` keeps advance, reverse and skip
//! O(1). Removal re-anchors the current index so `current()` stays valid.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Clockwise direction is positive (+1), counter-clockwise negative (-1).
    fn delta(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSequencer {
    order: Vec<PlayerId>,
    current: usize,
    direction: Direction,
}

impl TurnSequencer {
    /// Roster order, first player active, clockwise. `None` for an empty roster.
    pub fn new(order: Vec<PlayerId>) -> Option<Self> {
        if order.is_empty() {
            return None;
        }
        Some(Self {
            order,
            current: 0,
            direction: Direction::Clockwise,
        })
    }

    pub fn current(&self) -> &PlayerId {
        &self.order[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position_of(&self, id: &PlayerId) -> Option<usize> {
        self.order.iter().position(|p| p == id)
    }

    fn offset(&self, from: usize, steps: isize) -> usize {
        let len = self.order.len() as isize;
        (from as isize + steps).rem_euclid(len) as usize
    }

    /// Player who would act after `advance()`.
    pub fn peek_next(&self) -> &PlayerId {
        &self.order[self.offset(self.current, self.direction.delta())]
    }

    /// Move to the next player honoring direction.
    pub fn advance(&mut self) -> &PlayerId {
        self.current = self.offset(self.current, self.direction.delta());
        self.current()
    }

    /// Flip direction. The active player does not change.
    pub fn reverse(&mut self) -> Direction {
        self.direction = self.direction.flipped();
        self.direction
    }

    /// Pass over the next player.
    pub fn skip_next(&mut self) -> &PlayerId {
        self.current = self.offset(self.current, 2 * self.direction.delta());
        self.current()
    }

    /// Make `id` the active player. Returns false if it is not seated.
    pub fn set_current(&mut self, id: &PlayerId) -> bool {
        match self.position_of(id) {
            Some(idx) => {
                self.current = idx;
                true
            }
            None => false,
        }
    }

    /// Excise a player, preserving the relative order of the rest.
    ///
    /// If the removed player was active, the player who would have acted
    /// next in the current direction becomes active. The last remaining
    /// player cannot be removed.
    pub fn remove(&mut self, id: &PlayerId) -> bool {
        if self.order.len() <= 1 {
            return false;
        }
        let Some(idx) = self.position_of(id) else {
            return false;
        };
        self.order.remove(idx);
        let len = self.order.len();
        if idx < self.current {
            self.current -= 1;
        } else if idx == self.current {
            self.current = match self.direction {
                Direction::Clockwise => idx % len,
                Direction::CounterClockwise => (idx + len - 1) % len,
            };
        }
        true
    }
}
