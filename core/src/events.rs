// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed game events and the observer registry.
//!
//! This is the only channel by which external components (a GUI, an engine
//! adapter) learn that the game changed. Delivery is synchronous,
//! single-threaded and in registration order; nothing is consumed from the
//! listener. Listeners must not re-enter the game's mutating methods from
//! inside a callback - no reentrancy protection is provided.

use crate::{Color, Move, Pos};
use serde::{Deserialize, Serialize};

/// Events emitted after every successful state-changing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A move (placement, pass or resignation) was committed
    MoveMade {
        /// The move that was made
        mv: Move,
    },
    /// A group's dead/alive marking was toggled during scoring
    DeadStonesToggled {
        /// The point that was toggled
        pos: Pos,
    },
    /// A player confirmed the current dead-stone marking
    DeadStonesConfirmed {
        /// The player who confirmed
        player: Color,
    },
    /// The game was scored and is over
    GameFinished {
        /// Black's final score
        black_score: f32,
        /// White's final score
        white_score: f32,
        /// The winner, or `None` for a tie (jigo)
        winner: Option<Color>,
    },
}

/// A listener for game events.
///
/// Implemented for any `FnMut(&GameEvent)` closure, so GUIs can subscribe
/// without defining a type.
pub trait GameObserver {
    /// Called after each state-changing operation
    fn on_game_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> GameObserver for F {
    fn on_game_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Registry of game observers, notified in registration order
#[derive(Default)]
pub struct Observers {
    listeners: Vec<Box<dyn GameObserver>>,
}

impl Observers {
    /// Add a listener
    pub fn register(&mut self, listener: Box<dyn GameObserver>) {
        self.listeners.push(listener);
    }

    /// Drop all listeners
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Deliver `event` to every listener, in order
    pub fn notify(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener.on_game_event(event);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
