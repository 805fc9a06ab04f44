use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Notification raised by the engine during a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    /// Food was eaten; `score` is the new total.
    AppleEaten { score: u32 },
    /// The round ended. Raised once per engine.
    GameOver { reason: DeathReason, score: u32 },
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The round was already over; nothing changed.
    Idle,
    Moved,
    AteFood,
    GameOver(DeathReason),
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Subscribers notified synchronously from inside a tick.
///
/// Listeners only see the event, never the engine, so they cannot call back
/// into it while a tick is in progress.
#[derive(Default)]
pub struct EventListeners {
    listeners: Vec<Listener>,
}

impl EventListeners {
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Delivers `event` to every listener in subscription order.
    pub fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
