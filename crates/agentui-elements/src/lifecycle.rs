//! Render lifecycle
//!
//! ```text
//! Unattached ──connect──▶ Connected ──render──▶ Rendered ⇄ AttributeChanged
//!      Disconnected ◀──disconnect── (Connected | Rendered | AttributeChanged)
//! ```
//!
//! A disconnected instance may be connected again when its node is
//! reinserted; each connection gets its own listener scope.

/// Lifecycle state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unattached,
    Connected,
    Rendered,
    AttributeChanged,
    Disconnected,
}

impl LifecycleState {
    /// Whether the instance is currently in the document
    pub fn is_attached(self) -> bool {
        matches!(self, Self::Connected | Self::Rendered | Self::AttributeChanged)
    }
}

/// Lifecycle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connect,
    Render,
    AttributeChange,
    Disconnect,
}

/// Lifecycle error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Invalid lifecycle transition: {event:?} in state {from:?}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
}

/// Per-instance state machine
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: LifecycleState,
    connections: u32,
    renders: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Unattached,
            connections: 0,
            renders: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// How many times the instance has been connected
    pub fn connections(&self) -> u32 {
        self.connections
    }

    /// How many renders have completed
    pub fn renders(&self) -> u32 {
        self.renders
    }

    /// Apply an event, returning the new state
    pub fn transition(&mut self, event: LifecycleEvent) -> Result<LifecycleState, LifecycleError> {
        use LifecycleEvent::*;
        use LifecycleState::*;

        let next = match (self.state, event) {
            (Unattached | Disconnected, Connect) => Connected,
            (Connected | Rendered | AttributeChanged, Render) => Rendered,
            (Rendered, AttributeChange) => AttributeChanged,
            (Connected | Rendered | AttributeChanged, Disconnect) => Disconnected,
            (from, event) => return Err(LifecycleError::InvalidTransition { from, event }),
        };

        match event {
            Connect => self.connections += 1,
            Render => self.renders += 1,
            _ => {}
        }
        self.state = next;
        Ok(next)
    }
}
