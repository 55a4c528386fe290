//! Listener scopes
//!
//! Every listener and timer a component acquires while connecting lives in
//! the scope of that connection. The page drops the scope on disconnection,
//! whatever removed the node.

use agentui_dom::NodeId;
use std::time::Duration;

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    /// The component's own element
    Host,
    /// The document node
    Document,
}

/// Timer handle, unique within a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Listener {
    target: ListenerTarget,
    event_type: String,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    period: Duration,
    elapsed: Duration,
}

/// Resources acquired during one connection
#[derive(Debug)]
pub struct ListenerScope {
    host: NodeId,
    listeners: Vec<Listener>,
    timers: Vec<Timer>,
    next_timer: u32,
}

impl ListenerScope {
    pub(crate) fn new(host: NodeId) -> Self {
        Self {
            host,
            listeners: Vec::new(),
            timers: Vec::new(),
            next_timer: 0,
        }
    }

    /// Listen for `event_type` on the host element or the document
    pub fn add_event_listener(&mut self, target: ListenerTarget, event_type: &str) {
        self.listeners.push(Listener {
            target,
            event_type: event_type.to_string(),
        });
    }

    /// Fire every `period` of page time
    pub fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            id,
            period,
            elapsed: Duration::ZERO,
        });
        id
    }

    pub fn clear_interval(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Nodes the scope listens on for `event_type`
    pub(crate) fn listening_nodes<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        let host = self.host;
        self.listeners
            .iter()
            .filter(move |l| l.event_type == event_type)
            .map(move |l| match l.target {
                ListenerTarget::Host => host,
                ListenerTarget::Document => NodeId::ROOT,
            })
    }

    /// Advance timers, returning the ids that fired (one entry per firing)
    pub(crate) fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if timer.period.is_zero() {
                continue;
            }
            timer.elapsed += delta;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                fired.push(timer.id);
            }
        }
        fired
    }
}
