//! Minimal discrete-event simulation kernel.
//!
//! A simulation is an [`EventLoop`] holding a min-heap of timestamped events
//! and a set of [`Agent`]s. The loop pops the earliest event, advances the
//! logical clock to its timestamp, and broadcasts it to every agent; agents
//! respond with further events to schedule. Each event handler runs to
//! completion before the next event is processed, so agents never need
//! locking.
//!
//! The clock is a continuous `f64`. Events with equal timestamps are
//! delivered in insertion order (a monotone sequence number breaks heap
//! ties), so runs are deterministic for a fixed set of seeded agents.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub mod parallel;

struct Event<T> {
    t: f64,
    seq: u64,
    data: T,
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.seq == other.seq
    }
}

impl<T> Eq for Event<T> {}

impl<T> Ord for Event<T> {
    // Reversed so the BinaryHeap behaves as a min-heap: earliest timestamp
    // first, insertion order on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Events an agent wants scheduled in response to the one it just saw.
pub struct Response<T> {
    pub events: Vec<(f64, T)>,
}

impl<T> Response<T> {
    pub fn new() -> Response<T> {
        Response { events: Vec::new() }
    }

    pub fn event(t: f64, data: T) -> Response<T> {
        Response {
            events: vec![(t, data)],
        }
    }

    pub fn events(events: Vec<(f64, T)>) -> Response<T> {
        Response { events }
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::new()
    }
}

/// A participant in the simulation.
///
/// `T` is the event alphabet shared by all agents; `S` is the statistics
/// snapshot the agent reports at the end of a run.
pub trait Agent<T, S> {
    fn act(&mut self, _now: f64, _data: &T) -> Response<T> {
        Response::new()
    }

    fn stats(&self) -> S;
}

pub struct EventLoop<T, S> {
    queue: BinaryHeap<Event<T>>,
    now: f64,
    next_seq: u64,
    agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> EventLoop<T, S> {
    pub fn new(events: Vec<(f64, T)>, agents: Vec<Box<dyn Agent<T, S>>>) -> EventLoop<T, S> {
        let mut event_loop = EventLoop {
            queue: BinaryHeap::new(),
            now: 0.0,
            next_seq: 0,
            agents,
        };
        for (t, data) in events {
            event_loop.schedule(t, data);
        }
        event_loop
    }

    /// Current simulated time.
    pub fn now(&self) -> f64 {
        self.now
    }

    // Timestamps below the current clock would break clock monotonicity;
    // clamp them to "immediately".
    fn schedule(&mut self, t: f64, data: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Event {
            t: t.max(self.now),
            seq,
            data,
        });
    }

    fn broadcast(&mut self) {
        if let Some(event) = self.queue.pop() {
            self.now = event.t;
            let mut scheduled = Vec::new();
            for agent in &mut self.agents {
                let response = agent.act(self.now, &event.data);
                scheduled.extend(response.events);
            }
            for (t, data) in scheduled {
                self.schedule(t, data);
            }
        }
    }

    /// Process events with timestamp at most `until`.
    ///
    /// Events scheduled past `until` stay queued; a later `run` or
    /// [`EventLoop::run_to_end`] picks them up.
    pub fn run(&mut self, until: f64) {
        while let Some(event) = self.queue.peek() {
            if event.t > until {
                break;
            }
            self.broadcast();
        }
    }

    /// Drain the queue completely, however far into the future it reaches.
    pub fn run_to_end(&mut self) {
        while self.queue.peek().is_some() {
            self.broadcast();
        }
    }

    /// Collect statistics from every agent, in registration order.
    pub fn stats(&self) -> Vec<S> {
        self.agents.iter().map(|agent| agent.stats()).collect()
    }
}
