use std::collections::VecDeque;

use crate::config::ScenarioConfig;
use crate::{Event, Stats};

/// The pool of interchangeable agent slots.
///
/// Works like a counting semaphore with a FIFO wait queue: an arriving call
/// takes a free slot immediately or joins the back of the queue; a completing
/// call releases its slot to the head of the queue. Grant order therefore
/// preserves arrival order.
///
/// All run statistics live here. Queue length and busy count are integrated
/// over time (updated at every event, clipped to `[0, horizon]`), so the
/// derived averages are time averages over the horizon and utilization can
/// never leave `[0, 1]`.
pub struct AgentPool {
    capacity: usize,
    horizon: f64,
    trace: bool,
    busy: usize,
    waiting: VecDeque<(usize, f64)>, // call ID, arrival time
    last_t: f64,
    arrivals: usize,
    answered: usize,
    completed: usize,
    completed_by_horizon: usize,
    total_wait_time: f64,
    queue_area: f64,
    busy_area: f64,
}

impl AgentPool {
    pub fn new(config: &ScenarioConfig) -> AgentPool {
        AgentPool {
            capacity: config.agents,
            horizon: config.horizon,
            trace: config.trace,
            busy: 0,
            waiting: VecDeque::new(),
            last_t: 0.0,
            arrivals: 0,
            answered: 0,
            completed: 0,
            completed_by_horizon: 0,
            total_wait_time: 0.0,
            queue_area: 0.0,
            busy_area: 0.0,
        }
    }

    // Accumulate the queue-length and busy-count integrals over
    // [last_t, now], clipped to the horizon. Must run before any counts
    // change for the event at `now`.
    fn advance_to(&mut self, now: f64) {
        let dt = now.min(self.horizon) - self.last_t.min(self.horizon);
        if dt > 0.0 {
            self.queue_area += self.waiting.len() as f64 * dt;
            self.busy_area += self.busy as f64 * dt;
        }
        self.last_t = now;
    }

    // Hand a slot to a call and record its wait.
    fn grant(&mut self, now: f64, call: usize, arrived_at: f64) -> (f64, Event) {
        self.busy += 1;
        self.answered += 1;
        self.total_wait_time += now - arrived_at;
        if self.trace {
            println!(
                "[{:>7.2}] Caller {} answered (waited {:.2} min)",
                now,
                call,
                now - arrived_at
            );
        }
        (now, Event::CallAnswered { call, arrived_at })
    }
}

impl des::Agent<Event, Stats> for AgentPool {
    fn act(&mut self, now: f64, data: &Event) -> des::Response<Event> {
        match data {
            Event::CallArrived { call } => {
                self.advance_to(now);
                self.arrivals += 1;
                if self.busy < self.capacity {
                    let answered = self.grant(now, *call, now);
                    des::Response::events(vec![answered])
                } else {
                    self.waiting.push_back((*call, now));
                    if self.trace {
                        println!(
                            "[{:>7.2}] Caller {} waits ({} in queue)",
                            now,
                            call,
                            self.waiting.len()
                        );
                    }
                    des::Response::new()
                }
            }
            Event::CallCompleted { call } => {
                self.advance_to(now);
                self.busy -= 1;
                self.completed += 1;
                if now <= self.horizon {
                    self.completed_by_horizon += 1;
                }
                if self.trace {
                    println!("[{:>7.2}] Caller {} hangs up", now, call);
                }
                if let Some((next, arrived_at)) = self.waiting.pop_front() {
                    let answered = self.grant(now, next, arrived_at);
                    des::Response::events(vec![answered])
                } else {
                    des::Response::new()
                }
            }
            _ => des::Response::new(),
        }
    }

    fn stats(&self) -> Stats {
        Stats::Pool(PoolStats {
            capacity: self.capacity,
            horizon: self.horizon,
            arrivals: self.arrivals,
            answered: self.answered,
            completed: self.completed,
            completed_by_horizon: self.completed_by_horizon,
            current_busy: self.busy,
            current_queue_length: self.waiting.len(),
            total_wait_time: self.total_wait_time,
            queue_area: self.queue_area,
            busy_area: self.busy_area,
        })
    }
}

/// Statistics reported by the agent pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolStats {
    pub capacity: usize,
    pub horizon: f64,
    /// Calls that entered the system
    pub arrivals: usize,
    /// Calls granted an agent slot
    pub answered: usize,
    /// Calls that finished service, drained past the horizon included
    pub completed: usize,
    /// Calls that finished service at or before the horizon
    pub completed_by_horizon: usize,
    pub current_busy: usize,
    pub current_queue_length: usize,
    /// Sum of (service start - arrival) over answered calls
    pub total_wait_time: f64,
    /// Integral of queue length over [0, horizon]
    pub queue_area: f64,
    /// Integral of busy slot count over [0, horizon]
    pub busy_area: f64,
}

impl PoolStats {
    /// Mean wait over answered calls; `None` before any call was answered.
    pub fn avg_wait_time(&self) -> Option<f64> {
        if self.answered == 0 {
            return None;
        }
        Some(self.total_wait_time / self.answered as f64)
    }

    /// Time-averaged number of waiting calls over the horizon.
    pub fn avg_queue_length(&self) -> f64 {
        self.queue_area / self.horizon
    }

    /// Calls completed per simulated minute, within the horizon.
    pub fn throughput(&self) -> f64 {
        self.completed_by_horizon as f64 / self.horizon
    }

    /// Fraction of total agent-time spent serving calls.
    pub fn utilization(&self) -> f64 {
        self.busy_area / (self.capacity as f64 * self.horizon)
    }

    /// Calls still waiting or in service when the horizon elapsed.
    pub fn in_flight_at_horizon(&self) -> usize {
        self.arrivals - self.completed_by_horizon
    }

    pub fn is_at_capacity(&self) -> bool {
        self.current_busy == self.capacity
    }

    pub fn has_queue(&self) -> bool {
        self.current_queue_length > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use des::Agent;

    fn pool(agents: usize, horizon: f64) -> AgentPool {
        let config = ScenarioConfig {
            agents,
            horizon,
            ..ScenarioConfig::scenario_a()
        };
        AgentPool::new(&config)
    }

    fn pool_stats(pool: &AgentPool) -> PoolStats {
        match pool.stats() {
            Stats::Pool(stats) => stats,
            _ => panic!("expected pool stats"),
        }
    }

    #[test]
    fn queue_and_busy_integrals_accumulate_between_events() {
        let mut p = pool(1, 10.0);

        // Caller 0 answered at t=0, caller 1 queues at t=2, caller 0 hangs
        // up at t=5 (caller 1 answered), caller 1 hangs up at t=9.
        p.act(0.0, &Event::CallArrived { call: 0 });
        p.act(2.0, &Event::CallArrived { call: 1 });
        p.act(5.0, &Event::CallCompleted { call: 0 });
        p.act(9.0, &Event::CallCompleted { call: 1 });

        let stats = pool_stats(&p);
        assert_eq!(stats.queue_area, 3.0); // one waiter over [2, 5]
        assert_eq!(stats.busy_area, 9.0); // busy over [0, 9]
        assert_eq!(stats.avg_queue_length(), 0.3);
        assert_eq!(stats.utilization(), 0.9);
        assert_eq!(stats.total_wait_time, 3.0);
        assert_eq!(stats.avg_wait_time(), Some(1.5));
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.completed_by_horizon, 2);
        assert_eq!(stats.throughput(), 0.2);
    }

    #[test]
    fn integrals_are_clipped_at_the_horizon() {
        let mut p = pool(1, 10.0);

        // Service runs past the horizon; only the [0, 10] part counts.
        p.act(0.0, &Event::CallArrived { call: 0 });
        p.act(12.0, &Event::CallCompleted { call: 0 });

        let stats = pool_stats(&p);
        assert_eq!(stats.busy_area, 10.0);
        assert_eq!(stats.utilization(), 1.0);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completed_by_horizon, 0);
        assert_eq!(stats.in_flight_at_horizon(), 1);
    }

    #[test]
    fn free_slot_means_zero_wait() {
        let mut p = pool(2, 100.0);

        let response = p.act(4.0, &Event::CallArrived { call: 0 });
        assert_eq!(response.events.len(), 1);
        match &response.events[0] {
            (t, Event::CallAnswered { call, arrived_at }) => {
                assert_eq!(*t, 4.0);
                assert_eq!(*call, 0);
                assert_eq!(*arrived_at, 4.0);
            }
            _ => panic!("expected CallAnswered"),
        }

        let stats = pool_stats(&p);
        assert_eq!(stats.total_wait_time, 0.0);
        assert!(!stats.is_at_capacity());
    }

    #[test]
    fn grants_follow_arrival_order() {
        let mut p = pool(1, 100.0);

        p.act(1.0, &Event::CallArrived { call: 0 });
        p.act(2.0, &Event::CallArrived { call: 1 });
        p.act(3.0, &Event::CallArrived { call: 2 });

        let stats = pool_stats(&p);
        assert!(stats.is_at_capacity());
        assert!(stats.has_queue());
        assert_eq!(stats.current_queue_length, 2);

        let response = p.act(6.0, &Event::CallCompleted { call: 0 });
        match &response.events[0] {
            (_, Event::CallAnswered { call, arrived_at }) => {
                assert_eq!(*call, 1);
                assert_eq!(*arrived_at, 2.0);
            }
            _ => panic!("expected CallAnswered"),
        }

        let response = p.act(8.0, &Event::CallCompleted { call: 1 });
        match &response.events[0] {
            (_, Event::CallAnswered { call, .. }) => assert_eq!(*call, 2),
            _ => panic!("expected CallAnswered"),
        }

        // Waits: caller 1 from 2 to 6, caller 2 from 3 to 8.
        assert_eq!(pool_stats(&p).total_wait_time, 9.0);
    }

    #[test]
    fn avg_wait_is_none_before_any_answer() {
        let p = pool(1, 100.0);
        assert_eq!(pool_stats(&p).avg_wait_time(), None);
    }
}
