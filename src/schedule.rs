use std::time::Duration;

/// Deferred work the controller asks to run after a feedback pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Move to the next word after a correct guess
    AdvanceWord,
    /// Put every letter back into the pool after a wrong guess
    Reshuffle,
}

/// A timer that came due during [`Scheduler::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub action: TimerAction,
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    due: Duration,
    seq: u64,
    generation: u64,
    action: TimerAction,
}

/// One-shot timers on a virtual clock.
///
/// Time only moves through [`Scheduler::advance`], which keeps firing order
/// deterministic: earliest due first, ties broken by scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, generation: u64, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            seq,
            generation,
            action,
        });
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self, generation: u64) -> bool {
        self.pending.iter().any(|p| p.generation == generation)
    }

    /// Move the clock forward and hand back everything that came due, in order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Fired> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter()
            .map(|p| Fired {
                action: p.action,
                generation: p.generation,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_fires_early() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(1000), 0, TimerAction::Reshuffle);

        assert!(timers.advance(ms(999)).is_empty());
        assert_eq!(timers.pending.len(), 1);

        let fired = timers.advance(ms(1));
        assert_eq!(
            fired,
            vec![Fired {
                action: TimerAction::Reshuffle,
                generation: 0
            }]
        );
        assert!(timers.pending.is_empty());
    }

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(1500), 1, TimerAction::AdvanceWord);
        timers.schedule(ms(1000), 2, TimerAction::Reshuffle);
        timers.schedule(ms(1000), 3, TimerAction::AdvanceWord);

        let fired = timers.advance(ms(2000));
        let generations: Vec<u64> = fired.iter().map(|f| f.generation).collect();
        assert_eq!(generations, vec![2, 3, 1]);
    }

    #[test]
    fn test_delay_measured_from_schedule_time() {
        let mut timers = Scheduler::new();
        timers.advance(ms(500));
        timers.schedule(ms(100), 0, TimerAction::Reshuffle);
        assert_eq!(timers.now, ms(500));

        assert!(timers.advance(ms(50)).is_empty());
        assert_eq!(timers.advance(ms(50)).len(), 1);
    }

    #[test]
    fn test_cancel_all_and_has_pending() {
        let mut timers = Scheduler::new();
        timers.schedule(ms(10), 4, TimerAction::AdvanceWord);
        assert!(timers.has_pending(4));
        assert!(!timers.has_pending(5));

        timers.cancel_all();
        assert!(!timers.has_pending(4));
        assert!(timers.advance(ms(100)).is_empty());
    }
}
