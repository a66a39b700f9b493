//! Recurring timers driven by simulated time
//!
//! Timers are tracked by handle so a rebuild can cancel exactly what the
//! previous session scheduled.

/// Slack for float drift when summing fixed steps
const FIRE_EPSILON: f32 = 1e-4;
/// Shortest interval a timer accepts
const MIN_INTERVAL: f32 = 1e-3;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Drop a new snowflake
    SpawnCollectible,
    /// Nudge the player back onto the floor line
    FloorCorrection,
}

/// Handle returned by [`Timers::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct TimerEntry {
    handle: TimerHandle,
    kind: TimerKind,
    interval: f32,
    elapsed: f32,
}

/// Set of running recurring timers
#[derive(Debug, Clone, Default)]
pub struct Timers {
    entries: Vec<TimerEntry>,
    next_handle: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a recurring timer firing every `interval` seconds
    pub fn start(&mut self, kind: TimerKind, interval: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(TimerEntry {
            handle,
            kind,
            interval: interval.max(MIN_INTERVAL),
            elapsed: 0.0,
        });
        handle
    }

    /// Stop a timer; stopping one that is already gone is a no-op
    pub fn stop(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t.handle != handle);
        self.entries.len() != before
    }

    /// Stop everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_running(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|t| t.handle == handle)
    }

    /// Number of running timers of a kind
    pub fn count(&self, kind: TimerKind) -> usize {
        self.entries.iter().filter(|t| t.kind == kind).count()
    }

    /// Advance all timers by `dt`, returning fired timers in start order.
    /// A timer that is owed several intervals fires once per interval.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.entries {
            timer.elapsed += dt;
            while timer.elapsed + FIRE_EPSILON >= timer.interval {
                timer.elapsed -= timer.interval;
                fired.push(timer.kind);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_every_interval() {
        let mut timers = Timers::new();
        timers.start(TimerKind::SpawnCollectible, 0.5);
        let mut fired = 0;
        for _ in 0..100 {
            fired += timers.advance(0.01).len();
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_large_step_catches_up() {
        let mut timers = Timers::new();
        timers.start(TimerKind::FloorCorrection, 0.01);
        assert_eq!(timers.advance(0.05).len(), 5);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timers = Timers::new();
        let handle = timers.start(TimerKind::SpawnCollectible, 0.5);
        assert!(timers.is_running(handle));
        assert!(timers.stop(handle));
        assert!(!timers.stop(handle));
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_handles_not_reused_after_clear() {
        let mut timers = Timers::new();
        let old = timers.start(TimerKind::SpawnCollectible, 0.5);
        timers.clear();
        let new = timers.start(TimerKind::SpawnCollectible, 0.5);
        assert_ne!(old, new);
        assert!(!timers.is_running(old));
        assert_eq!(timers.count(TimerKind::SpawnCollectible), 1);
    }
}
