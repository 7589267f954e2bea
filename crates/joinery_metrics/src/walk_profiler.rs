//! Per-system walk profiling

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::WalkRecord;

/// Accumulates walk counts, hook invocations and wall time per system name.
pub struct WalkProfiler {
    systems: HashMap<String, WalkRecord>,
}

impl WalkProfiler {
    pub fn new() -> Self {
        Self {
            systems: HashMap::new(),
        }
    }

    /// Time `f` and charge the elapsed time plus the invocation count it
    /// reports to `name`.
    pub fn time_walk<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> (R, usize),
    {
        let start = Instant::now();
        let (result, invocations) = f();
        self.record(name, invocations, start.elapsed());
        result
    }

    pub fn record(&mut self, name: &str, invocations: usize, elapsed: Duration) {
        let entry = self.systems.entry(name.to_string()).or_default();
        entry.walks += 1;
        entry.invocations += invocations as u64;
        entry.elapsed += elapsed;
    }

    pub fn walks(&self, name: &str) -> u64 {
        self.systems.get(name).map_or(0, |r| r.walks)
    }

    pub fn invocations(&self, name: &str) -> u64 {
        self.systems.get(name).map_or(0, |r| r.invocations)
    }

    pub fn elapsed(&self, name: &str) -> Duration {
        self.systems
            .get(name)
            .map_or(Duration::ZERO, |r| r.elapsed)
    }

    pub fn record_of(&self, name: &str) -> Option<WalkRecord> {
        self.systems.get(name).copied()
    }

    pub fn reset(&mut self) {
        self.systems.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &WalkRecord)> {
        self.systems.iter()
    }
}

impl Default for WalkProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_per_system() {
        let mut profiler = WalkProfiler::new();
        profiler.record("movement", 3, Duration::from_millis(2));
        profiler.record("movement", 4, Duration::from_millis(1));
        profiler.record("render", 1, Duration::ZERO);

        assert_eq!(profiler.walks("movement"), 2);
        assert_eq!(profiler.invocations("movement"), 7);
        assert_eq!(profiler.elapsed("movement"), Duration::from_millis(3));
        assert_eq!(profiler.walks("render"), 1);
        assert_eq!(profiler.walks("missing"), 0);
    }

    #[test]
    fn time_walk_passes_result_through() {
        let mut profiler = WalkProfiler::new();
        let value = profiler.time_walk("sys", || ("done", 5));
        assert_eq!(value, "done");
        assert_eq!(profiler.invocations("sys"), 5);

        profiler.reset();
        assert!(profiler.record_of("sys").is_none());
    }
}
