//! Joinery Metrics - walk profiling for the ECS dispatcher
//!
//! Provides zero-cost abstractions for metrics collection that completely
//! vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use joinery_metrics::WalkProfiler;
//!
//! let mut profiler = WalkProfiler::new();
//! let summary = profiler.time_walk("movement", || {
//!     let summary = run_walk();
//!     (summary, summary.invocations)
//! });
//! println!("walks: {}", profiler.walks("movement"));
//! ```
//!
//! In production builds (without `metrics` feature), all instrumentation
//! is compiled out to zero overhead.

use std::time::Duration;

#[cfg(feature = "metrics")]
mod walk_profiler;

#[cfg(feature = "metrics")]
pub use walk_profiler::WalkProfiler;

/// Accumulated totals for one system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkRecord {
    pub walks: u64,
    pub invocations: u64,
    pub elapsed: Duration,
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct WalkProfiler;

#[cfg(not(feature = "metrics"))]
impl WalkProfiler {
    pub fn new() -> Self { Self }
    pub fn time_walk<F, R>(&mut self, _name: &str, f: F) -> R where F: FnOnce() -> (R, usize) { f().0 }
    pub fn record(&mut self, _name: &str, _invocations: usize, _elapsed: Duration) {}
    pub fn walks(&self, _name: &str) -> u64 { 0 }
    pub fn invocations(&self, _name: &str) -> u64 { 0 }
    pub fn elapsed(&self, _name: &str) -> Duration { Duration::ZERO }
    pub fn record_of(&self, _name: &str) -> Option<WalkRecord> { None }
    pub fn reset(&mut self) {}
    pub fn iter(&self) -> impl Iterator<Item = (&String, &WalkRecord)> { std::iter::empty() }
}
