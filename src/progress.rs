//! Progress reporting abstraction for pipeline runs
//!
//! Defines the `ProgressReporter` trait for per-phase lifecycle events,
//! a no-op implementation for library use and a tracing-backed one for the CLI.

use std::fmt;
use tracing::{debug, info, warn};

/// Stages of one pipeline run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Collection,
    Enrichment,
    Generation,
    Output,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Collection => "collection",
            Self::Enrichment => "enrichment",
            Self::Generation => "generation",
            Self::Output => "output",
        };
        f.write_str(name)
    }
}

/// Trait for reporting pipeline progress at key lifecycle events
pub trait ProgressReporter: Send + Sync {
    /// A phase is starting with `items` units of work
    fn report_phase_started(&self, phase: Phase, items: usize);

    /// One query's listing view is being processed
    fn report_query_started(&self, query: &str, index: usize, total: usize);

    /// One unit of work inside a phase finished
    fn report_item_finished(&self, phase: Phase, succeeded: bool);

    /// A phase finished with `produced` records
    fn report_phase_completed(&self, phase: Phase, produced: usize);

    /// A non-fatal problem worth surfacing
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_phase_started(&self, _phase: Phase, _items: usize) {}

    #[inline(always)]
    fn report_query_started(&self, _query: &str, _index: usize, _total: usize) {}

    #[inline(always)]
    fn report_item_finished(&self, _phase: Phase, _succeeded: bool) {}

    #[inline(always)]
    fn report_phase_completed(&self, _phase: Phase, _produced: usize) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Writes progress events to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_phase_started(&self, phase: Phase, items: usize) {
        info!("Starting {phase} phase ({items} items)");
    }

    fn report_query_started(&self, query: &str, index: usize, total: usize) {
        info!("Searching [{}/{total}]: {query}", index + 1);
    }

    fn report_item_finished(&self, phase: Phase, succeeded: bool) {
        debug!("{phase} item finished (ok: {succeeded})");
    }

    fn report_phase_completed(&self, phase: Phase, produced: usize) {
        info!("Finished {phase} phase: {produced} records");
    }

    fn report_error(&self, error: &str) {
        warn!("{error}");
    }
}
