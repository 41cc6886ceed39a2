//! End-to-end run sequencing
//!
//! Collection (listing + detail per query) -> enrichment -> generation -> sink.
//! Each browser phase gets its own browser instance, closed before the next
//! phase starts. The shutdown flag is honoured between queries and at every
//! phase boundary; whatever has been collected by then is returned.

use log::{info, warn};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::browser::{BrowserDriver, BrowserLauncher};
use crate::config::PipelineConfig;
use crate::detail::DetailFetcher;
use crate::enrich::SignalEnricher;
use crate::error::ScrapeResult;
use crate::lead::LeadRecord;
use crate::listing::ListingCollector;
use crate::progress::{NoOpProgress, Phase, ProgressReporter};
use crate::sink::LeadSink;
use crate::summarize::{OpenerGenerator, Summarizer};
use crate::worker_pool::BoundedWorkerPool;

/// Cooperative interrupt flag shared between the binary and a running pipeline
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Trigger on the first interrupt, call `abort` on the second.
    ///
    /// `next_interrupt` resolves to `false` when no further interrupts can
    /// arrive. The flag is only read between phases, so `abort` is the way
    /// out of a long phase.
    pub async fn watch<F, Fut, A>(self, mut next_interrupt: F, abort: A)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
        A: FnOnce(),
    {
        if !next_interrupt().await {
            return;
        }
        warn!("Interrupt received; finishing current phase (interrupt again to abort)");
        self.trigger();

        if next_interrupt().await {
            warn!("Second interrupt received; aborting");
            abort();
        }
    }
}

/// Result of one run
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub leads: Vec<LeadRecord>,
    pub phases_completed: Vec<Phase>,
    pub interrupted: bool,
    /// Rows persisted by the sink, when one was used
    pub rows_written: Option<usize>,
}

impl PipelineReport {
    #[must_use]
    pub fn completed(&self, phase: Phase) -> bool {
        self.phases_completed.contains(&phase)
    }
}

pub struct Pipeline<L, S, R = NoOpProgress> {
    config: PipelineConfig,
    launcher: L,
    generator: OpenerGenerator<S>,
    progress: R,
    shutdown: ShutdownSignal,
}

impl<L, S> Pipeline<L, S, NoOpProgress>
where
    L: BrowserLauncher,
    S: Summarizer,
{
    pub fn new(config: PipelineConfig, launcher: L, summarizer: S) -> Self {
        let generator = OpenerGenerator::new(
            summarizer,
            config.generation_options(),
            config.generation_concurrency(),
        );
        Self {
            config,
            launcher,
            generator,
            progress: NoOpProgress,
            shutdown: ShutdownSignal::new(),
        }
    }
}

impl<L, S, R> Pipeline<L, S, R>
where
    L: BrowserLauncher,
    S: Summarizer,
    R: ProgressReporter,
{
    #[must_use]
    pub fn with_progress<R2: ProgressReporter>(self, progress: R2) -> Pipeline<L, S, R2> {
        Pipeline {
            config: self.config,
            launcher: self.launcher,
            generator: self.generator,
            progress,
            shutdown: self.shutdown,
        }
    }

    #[must_use]
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn interrupted(&self, report: &mut PipelineReport, before: Phase) -> bool {
        if self.shutdown.is_triggered() {
            warn!("Interrupted before {before} phase; keeping {} leads", report.leads.len());
            report.interrupted = true;
        }
        report.interrupted
    }

    /// Run collection, enrichment and generation.
    ///
    /// Only a failed browser launch for the collection phase is an error.
    pub async fn run(&self) -> ScrapeResult<PipelineReport> {
        let mut report = PipelineReport::default();

        if self.interrupted(&mut report, Phase::Collection) {
            return Ok(report);
        }
        let collected = self.collect(&mut report).await?;
        report.leads = collected;
        if report.interrupted {
            return Ok(report);
        }
        report.phases_completed.push(Phase::Collection);

        if report.leads.is_empty() {
            info!("No leads found");
            return Ok(report);
        }

        if self.interrupted(&mut report, Phase::Enrichment) {
            return Ok(report);
        }
        let leads = std::mem::take(&mut report.leads);
        report.leads = self.enrich(leads).await;
        report.phases_completed.push(Phase::Enrichment);

        if self.interrupted(&mut report, Phase::Generation) {
            return Ok(report);
        }
        let leads = std::mem::take(&mut report.leads);
        self.progress.report_phase_started(Phase::Generation, leads.len());
        report.leads = self.generator.generate(leads, &self.progress).await;
        self.progress
            .report_phase_completed(Phase::Generation, report.leads.len());
        report.phases_completed.push(Phase::Generation);

        Ok(report)
    }

    /// Run the pipeline and persist whatever it produced.
    ///
    /// Nothing is written when no leads were collected.
    pub async fn run_to_sink(&self, sink: &dyn LeadSink) -> ScrapeResult<PipelineReport> {
        let mut report = self.run().await?;
        if report.leads.is_empty() {
            return Ok(report);
        }

        self.progress.report_phase_started(Phase::Output, report.leads.len());
        let written = sink.write(&report.leads)?;
        self.progress.report_phase_completed(Phase::Output, written);
        report.rows_written = Some(written);
        report.phases_completed.push(Phase::Output);
        Ok(report)
    }

    async fn collect(&self, report: &mut PipelineReport) -> ScrapeResult<Vec<LeadRecord>> {
        let queries = self.config.queries();
        self.progress
            .report_phase_started(Phase::Collection, queries.len());

        let browser = self.launcher.launch().await?;
        let pool = BoundedWorkerPool::new(self.config.max_concurrent_pages());
        let collector = ListingCollector::new(&self.config);
        let fetcher = DetailFetcher::new(&self.config);

        let mut leads = Vec::new();
        for (index, query) in queries.iter().enumerate() {
            if self.shutdown.is_triggered() {
                warn!("Interrupted after {index} of {} queries", queries.len());
                report.interrupted = true;
                break;
            }

            self.progress.report_query_started(query, index, queries.len());
            let candidates = collector.collect(&browser, query).await;
            if candidates.is_empty() {
                self.progress
                    .report_error(&format!("No candidates for '{query}'"));
                continue;
            }

            let fetched = fetcher
                .fetch(&browser, &pool, &candidates, &self.progress)
                .await;
            leads.extend(fetched);
        }

        if let Err(e) = browser.close().await {
            warn!("Failed to close collection browser: {e}");
        }

        self.progress
            .report_phase_completed(Phase::Collection, leads.len());
        Ok(leads)
    }

    async fn enrich(&self, leads: Vec<LeadRecord>) -> Vec<LeadRecord> {
        self.progress
            .report_phase_started(Phase::Enrichment, leads.len());

        let browser = match self.launcher.launch().await {
            Ok(browser) => browser,
            Err(e) => {
                self.progress
                    .report_error(&format!("Enrichment browser failed to launch: {e}"));
                let degraded = SignalEnricher::degrade_all(leads);
                self.progress
                    .report_phase_completed(Phase::Enrichment, degraded.len());
                return degraded;
            }
        };

        let pool = BoundedWorkerPool::new(self.config.max_concurrent_pages());
        let enriched = SignalEnricher::new(&self.config)
            .enrich(&browser, &pool, leads, &self.progress)
            .await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close enrichment browser: {e}");
        }

        self.progress
            .report_phase_completed(Phase::Enrichment, enriched.len());
        enriched
    }
}
