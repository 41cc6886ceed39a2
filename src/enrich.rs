//! Website enrichment fan-out
//!
//! Visits each lead's website and attaches technology signals. Every lead
//! comes back: leads without a usable website, or whose website could not
//! be visited, carry `Signals::degraded()`.

use std::time::Duration;
use tracing::{debug, info};

use crate::browser::BrowserDriver;
use crate::config::PipelineConfig;
use crate::extractor::SignalExtractor;
use crate::lead::{FetchOutcome, LeadRecord, Signals};
use crate::progress::{Phase, ProgressReporter};
use crate::session::with_page;
use crate::utils::{is_valid_url, normalize_website};
use crate::worker_pool::BoundedWorkerPool;

#[derive(Debug, Clone)]
pub struct SignalEnricher {
    page_timeout: Duration,
    extractor: SignalExtractor,
}

impl SignalEnricher {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            page_timeout: config.page_timeout(),
            extractor: SignalExtractor::default(),
        }
    }

    /// Signals for one lead, never failing
    async fn signals_for<B: BrowserDriver>(&self, browser: &B, lead: &LeadRecord) -> Signals {
        let Some(website) = lead.contact().website.as_known() else {
            return Signals::degraded();
        };
        let url = normalize_website(website);
        if !is_valid_url(&url) {
            debug!("Skipping enrichment of malformed website '{website}'");
            return Signals::degraded();
        }

        match with_page(browser, &url, self.page_timeout, async |page| {
            Ok(self.extractor.extract_all(page).await)
        })
        .await
        {
            FetchOutcome::Success(signals) => signals,
            FetchOutcome::Failed(e) => {
                debug!("Enrichment of {url} failed: {e}");
                Signals::degraded()
            }
        }
    }

    /// Enrich every lead, preserving order
    pub async fn enrich<B, R>(
        &self,
        browser: &B,
        pool: &BoundedWorkerPool,
        leads: Vec<LeadRecord>,
        progress: &R,
    ) -> Vec<LeadRecord>
    where
        B: BrowserDriver,
        R: ProgressReporter + ?Sized,
    {
        let total = leads.len();
        let tasks = leads.into_iter().map(move |lead| {
            move || async move {
                let signals = self.signals_for(browser, &lead).await;
                progress.report_item_finished(Phase::Enrichment, true);
                lead.with_signals(signals)
            }
        });

        let enriched = pool.run(tasks).await;
        info!("Enriched {total} leads");
        enriched
    }

    /// Degrade every lead without visiting anything
    ///
    /// Used when no browser could be launched for the enrichment phase.
    #[must_use]
    pub fn degrade_all(leads: Vec<LeadRecord>) -> Vec<LeadRecord> {
        leads
            .into_iter()
            .map(|lead| lead.with_signals(Signals::degraded()))
            .collect()
    }
}
