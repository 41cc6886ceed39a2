//! Detail page fan-out
//!
//! Visits every candidate under the shared admission limit and turns each
//! successful visit into a `LeadRecord`. Failed visits yield no lead.

use std::time::Duration;
use tracing::{debug, info};

use crate::browser::BrowserDriver;
use crate::config::PipelineConfig;
use crate::extractor::DetailExtractor;
use crate::lead::{FetchOutcome, LeadRecord};
use crate::listing::CandidateSet;
use crate::progress::{Phase, ProgressReporter};
use crate::session::with_page;
use crate::worker_pool::BoundedWorkerPool;

#[derive(Debug, Clone)]
pub struct DetailFetcher {
    page_timeout: Duration,
    extractor: DetailExtractor,
}

impl DetailFetcher {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            page_timeout: config.page_timeout(),
            extractor: DetailExtractor::with_heading_wait(config.heading_wait()),
        }
    }

    /// Fetch every candidate in `candidates`, preserving candidate order in the output
    pub async fn fetch<B, R>(
        &self,
        browser: &B,
        pool: &BoundedWorkerPool,
        candidates: &CandidateSet,
        progress: &R,
    ) -> Vec<LeadRecord>
    where
        B: BrowserDriver,
        R: ProgressReporter + ?Sized,
    {
        let query = candidates.query.as_str();
        let tasks = candidates.locators.iter().map(move |locator| {
            move || async move {
                let outcome = with_page(browser, locator, self.page_timeout, async |page| {
                    Ok(self.extractor.extract_all(page).await)
                })
                .await;

                progress.report_item_finished(Phase::Collection, outcome.is_success());
                match outcome {
                    FetchOutcome::Success(fields) => {
                        Some(LeadRecord::from_detail(locator.as_str(), query, fields))
                    }
                    FetchOutcome::Failed(e) => {
                        debug!("Dropping candidate {locator}: {e}");
                        None
                    }
                }
            }
        });

        let leads: Vec<LeadRecord> = pool.run(tasks).await.into_iter().flatten().collect();
        info!(
            "Extracted {}/{} detail pages for '{query}'",
            leads.len(),
            candidates.len()
        );
        leads
    }
}
