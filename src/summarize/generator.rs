//! Opener generation fan-out

use tracing::{debug, info};

use super::prompt::build_prompt;
use super::{GenerationOptions, Summarizer};
use crate::error::ScrapeError;
use crate::lead::LeadRecord;
use crate::progress::{Phase, ProgressReporter};
use crate::utils::GENERATION_FALLBACK;
use crate::worker_pool::BoundedWorkerPool;

/// Attaches a generated opener to every lead
pub struct OpenerGenerator<S> {
    summarizer: S,
    options: GenerationOptions,
    pool: BoundedWorkerPool,
}

impl<S: Summarizer> OpenerGenerator<S> {
    pub fn new(summarizer: S, options: GenerationOptions, concurrency: usize) -> Self {
        Self {
            summarizer,
            options,
            pool: BoundedWorkerPool::new(concurrency),
        }
    }

    /// Opener for one lead, or the fallback text on any failure
    pub async fn opener_for(&self, lead: &LeadRecord) -> String {
        let prompt = build_prompt(lead);
        let call = self.summarizer.summarize(&prompt, &self.options);

        let result = match tokio::time::timeout(self.options.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::GenerationFailure(format!(
                "timed out after {:?}",
                self.options.timeout
            ))),
        };

        match result {
            Ok(text) => text,
            Err(e) => {
                debug!(
                    "Opener for {} fell back: {e}",
                    lead.identity().detail_url
                );
                GENERATION_FALLBACK.to_string()
            }
        }
    }

    /// Generate openers for every lead, preserving order
    pub async fn generate<R>(&self, leads: Vec<LeadRecord>, progress: &R) -> Vec<LeadRecord>
    where
        R: ProgressReporter + ?Sized,
    {
        let total = leads.len();
        let tasks = leads.into_iter().map(move |lead| {
            move || async move {
                let opener = self.opener_for(&lead).await;
                progress.report_item_finished(Phase::Generation, opener != GENERATION_FALLBACK);
                lead.with_opener(opener)
            }
        });

        let leads = self.pool.run(tasks).await;
        let generated = leads
            .iter()
            .filter(|l| l.opener().as_known().is_some_and(|o| o != GENERATION_FALLBACK))
            .count();
        info!("Generated {generated}/{total} openers");
        leads
    }
}
