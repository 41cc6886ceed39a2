pub mod browser;
pub mod config;
pub mod detail;
pub mod enrich;
pub mod error;
pub mod extractor;
pub mod lead;
pub mod listing;
pub mod orchestrator;
pub mod progress;
pub mod session;
pub mod sink;
pub mod summarize;
pub mod utils;
pub mod worker_pool;

pub use browser::{
    BrowserDriver, BrowserLauncher, ChromiumBrowser, ChromiumLauncher, ChromiumPage, PageHandle,
    download_managed_browser, find_browser_executable, launch_browser,
};
pub use config::PipelineConfig;
pub use detail::DetailFetcher;
pub use enrich::SignalEnricher;
pub use error::{ScrapeError, ScrapeResult};
pub use extractor::FieldExtractor;
pub use lead::{Contact, DetailFields, FetchOutcome, Field, Identity, LeadRecord, Reputation, Signals};
pub use listing::{CandidateSet, ListingCollector};
pub use orchestrator::{Pipeline, PipelineReport, ShutdownSignal};
pub use progress::{LogProgress, NoOpProgress, Phase, ProgressReporter};
pub use session::{PageSession, SessionState, with_page};
pub use sink::{CsvSink, JsonSink, LeadSink, sink_for_path};
pub use summarize::{GenerationOptions, OpenAiSummarizer, OpenerGenerator, Summarizer};
pub use worker_pool::BoundedWorkerPool;

/// Collect, enrich and write leads for `config` with a real browser.
///
/// Generation uses OpenAI when the config carries an API key; otherwise
/// every opener is the fallback text.
pub async fn run(config: PipelineConfig, shutdown: ShutdownSignal) -> ScrapeResult<PipelineReport> {
    let launcher = ChromiumLauncher::new(config.headless());
    let sink = sink_for_path(config.output_path());

    match config.api_key().map(str::to_string) {
        Some(key) => {
            let summarizer = OpenAiSummarizer::new(key, config.model());
            Pipeline::new(config, launcher, summarizer)
                .with_progress(LogProgress)
                .with_shutdown(shutdown)
                .run_to_sink(sink.as_ref())
                .await
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; openers will use the fallback text");
            Pipeline::new(config, launcher, summarize::Unconfigured)
                .with_progress(LogProgress)
                .with_shutdown(shutdown)
                .run_to_sink(sink.as_ref())
                .await
        }
    }
}
