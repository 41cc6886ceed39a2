//! End-to-end runs against the scripted browser

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kodegen_tools_leadscrape::utils::GENERATION_FALLBACK;
use kodegen_tools_leadscrape::{
    CsvSink, Field, Phase, Pipeline, ShutdownSignal, Signals, summarize::Unconfigured,
};
use tempfile::TempDir;
use tokio::sync::{Mutex, mpsc};

mod common;
use common::{
    FakeBrowser, FakeLauncher, FakeSummarizer, PageScript, detail_page, listing_page, maps_search,
    test_config, website_page,
};

const MIAMI: &str = "Dentist in Miami, FL";
const LA: &str = "Cosmetic Dentistry Los Angeles";

fn place(slug: &str) -> String {
    format!("https://www.google.com/maps/place/{slug}")
}

/// Two queries, three businesses each, every business with a website
fn two_city_browser() -> FakeBrowser {
    two_city_browser_with(|_| {
        Some(website_page("<script src=\"analytics.js\"></script>", true, "Welcome"))
    })
}

/// Same listings; `site(i)` scripts the i-th website, `None` leaves it unreachable
fn two_city_browser_with(site: impl Fn(usize) -> Option<PageScript>) -> FakeBrowser {
    let mut browser = FakeBrowser::new();
    let mut index = 0;
    for (query, city) in [(MIAMI, "mia"), (LA, "la")] {
        let slugs: Vec<String> = (0..3).map(|i| format!("{city}-{i}")).collect();
        let hrefs: Vec<String> = slugs.iter().map(|s| format!("{}?authuser=0", place(s))).collect();
        let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
        browser = browser.page(&maps_search(query), listing_page(&href_refs));

        for slug in &slugs {
            let site_host = format!("{slug}.example");
            browser = browser.page(
                &place(slug),
                detail_page(slug, Some(&site_host), Some("(555) 010-0000"), Some("4.9 stars 31 Reviews")),
            );
            if let Some(script) = site(index) {
                browser = browser.page(&format!("https://{site_host}"), script);
            }
            index += 1;
        }
    }
    browser
}

#[tokio::test]
async fn every_enrichment_visit_failing_still_yields_all_rows() {
    // Even sites refuse the connection, odd ones do not resolve
    let launcher = FakeLauncher::new(two_city_browser_with(|i| {
        (i % 2 == 0).then(PageScript::failing)
    }));
    let state = launcher.state();

    let report = Pipeline::new(test_config(&[MIAMI, LA]), launcher, FakeSummarizer::failing())
        .run()
        .await
        .unwrap();

    assert_eq!(report.leads.len(), 6);
    for lead in &report.leads {
        assert_eq!(lead.signals(), &Signals::degraded());
        assert_eq!(lead.opener(), &Field::Known(GENERATION_FALLBACK.to_string()));
    }
    // 2 listing views + 6 detail pages + 6 website attempts
    assert_eq!(state.opened(), 14);
    assert_eq!(state.opened(), state.closed());
}

#[tokio::test]
async fn enrichment_launch_failure_degrades_every_lead() {
    let launcher = FakeLauncher::new(two_city_browser()).fail_launch(2);
    let config = test_config(&[MIAMI, LA]);

    let report = Pipeline::new(config, launcher, FakeSummarizer::failing())
        .run()
        .await
        .unwrap();

    assert_eq!(report.leads.len(), 6);
    assert!(!report.interrupted);
    assert_eq!(
        report.phases_completed,
        vec![Phase::Collection, Phase::Enrichment, Phase::Generation]
    );
    for lead in &report.leads {
        assert_eq!(lead.signals(), &Signals::degraded());
        assert_eq!(lead.opener(), &Field::Known(GENERATION_FALLBACK.to_string()));
    }
    assert_eq!(report.leads[0].identity().query, MIAMI);
    assert_eq!(report.leads[5].identity().query, LA);
}

#[tokio::test]
async fn full_run_enriches_and_generates() {
    let launcher = FakeLauncher::new(two_city_browser());
    let state = launcher.state();
    let summarizer = FakeSummarizer::default();

    let report = Pipeline::new(test_config(&[MIAMI, LA]), launcher, &summarizer)
        .run()
        .await
        .unwrap();

    assert_eq!(report.leads.len(), 6);
    let first = &report.leads[0];
    assert_eq!(first.identity().name, Field::Known("mia-0".to_string()));
    assert_eq!(first.contact().phone, Field::Known("(555) 010-0000".to_string()));
    assert_eq!(first.reputation().review_count, 31);
    assert_eq!(first.signals().missing_pixel, Field::Known(true));
    assert_eq!(first.signals().missing_analytics, Field::Known(false));
    assert_eq!(first.opener().render(""), "Hello mia-0");

    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 6);
    // 2 listing views + 6 detail pages + 6 websites
    assert_eq!(state.opened(), 14);
    assert_eq!(state.opened(), state.closed());
}

#[tokio::test]
async fn missing_feed_skips_only_that_query() {
    let browser = two_city_browser().page(&maps_search(MIAMI), PageScript::default());

    let report = Pipeline::new(test_config(&[MIAMI, LA]), FakeLauncher::new(browser), Unconfigured)
        .run()
        .await
        .unwrap();

    assert_eq!(report.leads.len(), 3);
    assert!(report.leads.iter().all(|l| l.identity().query == LA));
}

#[tokio::test]
async fn no_leads_skips_later_phases_and_writes_nothing() {
    let browser = FakeBrowser::new().page(&maps_search(MIAMI), PageScript::failing());
    let launcher = FakeLauncher::new(browser);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leads_enriched.csv");

    let report = Pipeline::new(test_config(&[MIAMI]), launcher, Unconfigured)
        .run_to_sink(&CsvSink::new(&path))
        .await
        .unwrap();

    assert!(report.leads.is_empty());
    assert_eq!(report.phases_completed, vec![Phase::Collection]);
    assert_eq!(report.rows_written, None);
    assert!(!path.exists());
}

#[tokio::test]
async fn collection_launch_failure_is_an_error() {
    let launcher = FakeLauncher::new(two_city_browser()).fail_launch(1);
    let result = Pipeline::new(test_config(&[MIAMI]), launcher, Unconfigured)
        .run()
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn interrupt_before_start_returns_empty_report() {
    let shutdown = ShutdownSignal::new();
    shutdown.trigger();
    let launcher = FakeLauncher::new(two_city_browser());

    let report = Pipeline::new(test_config(&[MIAMI, LA]), launcher, Unconfigured)
        .with_shutdown(shutdown)
        .run()
        .await
        .unwrap();

    assert!(report.interrupted);
    assert!(report.leads.is_empty());
    assert!(report.phases_completed.is_empty());
}

#[tokio::test]
async fn run_to_sink_writes_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leads_enriched.csv");
    let launcher = FakeLauncher::new(two_city_browser());

    let report = Pipeline::new(test_config(&[LA]), launcher, FakeSummarizer::default())
        .run_to_sink(&CsvSink::new(&path))
        .await
        .unwrap();

    assert_eq!(report.rows_written, Some(3));
    assert!(report.completed(Phase::Output));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("Business Name,Website,Phone,Rating,Review Count,Missing_Pixel"));
    assert!(text.contains("Hello la-2"));
}

type NextInterrupt = Pin<Box<dyn Future<Output = bool> + Send>>;

/// Interrupt source fed by a channel; closing the channel ends the stream
fn interrupts(rx: mpsc::UnboundedReceiver<()>) -> impl FnMut() -> NextInterrupt {
    let rx = Arc::new(Mutex::new(rx));
    move || {
        let rx = Arc::clone(&rx);
        Box::pin(async move { rx.lock().await.recv().await.is_some() })
    }
}

#[tokio::test]
async fn second_interrupt_aborts() {
    let shutdown = ShutdownSignal::new();
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(()).unwrap();
    tx.send(()).unwrap();

    let triggered_at_abort = Arc::new(AtomicBool::new(false));
    let seen = Arc::clone(&triggered_at_abort);
    let observed = shutdown.clone();

    shutdown
        .clone()
        .watch(interrupts(rx), move || seen.store(observed.is_triggered(), Ordering::SeqCst))
        .await;

    assert!(shutdown.is_triggered());
    assert!(triggered_at_abort.load(Ordering::SeqCst));
}

#[tokio::test]
async fn single_interrupt_only_sets_the_flag() {
    let shutdown = ShutdownSignal::new();
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(()).unwrap();
    drop(tx);

    let aborted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&aborted);

    shutdown
        .clone()
        .watch(interrupts(rx), move || flag.store(true, Ordering::SeqCst))
        .await;

    assert!(shutdown.is_triggered());
    assert!(!aborted.load(Ordering::SeqCst));
}
