//! Detail and enrichment fan-out under the shared admission limit

use std::time::Duration;

use kodegen_tools_leadscrape::{
    BoundedWorkerPool, CandidateSet, DetailFetcher, Field, NoOpProgress, PipelineConfig,
    SignalEnricher, Signals,
};

mod common;
use common::{FakeBrowser, PageScript, detail_page, test_config, website_page};

const QUERY: &str = "Cosmetic Dentistry Los Angeles";

fn place(i: usize) -> String {
    format!("https://www.google.com/maps/place/clinic-{i}")
}

fn candidates(n: usize) -> CandidateSet {
    CandidateSet {
        query: QUERY.to_string(),
        locators: (0..n).map(place).collect(),
    }
}

#[tokio::test(start_paused = true)]
async fn detail_fetch_respects_page_limit() {
    let mut browser = FakeBrowser::new().nav_delay(Duration::from_millis(200));
    for i in 0..12 {
        browser = browser.page(
            &place(i),
            detail_page(&format!("Clinic {i}"), None, None, Some("4.1 stars 9 Reviews")),
        );
    }
    let config = PipelineConfig::builder()
        .queries([QUERY])
        .max_concurrent_pages(3)
        .heading_wait(Duration::from_millis(10))
        .build()
        .unwrap();
    let pool = BoundedWorkerPool::new(config.max_concurrent_pages());

    let leads = DetailFetcher::new(&config)
        .fetch(&browser, &pool, &candidates(12), &NoOpProgress)
        .await;

    assert_eq!(leads.len(), 12);
    assert_eq!(browser.state.max_open(), 3);
    assert_eq!(browser.state.opened(), browser.state.closed());
    // Output keeps candidate order
    assert_eq!(leads[5].identity().name, Field::Known("Clinic 5".to_string()));
    assert_eq!(leads[5].identity().query, QUERY);
}

#[tokio::test(start_paused = true)]
async fn failed_details_are_dropped() {
    let browser = FakeBrowser::new()
        .page(&place(0), detail_page("Clinic 0", None, None, None))
        .page(&place(1), PageScript::failing())
        .page(&place(2), PageScript::hanging())
        .page(&place(3), detail_page("Clinic 3", None, None, None));
    let config = test_config(&[QUERY]);
    let pool = BoundedWorkerPool::new(2);

    let leads = DetailFetcher::new(&config)
        .fetch(&browser, &pool, &candidates(4), &NoOpProgress)
        .await;

    let names: Vec<String> = leads
        .iter()
        .map(|l| l.identity().name.render("Unknown"))
        .collect();
    assert_eq!(names, vec!["Clinic 0", "Clinic 3"]);
    assert_eq!(browser.state.opened(), 4);
    assert_eq!(browser.state.closed(), 4);
}

#[tokio::test(start_paused = true)]
async fn enrichment_keeps_every_lead() {
    let browser = FakeBrowser::new()
        .page(&place(0), detail_page("With site", Some("tracked.example"), None, None))
        .page(&place(1), detail_page("No site", None, None, None))
        .page(&place(2), detail_page("Dead site", Some("http://dead.example"), None, None))
        .page(&place(3), detail_page("Slow site", Some("slow.example"), None, None))
        .page(
            "https://tracked.example",
            website_page("<script>fbq('init')</script><script src=\"gtag.js\"></script>", true, "Hello"),
        )
        .page("http://dead.example", PageScript::failing())
        .page("https://slow.example", PageScript::hanging());
    let config = test_config(&[QUERY]);
    let pool = BoundedWorkerPool::new(config.max_concurrent_pages());

    let leads = DetailFetcher::new(&config)
        .fetch(&browser, &pool, &candidates(4), &NoOpProgress)
        .await;
    assert_eq!(leads.len(), 4);

    let enriched = SignalEnricher::new(&config)
        .enrich(&browser, &pool, leads, &NoOpProgress)
        .await;

    assert_eq!(enriched.len(), 4);
    let tracked = enriched[0].signals();
    assert_eq!(tracked.missing_pixel, Field::Known(false));
    assert_eq!(tracked.missing_analytics, Field::Known(false));
    assert_eq!(tracked.mobile_friendly, Field::Known(true));
    assert_eq!(tracked.excerpt, Field::Known("Hello".to_string()));

    for lead in &enriched[1..] {
        assert_eq!(lead.signals(), &Signals::degraded());
    }
    // Earlier stages' fields are untouched
    assert_eq!(enriched[2].contact().website, Field::Known("http://dead.example".to_string()));
    assert_eq!(browser.state.opened(), browser.state.closed());
}

#[tokio::test]
async fn malformed_website_degrades_without_a_visit() {
    let browser = FakeBrowser::new()
        .page(&place(0), detail_page("Typo site", Some("smiles dental . com"), None, None))
        .page(&place(1), detail_page("Phone only", Some("tel:+13055550100"), None, None));
    let config = test_config(&[QUERY]);
    let pool = BoundedWorkerPool::new(config.max_concurrent_pages());

    let leads = DetailFetcher::new(&config)
        .fetch(&browser, &pool, &candidates(2), &NoOpProgress)
        .await;
    assert_eq!(leads.len(), 2);
    let opened_for_details = browser.state.opened();

    let enriched = SignalEnricher::new(&config)
        .enrich(&browser, &pool, leads, &NoOpProgress)
        .await;

    assert!(enriched.iter().all(|l| l.signals() == &Signals::degraded()));
    assert_eq!(browser.state.opened(), opened_for_details);
    assert_eq!(browser.state.visits(), vec![place(0), place(1)]);
}

#[test]
fn degrade_all_marks_every_lead() {
    let leads = vec![
        kodegen_tools_leadscrape::LeadRecord::from_detail(
            place(0),
            QUERY,
            kodegen_tools_leadscrape::DetailFields {
                name: Field::Unknown,
                contact: Default::default(),
                reputation: Default::default(),
            },
        );
        3
    ];

    let degraded = SignalEnricher::degrade_all(leads);
    assert!(degraded.iter().all(|l| l.signals() == &Signals::degraded()));
}
