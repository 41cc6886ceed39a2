//! Durable output for collected leads
//!
//! `CsvSink` writes the fixed tabular layout; `JsonSink` writes the records
//! with their sentinels intact. `sink_for_path` picks one by file extension.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ScrapeResult;
use crate::lead::{Field, LeadRecord};

/// One output column, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    BusinessName,
    Website,
    Phone,
    Rating,
    ReviewCount,
    MissingPixel,
    MissingAnalytics,
    MobileFriendly,
    Opener,
    MapsUrl,
    SearchQuery,
    HomepageText,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::BusinessName,
        Column::Website,
        Column::Phone,
        Column::Rating,
        Column::ReviewCount,
        Column::MissingPixel,
        Column::MissingAnalytics,
        Column::MobileFriendly,
        Column::Opener,
        Column::MapsUrl,
        Column::SearchQuery,
        Column::HomepageText,
    ];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::BusinessName => "Business Name",
            Self::Website => "Website",
            Self::Phone => "Phone",
            Self::Rating => "Rating",
            Self::ReviewCount => "Review Count",
            Self::MissingPixel => "Missing_Pixel",
            Self::MissingAnalytics => "Missing_Analytics",
            Self::MobileFriendly => "Mobile_Friendly",
            Self::Opener => "AI_Icebreaker",
            Self::MapsUrl => "Google Maps URL",
            Self::SearchQuery => "Search Query",
            Self::HomepageText => "Homepage_Text",
        }
    }

    /// Whether `lead` has been through the stage that writes this column
    fn reached_by(self, lead: &LeadRecord) -> bool {
        match self {
            Self::MissingPixel | Self::MissingAnalytics | Self::MobileFriendly | Self::HomepageText => {
                lead.signals().is_enriched()
            }
            Self::Opener => lead.opener().is_known(),
            _ => true,
        }
    }

    #[must_use]
    pub fn render(self, lead: &LeadRecord) -> String {
        let identity = lead.identity();
        let signals = lead.signals();
        match self {
            Self::BusinessName => identity.name.render("Unknown"),
            Self::Website => lead.contact().website.render(""),
            Self::Phone => lead.contact().phone.render(""),
            Self::Rating => lead.reputation().rating.render("N/A"),
            Self::ReviewCount => lead.reputation().review_count.to_string(),
            Self::MissingPixel => render_flag(&signals.missing_pixel),
            Self::MissingAnalytics => render_flag(&signals.missing_analytics),
            Self::MobileFriendly => render_flag(&signals.mobile_friendly),
            Self::Opener => lead.opener().render(""),
            Self::MapsUrl => identity.detail_url.clone(),
            Self::SearchQuery => identity.query.clone(),
            Self::HomepageText => signals.excerpt.render(""),
        }
    }
}

fn render_flag(flag: &Field<bool>) -> String {
    match flag {
        Field::Known(true) => "True".to_string(),
        Field::Known(false) => "False".to_string(),
        Field::Unknown => String::new(),
    }
}

/// Columns written for this run: a column is dropped when no lead reached its stage
#[must_use]
pub fn columns_for(leads: &[LeadRecord]) -> Vec<Column> {
    Column::ALL
        .into_iter()
        .filter(|column| leads.iter().any(|lead| column.reached_by(lead)))
        .collect()
}

/// Destination for a finished run
pub trait LeadSink {
    /// Write every lead, returning the number of rows written
    fn write(&self, leads: &[LeadRecord]) -> ScrapeResult<usize>;

    fn path(&self) -> &Path;
}

#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LeadSink for CsvSink {
    fn write(&self, leads: &[LeadRecord]) -> ScrapeResult<usize> {
        debug!("Exporting {} leads to CSV: {}", leads.len(), self.path.display());

        let columns = columns_for(leads);
        let mut wtr = csv::Writer::from_path(&self.path)?;

        wtr.write_record(columns.iter().map(|c| c.header()))?;
        for lead in leads {
            wtr.write_record(columns.iter().map(|c| c.render(lead)))?;
        }
        wtr.flush()?;

        info!("Saved {} leads to {}", leads.len(), self.path.display());
        Ok(leads.len())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    total_leads: usize,
    leads: &'a [LeadRecord],
}

#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LeadSink for JsonSink {
    fn write(&self, leads: &[LeadRecord]) -> ScrapeResult<usize> {
        debug!("Exporting {} leads to JSON: {}", leads.len(), self.path.display());

        let export = JsonExport {
            total_leads: leads.len(),
            leads,
        };
        let json = serde_json::to_string_pretty(&export)?;

        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;

        info!("Saved {} leads to {}", leads.len(), self.path.display());
        Ok(leads.len())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// `JsonSink` for `.json` paths, `CsvSink` for anything else
#[must_use]
pub fn sink_for_path(path: &Path) -> Box<dyn LeadSink> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Box::new(JsonSink::new(path))
    } else {
        Box::new(CsvSink::new(path))
    }
}
