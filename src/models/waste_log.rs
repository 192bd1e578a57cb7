use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::enums::LogFilter;
use super::resin::ResinCatalog;
use crate::pipeline::scan::DetectionResult;

/// A row of the `waste_logs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteLogEntry {
    pub id: i64,
    pub waste_type: String,
    pub quantity: u32,
    pub bin_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WasteLogEntry {
    pub fn is_recyclable(&self) -> bool {
        self.bin_type.contains("Recycling")
    }
}

/// Insert payload for `waste_logs` (id and created_at are assigned by storage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWasteLog {
    pub waste_type: String,
    pub quantity: u32,
    pub bin_type: String,
    pub notes: Option<String>,
}

impl NewWasteLog {
    /// Build a log entry for a scanned item. Scans without a code have nothing to log.
    pub fn from_detection(detection: &DetectionResult, catalog: &ResinCatalog) -> Option<Self> {
        let info = catalog.get(detection.code?)?;

        let mut notes = format!(
            "Camera scan: resin code {} detected with {}% confidence via {}",
            info.code,
            detection.confidence,
            detection.method,
        );
        let raw = detection.raw_text.trim();
        if !raw.is_empty() {
            notes.push_str(&format!("\nRecognized text: {raw}"));
        }

        Some(Self {
            waste_type: info.display_name(),
            quantity: 1,
            bin_type: info.bin_type.as_str().to_string(),
            notes: Some(notes),
        })
    }
}

#[derive(Debug, Default)]
pub struct WasteLogFilter {
    pub query: Option<String>,
    pub filter: LogFilter,
}

/// Apply the log screen's search box and filter chip. Order is preserved.
pub fn filter_logs<'a>(
    entries: &'a [WasteLogEntry],
    filter: &WasteLogFilter,
    now: DateTime<Utc>,
) -> Vec<&'a WasteLogEntry> {
    let query = filter
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let week_ago = now - Duration::days(7);

    entries
        .iter()
        .filter(|e| match &query {
            Some(q) => {
                e.waste_type.to_lowercase().contains(q) || e.bin_type.to_lowercase().contains(q)
            }
            None => true,
        })
        .filter(|e| match filter.filter {
            LogFilter::All => true,
            LogFilter::Today => e.created_at.date_naive() == now.date_naive(),
            LogFilter::ThisWeek => e.created_at >= week_ago,
            LogFilter::Recyclable => e.is_recyclable(),
            LogFilter::NonRecyclable => !e.is_recyclable(),
        })
        .collect()
}
