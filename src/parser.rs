use serde::Deserialize;

use crate::date::CalendarDate;
use crate::error::ParseError;
use crate::ir::{TimelineDocument, TimelineEvent};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    end_year: Option<i32>,
    #[serde(default)]
    vertical: bool,
    #[serde(default)]
    list: bool,
    #[serde(default)]
    events: Option<Vec<TimelineEvent>>,
}

/// Parses a JSON5 timeline document. Every event date is checked up front
/// so a bad entry is reported with its position.
pub fn parse_timeline(input: &str) -> Result<TimelineDocument, ParseError> {
    let file: DocumentFile = json5::from_str(input)?;
    let events = file.events.ok_or(ParseError::MissingEvents)?;
    for (index, event) in events.iter().enumerate() {
        CalendarDate::parse(&event.date).map_err(|source| ParseError::Event { index, source })?;
    }
    Ok(TimelineDocument {
        label: file.label.unwrap_or_default(),
        start_year: file.start_year,
        end_year: file.end_year,
        vertical: file.vertical,
        list: file.list,
        events,
    })
}
