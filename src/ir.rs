use serde::{Deserialize, Serialize};

/// Opaque handle back to an input event: its index in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventKey(pub usize);

/// One card on the timeline as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_src: Option<String>,
    /// Measured width, when the host already knows it.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl TimelineEvent {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Heading shown on the card, falling back to one derived from the date.
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Event on {}", crate::date::format_date(&self.date)),
        }
    }
}

/// A parsed timeline document: events plus the presentation flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineDocument {
    pub label: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub vertical: bool,
    pub list: bool,
    pub events: Vec<TimelineEvent>,
}
