//! Measurement providers: where card sizes come from.
//!
//! The layout engine never measures anything itself. A host that renders
//! cards reports their boxes through [`MeasureEvent`]; headless callers use
//! [`CardMeasure`], which predicts the box of the standard card.

use crate::config::{CardConfig, LayoutConfig};
use crate::date::CalendarDate;
use crate::error::LayoutError;
use crate::ir::{EventKey, TimelineEvent};
use crate::layout::EventBox;
use crate::layout::text::{TextBlock, measure_block};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

pub trait MeasureEvent {
    fn measure(&self, event: &TimelineEvent) -> CardSize;
}

impl<F> MeasureEvent for F
where
    F: Fn(&TimelineEvent) -> CardSize,
{
    fn measure(&self, event: &TimelineEvent) -> CardSize {
        self(event)
    }
}

/// Same box for every card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure(pub CardSize);

impl MeasureEvent for FixedMeasure {
    fn measure(&self, _event: &TimelineEvent) -> CardSize {
        self.0
    }
}

/// Text inside a card after wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub title: TextBlock,
    pub description: TextBlock,
}

/// Predicts the box of the standard card: an image band on top, then a
/// padded content area holding a clamped heading and description.
#[derive(Debug, Clone)]
pub struct CardMeasure {
    card: CardConfig,
    font_family: String,
    fast_metrics: bool,
}

impl CardMeasure {
    pub fn new(config: &LayoutConfig, theme: &Theme) -> Self {
        Self {
            card: config.card.clone(),
            font_family: theme.font_family.clone(),
            fast_metrics: config.fast_text_metrics,
        }
    }

    pub fn content(&self, event: &TimelineEvent, width: f64) -> CardContent {
        let card = &self.card;
        let inner = (width - 2.0 * card.content_padding).max(1.0);
        let title = measure_block(
            &event.display_title(),
            card.heading_font_size,
            1.2,
            inner,
            card.heading_max_lines,
            &self.font_family,
            self.fast_metrics,
        );
        let description = measure_block(
            event.description.as_deref().unwrap_or_default(),
            card.text_font_size,
            card.text_line_height,
            inner,
            card.text_max_lines,
            &self.font_family,
            self.fast_metrics,
        );
        CardContent { title, description }
    }
}

impl MeasureEvent for CardMeasure {
    fn measure(&self, event: &TimelineEvent) -> CardSize {
        let card = &self.card;
        let content = self.content(event, card.width);
        let mut text_height = content.title.height + content.description.height;
        if !content.title.lines.is_empty() && !content.description.lines.is_empty() {
            text_height += card.heading_gap;
        }
        let content_height = (text_height + 2.0 * card.content_padding).max(card.content_min_height);
        CardSize {
            width: card.width,
            height: card.image_height + content_height,
        }
    }
}

/// Parses every event date and resolves its box. Sizes carried on the event
/// win over the provider.
pub fn measure_events(
    events: &[TimelineEvent],
    provider: &dyn MeasureEvent,
) -> Result<Vec<EventBox>, LayoutError> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let date = CalendarDate::parse(&event.date)?;
            let size = match (event.width, event.height) {
                (Some(width), Some(height)) => CardSize { width, height },
                (width, height) => {
                    let measured = provider.measure(event);
                    CardSize {
                        width: width.unwrap_or(measured.width),
                        height: height.unwrap_or(measured.height),
                    }
                }
            };
            Ok(EventBox {
                key: EventKey(index),
                date,
                width: size.width,
                height: size.height,
            })
        })
        .collect()
}
