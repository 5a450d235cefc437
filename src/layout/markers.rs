use crate::config::MarkerConfig;
use crate::date::{self, CalendarDate, DateRange, MS_PER_JULIAN_YEAR};

use super::{Axis, LineSegment, MarkerDescriptor, MarkerLabel, TextAnchor};

/// Tick marks and labels along the axis.
///
/// Ranges up to `monthly_threshold_years` get one marker per calendar month,
/// starting at the first of `range.start`'s month. Longer ranges get a marker
/// on January 1st of every year divisible by `year_step`.
pub fn generate_markers(
    range: &DateRange,
    axis_length: f64,
    margin: f64,
    axis: Axis,
    config: &MarkerConfig,
) -> Vec<MarkerDescriptor> {
    let duration = range.duration_ms();
    if range.end < range.start || duration.is_nan() || duration <= 0.0 {
        return Vec::new();
    }

    let place = |date: CalendarDate, text: String| {
        let pos = date::position(date, range, axis_length, margin);
        marker_at(pos, text, axis, config)
    };

    let mut markers = Vec::new();
    if duration <= config.monthly_threshold_years * MS_PER_JULIAN_YEAR {
        let mut current = range.start.first_of_month();
        while current <= range.end {
            markers.push(place(current, date::format_month_label(current)));
            match current.add_months(1) {
                Some(next) => current = next,
                None => break,
            }
        }
    } else {
        let step = config.year_step.max(1);
        for year in range.start.year()..=range.end.year() {
            if year.rem_euclid(step) != 0 {
                continue;
            }
            if let Some(jan_first) = CalendarDate::from_ymd(year, 1, 1) {
                markers.push(place(jan_first, year.to_string()));
            }
        }
    }
    markers
}

fn marker_at(pos: f64, text: String, axis: Axis, config: &MarkerConfig) -> MarkerDescriptor {
    let half = config.tick_half_length;
    match axis {
        Axis::Horizontal { y } => MarkerDescriptor {
            tick_line: LineSegment {
                x1: pos,
                y1: y - half,
                x2: pos,
                y2: y + half,
            },
            label: MarkerLabel {
                text,
                x: pos,
                y: y + config.horizontal_label_offset,
                anchor: TextAnchor::Middle,
            },
        },
        Axis::Vertical { x } => MarkerDescriptor {
            tick_line: LineSegment {
                x1: x - half,
                y1: pos,
                x2: x + half,
                y2: pos,
            },
            label: MarkerLabel {
                text,
                x: x - config.vertical_label_offset,
                y: pos + config.vertical_label_baseline,
                anchor: TextAnchor::End,
            },
        },
    }
}
