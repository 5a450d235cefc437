mod geometry;
mod markers;
mod packer;
pub(crate) mod text;
pub(crate) mod types;
pub use geometry::assemble;
pub(crate) use geometry::fmt_num;
pub use markers::generate_markers;
pub use packer::{Packing, pack_columns, pack_rows};
pub use types::*;

use crate::config::LayoutConfig;
use crate::date::{self, DateRange};
use crate::error::LayoutError;

/// Inputs of one layout pass besides the events themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub mode: Mode,
    pub viewport: ContentSize,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl LayoutRequest {
    pub fn new(mode: Mode, viewport: ContentSize) -> Self {
        Self {
            mode,
            viewport,
            start_year: None,
            end_year: None,
        }
    }

    pub fn with_years(mut self, start_year: Option<i32>, end_year: Option<i32>) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }
}

/// Runs one complete pass: sort, resolve the range, pack, assemble.
///
/// Pure and deterministic: equal inputs give equal layouts, down to the
/// path strings. Events sharing a date keep their input order.
pub fn compute_layout(
    events: &[EventBox],
    request: &LayoutRequest,
    config: &LayoutConfig,
) -> Result<TimelineLayout, LayoutError> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.date);

    if request.mode == Mode::List {
        return Ok(compute_list_layout(&sorted, request));
    }

    let dates: Vec<_> = sorted.iter().map(|event| event.date).collect();
    let range = DateRange::resolve(
        request.start_year,
        request.end_year,
        &dates,
        config.range_padding_months,
    );
    if let Some(range) = &range {
        range.validate()?;
    }

    let margin = config.axis_margin;
    let viewport = request.viewport;
    let layout = match request.mode {
        Mode::Vertical => {
            let length = viewport.height.max(config.min_content_dim);
            let time = |date| match &range {
                Some(range) => date::position(date, range, length, margin),
                None => margin,
            };
            let axis_x = viewport.width / 2.0;
            let packing = pack_columns(&sorted, time, axis_x, config);
            let axis = Axis::Vertical { x: axis_x };
            let markers = range
                .map(|range| generate_markers(&range, length, margin, axis, &config.marker))
                .unwrap_or_default();
            let geometry = assemble(&packing.events, axis, length, margin, time, markers);
            TimelineLayout {
                mode: Mode::Vertical,
                width: viewport.width,
                height: length,
                range,
                lane_count: packing.lane_count,
                events: packing.events,
                geometry,
            }
        }
        _ => {
            let length = viewport.width.max(config.min_content_dim);
            let time = |date| match &range {
                Some(range) => date::position(date, range, length, margin),
                None => margin,
            };
            let packing = pack_rows(&sorted, time, config);
            let height = (config.top_margin
                + packing.lane_count as f64 * config.row_gap
                + config.bottom_padding)
                .max(config.min_container_height);
            let axis = Axis::Horizontal {
                y: height - config.axis_inset,
            };
            let markers = range
                .map(|range| generate_markers(&range, length, margin, axis, &config.marker))
                .unwrap_or_default();
            let geometry = assemble(&packing.events, axis, length, margin, time, markers);
            TimelineLayout {
                mode: Mode::Horizontal,
                width: length,
                height,
                range,
                lane_count: packing.lane_count,
                events: packing.events,
                geometry,
            }
        }
    };

    tracing::trace!(
        mode = ?layout.mode,
        events = layout.events.len(),
        lanes = layout.lane_count,
        width = layout.width,
        height = layout.height,
        "timeline layout computed"
    );
    Ok(layout)
}

/// List mode keeps date order only; the host flows the cards itself.
fn compute_list_layout(sorted: &[EventBox], request: &LayoutRequest) -> TimelineLayout {
    let events = sorted
        .iter()
        .map(|event| EventLayout {
            key: event.key,
            date: event.date,
            x: 0.0,
            y: 0.0,
            width: event.width,
            height: event.height,
            side: None,
            lane: 0,
        })
        .collect();
    TimelineLayout {
        mode: Mode::List,
        width: request.viewport.width,
        height: request.viewport.height,
        range: None,
        lane_count: 0,
        events,
        geometry: GeometryBundle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;
    use crate::ir::EventKey;

    fn boxed(key: usize, date: &str) -> EventBox {
        EventBox {
            key: EventKey(key),
            date: CalendarDate::parse(date).unwrap(),
            width: 250.0,
            height: 300.0,
        }
    }

    fn request(mode: Mode) -> LayoutRequest {
        LayoutRequest::new(mode, ContentSize::new(1200.0, 800.0))
    }

    #[test]
    fn mode_selection_prefers_list() {
        assert_eq!(Mode::select(true, true), Mode::List);
        assert_eq!(Mode::select(true, false), Mode::List);
        assert_eq!(Mode::select(false, true), Mode::Vertical);
        assert_eq!(Mode::select(false, false), Mode::Horizontal);
    }

    #[test]
    fn horizontal_enforces_minimum_width() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&[boxed(0, "2024-01-01")], &request(Mode::Horizontal), &config)
            .unwrap();
        assert_eq!(layout.width, 1800.0);
        assert_eq!(layout.height, 20.0 + 330.0 + 150.0);
        assert_eq!(layout.geometry.axis_path, "M 60,440 H 1740");
    }

    #[test]
    fn wide_viewport_is_used_as_is() {
        let config = LayoutConfig::default();
        let req = LayoutRequest::new(Mode::Horizontal, ContentSize::new(2400.0, 800.0));
        let layout = compute_layout(&[boxed(0, "2024-01-01")], &req, &config).unwrap();
        assert_eq!(layout.width, 2400.0);
    }

    #[test]
    fn sorts_by_date_and_keeps_ties_in_input_order() {
        let config = LayoutConfig::default();
        let events = [
            boxed(0, "2024-05-01"),
            boxed(1, "2024-01-01"),
            boxed(2, "2024-05-01"),
            boxed(3, "2023-12-01"),
        ];
        let layout = compute_layout(&events, &request(Mode::List), &config).unwrap();
        let keys: Vec<usize> = layout.events.iter().map(|e| e.key.0).collect();
        assert_eq!(keys, vec![3, 1, 0, 2]);
    }

    #[test]
    fn list_mode_has_no_geometry() {
        let config = LayoutConfig::default();
        let layout =
            compute_layout(&[boxed(0, "2024-01-01")], &request(Mode::List), &config).unwrap();
        assert!(layout.geometry.is_empty());
        assert_eq!((layout.events[0].x, layout.events[0].y), (0.0, 0.0));
    }

    #[test]
    fn empty_horizontal_layout_is_well_formed() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&[], &request(Mode::Horizontal), &config).unwrap();
        assert_eq!(layout.lane_count, 0);
        assert_eq!(layout.height, 170.0);
        assert_eq!(layout.geometry.axis_path, "M 60,110 H 1740");
        assert!(layout.geometry.connector_paths.is_empty());
        assert!(layout.geometry.dot_positions.is_empty());
        assert!(layout.geometry.markers.is_empty());
        assert!(layout.range.is_none());
    }

    #[test]
    fn empty_vertical_layout_is_well_formed() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&[], &request(Mode::Vertical), &config).unwrap();
        assert_eq!(layout.geometry.axis_path, "M 600,60 V 1740");
        assert!(layout.geometry.connector_paths.is_empty());
    }

    #[test]
    fn degenerate_explicit_range_is_reported() {
        let config = LayoutConfig::default();
        let req = request(Mode::Horizontal).with_years(Some(2000), Some(2000));
        let err = compute_layout(&[boxed(0, "2000-06-01")], &req, &config).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateRange { .. }));
    }

    #[test]
    fn vertical_places_cards_around_centered_axis() {
        let config = LayoutConfig::default();
        let events = [boxed(0, "2024-01-01"), boxed(1, "2024-01-01")];
        let layout = compute_layout(&events, &request(Mode::Vertical), &config).unwrap();
        assert_eq!(layout.width, 1200.0);
        assert_eq!(layout.height, 1800.0);
        assert_eq!(layout.events[0].side, Some(Side::Left));
        assert_eq!(layout.events[0].x, 600.0 - 100.0 - 250.0);
        assert_eq!(layout.events[1].side, Some(Side::Right));
        assert_eq!(layout.events[1].x, 700.0);
        assert!(layout.geometry.dot_positions.iter().all(|p| p.x == 600.0));
    }
}
