//! Greedy first-fit placement of date-sorted cards into rows or columns.
//!
//! Each lane remembers its frontier: the first coordinate past the last card
//! placed in it, plus the item gap. A card goes into the lowest-index lane
//! whose frontier lies strictly before the card's leading edge, or opens a
//! new lane. There is no backtracking, so earlier lanes (closer to the axis)
//! always fill first and the result depends only on input order.

use crate::config::LayoutConfig;
use crate::date::CalendarDate;

use super::{EventBox, EventLayout, Side};

#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub events: Vec<EventLayout>,
    pub lane_count: usize,
}

fn first_fit(frontiers: &[f64], start: f64) -> Option<usize> {
    frontiers.iter().position(|frontier| *frontier < start)
}

fn claim(frontiers: &mut Vec<f64>, start: f64, next_frontier: f64) -> usize {
    match first_fit(frontiers, start) {
        Some(lane) => {
            frontiers[lane] = next_frontier;
            lane
        }
        None => {
            frontiers.push(next_frontier);
            frontiers.len() - 1
        }
    }
}

/// Horizontal mode: cards are centred on their time coordinate and stacked
/// into rows `row_gap` apart, row 0 nearest the top.
pub fn pack_rows<F>(events: &[EventBox], time_x: F, config: &LayoutConfig) -> Packing
where
    F: Fn(CalendarDate) -> f64,
{
    let mut frontiers: Vec<f64> = Vec::new();
    let mut placed = Vec::with_capacity(events.len());

    for event in events {
        let start_x = time_x(event.date) - event.width / 2.0;
        let lane = claim(
            &mut frontiers,
            start_x,
            start_x + event.width + config.row_item_gap,
        );
        placed.push(EventLayout {
            key: event.key,
            date: event.date,
            x: start_x,
            y: config.top_margin + lane as f64 * config.row_gap,
            width: event.width,
            height: event.height,
            side: None,
            lane,
        });
    }

    Packing {
        events: placed,
        lane_count: frontiers.len(),
    }
}

/// Vertical mode: cards are centred on their time coordinate and packed
/// into frontiers that alternate sides of the axis. Frontier `i` sits on the
/// left when `i` is even and on the right when odd; `i / 2` is its column,
/// counted outwards from the axis.
pub fn pack_columns<F>(events: &[EventBox], time_y: F, axis_x: f64, config: &LayoutConfig) -> Packing
where
    F: Fn(CalendarDate) -> f64,
{
    let mut frontiers: Vec<f64> = Vec::new();
    let mut placed = Vec::with_capacity(events.len());

    for event in events {
        let start_y = time_y(event.date) - event.height / 2.0;
        let lane = claim(
            &mut frontiers,
            start_y,
            start_y + event.height + config.column_item_gap,
        );
        let side = if lane % 2 == 0 { Side::Left } else { Side::Right };
        let column = (lane / 2) as f64;
        let stride = column * (event.width + config.column_stride_gap);
        let x = match side {
            Side::Left => axis_x - config.column_gap - event.width - stride,
            Side::Right => axis_x + config.column_gap + stride,
        };
        placed.push(EventLayout {
            key: event.key,
            date: event.date,
            x,
            y: start_y,
            width: event.width,
            height: event.height,
            side: Some(side),
            lane,
        });
    }

    Packing {
        events: placed,
        lane_count: frontiers.len(),
    }
}
