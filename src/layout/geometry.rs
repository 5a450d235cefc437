use crate::date::CalendarDate;

use super::{Axis, EventLayout, GeometryBundle, MarkerDescriptor, Point, Side};

/// Shortest round-trip form of `value`; negative zero prints as `0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Builds the axis, connectors and dots for a packed set of cards.
///
/// Connectors and dots meet the axis at each card's date coordinate, not at
/// its packed position, so a connector can run diagonally across the gap
/// between a displaced card and its true point in time.
pub fn assemble<F>(
    placed: &[EventLayout],
    axis: Axis,
    axis_length: f64,
    margin: f64,
    time: F,
    markers: Vec<MarkerDescriptor>,
) -> GeometryBundle
where
    F: Fn(CalendarDate) -> f64,
{
    let mut connector_paths = Vec::with_capacity(placed.len());
    let mut dot_positions = Vec::with_capacity(placed.len());

    let axis_path = match axis {
        Axis::Horizontal { y: axis_y } => {
            for event in placed {
                let x = time(event.date);
                connector_paths.push(format!(
                    "M {},{} V {}",
                    fmt_num(x),
                    fmt_num(event.y + event.height),
                    fmt_num(axis_y)
                ));
                dot_positions.push(Point { x, y: axis_y });
            }
            format!(
                "M {},{} H {}",
                fmt_num(margin),
                fmt_num(axis_y),
                fmt_num(axis_length - margin)
            )
        }
        Axis::Vertical { x: axis_x } => {
            for event in placed {
                let y = time(event.date);
                let edge = match event.side {
                    Some(Side::Left) => event.x + event.width,
                    _ => event.x,
                };
                connector_paths.push(format!(
                    "M {},{} H {}",
                    fmt_num(edge),
                    fmt_num(y),
                    fmt_num(axis_x)
                ));
                dot_positions.push(Point { x: axis_x, y });
            }
            format!(
                "M {},{} V {}",
                fmt_num(axis_x),
                fmt_num(margin),
                fmt_num(axis_length - margin)
            )
        }
    };

    GeometryBundle {
        axis_path,
        connector_paths,
        dot_positions,
        markers,
    }
}
