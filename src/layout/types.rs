use serde::Serialize;

use crate::date::{CalendarDate, DateRange};
use crate::ir::EventKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Horizontal,
    Vertical,
    List,
}

impl Mode {
    /// `list` wins over `vertical`.
    pub fn select(list: bool, vertical: bool) -> Self {
        if list {
            Mode::List
        } else if vertical {
            Mode::Vertical
        } else {
            Mode::Horizontal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Orientation of the time axis and its fixed cross-axis offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Axis {
    /// Time runs left to right along `y`.
    Horizontal { y: f64 },
    /// Time runs top to bottom along `x`.
    Vertical { x: f64 },
}

/// Content-box size of the host container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

impl ContentSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One event as seen by the packer: a date and a measured box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventBox {
    pub key: EventKey,
    pub date: CalendarDate,
    pub width: f64,
    pub height: f64,
}

/// Placement of one event. `x`/`y` are the card's top-left corner in
/// content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventLayout {
    pub key: EventKey,
    pub date: CalendarDate,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Row (horizontal) or frontier (vertical) the packer chose.
    pub lane: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub tick_line: LineSegment,
    pub label: MarkerLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Everything the rendering layer draws besides the cards themselves.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeometryBundle {
    pub axis_path: String,
    pub connector_paths: Vec<String>,
    pub dot_positions: Vec<Point>,
    pub markers: Vec<MarkerDescriptor>,
}

impl GeometryBundle {
    pub fn is_empty(&self) -> bool {
        self.axis_path.is_empty()
            && self.connector_paths.is_empty()
            && self.dot_positions.is_empty()
            && self.markers.is_empty()
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub mode: Mode,
    pub width: f64,
    pub height: f64,
    pub range: Option<DateRange>,
    /// Rows (horizontal) or frontiers (vertical) opened by the packer.
    pub lane_count: usize,
    /// Events in date order.
    pub events: Vec<EventLayout>,
    pub geometry: GeometryBundle,
}

impl TimelineLayout {
    pub fn event(&self, key: EventKey) -> Option<&EventLayout> {
        self.events.iter().find(|event| event.key == key)
    }
}
