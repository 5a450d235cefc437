use crate::ir::TimelineEvent;
use crate::layout::{GeometryBundle, Mode, Side, TimelineLayout};
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub mode: Mode,
    pub width: f64,
    pub height: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub lane_count: usize,
    pub events: Vec<EventDump>,
    pub geometry: GeometryBundle,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDump {
    pub index: usize,
    pub date: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    pub lane: usize,
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout, events: &[TimelineEvent]) -> Self {
        let events = layout
            .events
            .iter()
            .map(|placed| EventDump {
                index: placed.key.0,
                date: placed.date.to_string(),
                title: events
                    .get(placed.key.0)
                    .map(TimelineEvent::display_title)
                    .unwrap_or_default(),
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                side: placed.side,
                lane: placed.lane,
            })
            .collect();

        LayoutDump {
            mode: layout.mode,
            width: layout.width,
            height: layout.height,
            start_date: layout.range.map(|range| range.start.to_string()),
            end_date: layout.range.map(|range| range.end.to_string()),
            lane_count: layout.lane_count,
            events,
            geometry: layout.geometry.clone(),
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &TimelineLayout,
    events: &[TimelineEvent],
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create layout dump {}", path.display()))?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, events);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ContentSize, LayoutRequest, compute_layout};
    use crate::measure::{CardSize, FixedMeasure, measure_events};

    #[test]
    fn dump_serialises_placements_and_geometry() {
        let events = vec![
            TimelineEvent::new("2024-02-01").with_title("B"),
            TimelineEvent::new("2024-01-01").with_title("A"),
        ];
        let provider = FixedMeasure(CardSize {
            width: 250.0,
            height: 265.0,
        });
        let boxes = measure_events(&events, &provider).unwrap();
        let request = LayoutRequest::new(Mode::Vertical, ContentSize::new(1200.0, 800.0));
        let layout = compute_layout(&boxes, &request, &Default::default()).unwrap();

        let dump = LayoutDump::from_layout(&layout, &events);
        assert_eq!(dump.events[0].title, "A");
        assert_eq!(dump.events[0].index, 1);
        assert_eq!(dump.start_date.as_deref(), Some("2023-11-01"));

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["mode"], "vertical");
        assert_eq!(json["events"][0]["side"], "left");
        assert_eq!(json["geometry"]["connector_paths"].as_array().unwrap().len(), 2);
    }
}
