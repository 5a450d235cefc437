//! The stateful owner of a timeline: holds the inputs, reruns the layout on
//! every trigger and publishes the result as an immutable snapshot.

use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::ir::{TimelineDocument, TimelineEvent};
use crate::layout::{ContentSize, LayoutRequest, Mode, TimelineLayout, compute_layout};
use crate::measure::{MeasureEvent, measure_events};
use crate::navigation::{FocusCursor, NavKey};

pub struct Timeline {
    events: Vec<TimelineEvent>,
    list: bool,
    vertical: bool,
    start_year: Option<i32>,
    end_year: Option<i32>,
    config: LayoutConfig,
    measure: Box<dyn MeasureEvent>,
    /// `Some` while attached to a container.
    content: Option<ContentSize>,
    snapshot: Option<Arc<TimelineLayout>>,
    cursor: FocusCursor,
}

impl Timeline {
    pub fn new(config: LayoutConfig, measure: Box<dyn MeasureEvent>) -> Self {
        Self {
            events: Vec::new(),
            list: false,
            vertical: false,
            start_year: None,
            end_year: None,
            config,
            measure,
            content: None,
            snapshot: None,
            cursor: FocusCursor::default(),
        }
    }

    pub fn from_document(
        document: &TimelineDocument,
        config: LayoutConfig,
        measure: Box<dyn MeasureEvent>,
    ) -> Self {
        let mut timeline = Self::new(config, measure);
        timeline.events = document.events.clone();
        timeline.list = document.list;
        timeline.vertical = document.vertical;
        timeline.start_year = document.start_year;
        timeline.end_year = document.end_year;
        timeline
    }

    pub fn mode(&self) -> Mode {
        Mode::select(self.list, self.vertical)
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.content.is_some()
    }

    /// Latest published layout. Readers keep a consistent view even if a
    /// recompute replaces it afterwards.
    pub fn snapshot(&self) -> Option<Arc<TimelineLayout>> {
        self.snapshot.clone()
    }

    pub fn attach(&mut self, size: ContentSize) -> Result<(), LayoutError> {
        self.content = Some(size);
        self.cursor.reset(self.events.len());
        self.recompute()
    }

    /// Content box changed size.
    pub fn resize(&mut self, size: ContentSize) -> Result<(), LayoutError> {
        if self.content.is_none() {
            return Ok(());
        }
        self.content = Some(size);
        self.recompute()
    }

    /// Stops reacting to triggers. The last snapshot stays readable.
    pub fn detach(&mut self) {
        self.content = None;
        tracing::debug!("timeline detached");
    }

    pub fn set_events(&mut self, events: Vec<TimelineEvent>) -> Result<(), LayoutError> {
        self.events = events;
        self.cursor.reset(self.events.len());
        self.recompute()
    }

    pub fn push_event(&mut self, event: TimelineEvent) -> Result<(), LayoutError> {
        self.events.push(event);
        self.cursor = FocusCursor::new(self.events.len());
        self.recompute()
    }

    pub fn set_vertical(&mut self, vertical: bool) -> Result<(), LayoutError> {
        if self.vertical == vertical {
            return Ok(());
        }
        self.vertical = vertical;
        self.recompute()
    }

    pub fn set_list(&mut self, list: bool) -> Result<(), LayoutError> {
        if self.list == list {
            return Ok(());
        }
        self.list = list;
        self.recompute()
    }

    /// Both years are needed for the override to take effect.
    pub fn set_year_range(
        &mut self,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Result<(), LayoutError> {
        self.start_year = start_year;
        self.end_year = end_year;
        self.recompute()
    }

    pub fn set_row_gap(&mut self, row_gap: f64) -> Result<(), LayoutError> {
        self.config.row_gap = row_gap;
        self.recompute()
    }

    pub fn set_column_gap(&mut self, column_gap: f64) -> Result<(), LayoutError> {
        self.config.column_gap = column_gap;
        self.recompute()
    }

    pub fn cursor(&self) -> &FocusCursor {
        &self.cursor
    }

    pub fn handle_key(&mut self, key: NavKey, focused: usize) -> Option<usize> {
        let mode = self.mode();
        self.cursor.handle_key(key, focused, mode)
    }

    /// Reruns the full pass and swaps in the new snapshot. On failure the
    /// previous snapshot is kept.
    pub fn recompute(&mut self) -> Result<(), LayoutError> {
        let Some(content) = self.content else {
            return Ok(());
        };
        let request = LayoutRequest::new(self.mode(), content)
            .with_years(self.start_year, self.end_year);
        let span = tracing::debug_span!("recompute", mode = ?request.mode, events = self.events.len());
        let _guard = span.enter();

        let result = measure_events(&self.events, self.measure.as_ref())
            .and_then(|boxes| compute_layout(&boxes, &request, &self.config));
        match result {
            Ok(layout) => {
                tracing::debug!(
                    width = layout.width,
                    height = layout.height,
                    lanes = layout.lane_count,
                    "layout published"
                );
                self.snapshot = Some(Arc::new(layout));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "layout recompute failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{CardSize, FixedMeasure};

    fn timeline() -> Timeline {
        Timeline::new(
            LayoutConfig::default(),
            Box::new(FixedMeasure(CardSize {
                width: 250.0,
                height: 265.0,
            })),
        )
    }

    #[test]
    fn triggers_before_attach_only_record_state() {
        let mut tl = timeline();
        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        assert!(tl.snapshot().is_none());
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        assert_eq!(tl.snapshot().unwrap().events.len(), 1);
    }

    #[test]
    fn resize_replaces_snapshot_without_touching_old_one() {
        let mut tl = timeline();
        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        let before = tl.snapshot().unwrap();
        tl.resize(ContentSize::new(2600.0, 600.0)).unwrap();
        let after = tl.snapshot().unwrap();
        assert_eq!(before.width, 1800.0);
        assert_eq!(after.width, 2600.0);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn mode_flags_switch_layouts() {
        let mut tl = timeline();
        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        tl.set_vertical(true).unwrap();
        assert_eq!(tl.snapshot().unwrap().mode, Mode::Vertical);
        tl.set_list(true).unwrap();
        assert_eq!(tl.snapshot().unwrap().mode, Mode::List);
        tl.set_list(false).unwrap();
        assert_eq!(tl.snapshot().unwrap().mode, Mode::Vertical);
    }

    #[test]
    fn failed_recompute_keeps_previous_snapshot() {
        let mut tl = timeline();
        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        let before = tl.snapshot().unwrap();

        let err = tl.push_event(TimelineEvent::new("2024-13-01")).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidDate { .. }));
        assert!(Arc::ptr_eq(&before, &tl.snapshot().unwrap()));

        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        let err = tl.set_year_range(Some(2024), Some(2024)).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateRange { .. }));
    }

    #[test]
    fn row_gap_override_moves_rows() {
        let mut tl = timeline();
        tl.set_events(vec![
            TimelineEvent::new("2024-01-01"),
            TimelineEvent::new("2024-01-01"),
        ])
        .unwrap();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        tl.set_row_gap(200.0).unwrap();
        let layout = tl.snapshot().unwrap();
        assert_eq!(layout.events[1].y, 220.0);
        assert_eq!(layout.height, 20.0 + 2.0 * 200.0 + 150.0);
    }

    #[test]
    fn detach_stops_recomputing() {
        let mut tl = timeline();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        tl.detach();
        tl.set_events(vec![TimelineEvent::new("2024-01-01")]).unwrap();
        assert!(tl.snapshot().unwrap().events.is_empty());
        tl.resize(ContentSize::new(3000.0, 600.0)).unwrap();
        assert_eq!(tl.snapshot().unwrap().width, 1800.0);
    }

    #[test]
    fn keyboard_follows_mode() {
        let mut tl = timeline();
        tl.set_events(vec![
            TimelineEvent::new("2024-01-01"),
            TimelineEvent::new("2024-02-01"),
        ])
        .unwrap();
        tl.attach(ContentSize::new(1000.0, 600.0)).unwrap();
        assert_eq!(tl.handle_key(NavKey::ArrowRight, 0), Some(1));
        tl.set_vertical(true).unwrap();
        assert_eq!(tl.handle_key(NavKey::ArrowRight, 1), None);
        assert_eq!(tl.handle_key(NavKey::ArrowUp, 1), Some(0));
        assert_eq!(tl.cursor().tab_index(0), 0);
    }
}
