#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod measure;
pub mod navigation;
pub mod parser;
pub mod render;
mod text_metrics;
pub mod theme;
pub mod timeline;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use date::{CalendarDate, DateRange};
pub use error::{LayoutError, ParseError};
pub use ir::{EventKey, TimelineDocument, TimelineEvent};
pub use layout::{ContentSize, LayoutRequest, Mode, TimelineLayout, compute_layout};
pub use parser::parse_timeline;
pub use render::render_svg;
pub use theme::Theme;
pub use timeline::Timeline;

use measure::CardMeasure;

/// Everything needed to turn a document into SVG without touching disk.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub viewport: ContentSize,
}

impl RenderOptions {
    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            layout: LayoutConfig::default(),
            viewport: ContentSize::new(1200.0, 800.0),
        }
    }

    pub fn light() -> Self {
        Self {
            theme: Theme::light(),
            ..Self::dark()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn render_with_options(source: &str, options: RenderOptions) -> anyhow::Result<String> {
    let document = parse_timeline(source)?;
    let measure = CardMeasure::new(&options.layout, &options.theme);
    let mut timeline = Timeline::from_document(&document, options.layout, Box::new(measure));
    timeline.attach(options.viewport)?;
    let layout = timeline
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("no layout was produced"))?;
    Ok(render_svg(
        &layout,
        &document.events,
        &document.label,
        &options.theme,
        timeline.config(),
    ))
}
