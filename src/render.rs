use crate::config::{LayoutConfig, RenderConfig};
use crate::date::format_date;
use crate::ir::TimelineEvent;
use crate::layout::text::TextBlock;
use crate::layout::{EventLayout, GeometryBundle, Mode, TimelineLayout, fmt_num};
use crate::measure::CardMeasure;
use crate::theme::Theme;
use anyhow::{Context, Result};
use std::path::Path;

const HEADING_LINE_HEIGHT: f64 = 1.2;
const BOUNDS_PAD: f64 = 10.0;

/// A card box ready to draw, in document coordinates.
struct CardPlacement<'a> {
    event: &'a TimelineEvent,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    show_date: bool,
}

pub fn render_svg(
    layout: &TimelineLayout,
    events: &[TimelineEvent],
    label: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let measure = CardMeasure::new(config, theme);
    let cards = match layout.mode {
        Mode::List => flow_list(layout, events, &measure, config),
        _ => layout
            .events
            .iter()
            .filter_map(|placed| place_card(placed, events))
            .collect(),
    };

    let (min_x, min_y, max_x, max_y) = bounds(layout, &cards);
    let width = max_x - min_x;
    let height = max_y - min_y;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{x} {y} {w} {h}\" role=\"region\" aria-label=\"{label}\">",
        w = fmt_num(width),
        h = fmt_num(height),
        x = fmt_num(min_x),
        y = fmt_num(min_y),
        label = escape_xml(label),
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        fmt_num(min_x),
        fmt_num(min_y),
        fmt_num(width),
        fmt_num(height),
        theme.background
    ));

    if layout.mode != Mode::List {
        svg.push_str(&geometry_svg(&layout.geometry, theme));
    }

    svg.push_str("<g class=\"events\">");
    for card in &cards {
        svg.push_str(&card_svg(card, &measure, theme, config));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn place_card<'a>(placed: &EventLayout, events: &'a [TimelineEvent]) -> Option<CardPlacement<'a>> {
    let event = events.get(placed.key.0)?;
    Some(CardPlacement {
        event,
        x: placed.x,
        y: placed.y,
        width: placed.width,
        height: placed.height,
        show_date: false,
    })
}

/// List mode: full-width cards stacked in date order, each showing its date.
fn flow_list<'a>(
    layout: &TimelineLayout,
    events: &'a [TimelineEvent],
    measure: &CardMeasure,
    config: &LayoutConfig,
) -> Vec<CardPlacement<'a>> {
    let list = &config.list;
    let card = &config.card;
    let width = (layout.width - 2.0 * list.padding)
        .min(list.max_event_width)
        .max(card.width);
    let mut y = list.padding;
    let mut cards = Vec::with_capacity(layout.events.len());
    for placed in &layout.events {
        let Some(event) = events.get(placed.key.0) else {
            continue;
        };
        let content = measure.content(event, width);
        let mut text_height =
            list.date_font_size + list.date_gap + content.title.height + content.description.height;
        if !content.description.lines.is_empty() {
            text_height += card.heading_gap;
        }
        let height = card.image_height
            + (text_height + 2.0 * card.content_padding).max(card.content_min_height);
        cards.push(CardPlacement {
            event,
            x: list.padding,
            y,
            width,
            height,
            show_date: true,
        });
        y += height + list.gap;
    }
    cards
}

fn bounds(layout: &TimelineLayout, cards: &[CardPlacement<'_>]) -> (f64, f64, f64, f64) {
    let mut min_x: f64 = 0.0;
    let mut min_y: f64 = 0.0;
    let mut max_x = layout.width.max(1.0);
    let mut max_y = layout.height.max(1.0);
    for card in cards {
        min_x = min_x.min(card.x - BOUNDS_PAD);
        min_y = min_y.min(card.y - BOUNDS_PAD);
        max_x = max_x.max(card.x + card.width + BOUNDS_PAD);
        max_y = max_y.max(card.y + card.height + BOUNDS_PAD);
    }
    (min_x, min_y, max_x, max_y)
}

fn geometry_svg(geometry: &GeometryBundle, theme: &Theme) -> String {
    let mut out = String::from("<g class=\"svg-layer\" aria-hidden=\"true\">");
    out.push_str(&format!(
        "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" part=\"axis-line\"/>",
        geometry.axis_path,
        theme.axis_color,
        fmt_num(theme.axis_width)
    ));
    for d in &geometry.connector_paths {
        out.push_str(&format!(
            "<path d=\"{d}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" part=\"connector-line\"/>",
            theme.connector_color,
            fmt_num(theme.connector_width)
        ));
    }
    for marker in &geometry.markers {
        let line = &marker.tick_line;
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"2\" part=\"marker-tick\"/>",
            fmt_num(line.x1),
            fmt_num(line.y1),
            fmt_num(line.x2),
            fmt_num(line.y2),
            theme.marker_color
        ));
        out.push_str(&format!(
            "<text class=\"marker-text\" x=\"{}\" y=\"{}\" text-anchor=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" part=\"marker-text\">{}</text>",
            fmt_num(marker.label.x),
            fmt_num(marker.label.y),
            marker.label.anchor.as_str(),
            escape_xml(&theme.font_family),
            fmt_num(theme.marker_font_size),
            theme.marker_text_color,
            escape_xml(&marker.label.text)
        ));
    }
    for dot in &geometry.dot_positions {
        out.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" part=\"dot\"/>",
            fmt_num(dot.x),
            fmt_num(dot.y),
            fmt_num(theme.dot_size),
            theme.dot_color
        ));
    }
    out.push_str("</g>");
    out
}

fn card_svg(
    card: &CardPlacement<'_>,
    measure: &CardMeasure,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let style = &config.card;
    let event = card.event;
    let title = event.display_title();
    let mut out = format!(
        "<g class=\"timeline-event\" role=\"article\" aria-label=\"{}\">",
        escape_xml(&title)
    );
    out.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" part=\"card\"/>",
        fmt_num(card.x),
        fmt_num(card.y),
        fmt_num(card.width),
        fmt_num(card.height),
        theme.event_background,
        theme.event_border,
        r = fmt_num(style.corner_radius),
    ));

    let band_center_x = card.x + card.width / 2.0;
    match event.image_src.as_deref() {
        Some(src) if !src.trim().is_empty() => out.push_str(&format!(
            "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\" part=\"image\"/>",
            escape_xml(src),
            fmt_num(card.x),
            fmt_num(card.y),
            fmt_num(card.width),
            fmt_num(style.image_height)
        )),
        _ => {
            out.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" part=\"image-placeholder\"/>",
                fmt_num(card.x),
                fmt_num(card.y),
                fmt_num(card.width),
                fmt_num(style.image_height),
                theme.placeholder_background
            ));
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">Timeline event for {}</text>",
                fmt_num(band_center_x),
                fmt_num(card.y + style.image_height / 2.0),
                escape_xml(&theme.font_family),
                fmt_num(style.text_font_size),
                theme.placeholder_text_color,
                escape_xml(&event.date)
            ));
        }
    }

    let text_x = card.x + style.content_padding;
    let mut baseline = card.y + style.image_height + style.content_padding;
    if card.show_date {
        baseline += config.list.date_font_size;
        out.push_str(&text_line(
            text_x,
            baseline,
            &format_date(&event.date),
            config.list.date_font_size,
            "500",
            &theme.event_text_color,
            &theme.font_family,
        ));
        baseline += config.list.date_gap;
    }

    let content = measure.content(event, card.width);
    out.push_str(&text_lines(
        text_x,
        baseline,
        &content.title,
        style.heading_font_size,
        HEADING_LINE_HEIGHT,
        "700",
        &theme.event_heading_color,
        &theme.font_family,
    ));
    baseline += content.title.height + style.heading_gap;
    out.push_str(&text_lines(
        text_x,
        baseline,
        &content.description,
        style.text_font_size,
        style.text_line_height,
        "400",
        &theme.event_text_color,
        &theme.font_family,
    ));

    out.push_str("</g>");
    out
}

#[allow(clippy::too_many_arguments)]
fn text_lines(
    x: f64,
    top: f64,
    block: &TextBlock,
    font_size: f64,
    line_height: f64,
    weight: &str,
    fill: &str,
    font_family: &str,
) -> String {
    block
        .lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let baseline = top + font_size + idx as f64 * font_size * line_height;
            text_line(x, baseline, line, font_size, weight, fill, font_family)
        })
        .collect()
}

fn text_line(
    x: f64,
    baseline: f64,
    text: &str,
    font_size: f64,
    weight: &str,
    fill: &str,
    font_family: &str,
) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" fill=\"{fill}\">{}</text>",
        fmt_num(x),
        fmt_num(baseline),
        escape_xml(font_family),
        fmt_num(font_size),
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            print!("{svg}");
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|name| name.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .save_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ContentSize, LayoutRequest, compute_layout};
    use crate::measure::{CardMeasure, measure_events};

    fn render(mode: Mode, events: &[TimelineEvent]) -> String {
        let theme = Theme::dark();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let measure = CardMeasure::new(&config, &theme);
        let boxes = measure_events(events, &measure).unwrap();
        let request = LayoutRequest::new(mode, ContentSize::new(1200.0, 800.0));
        let layout = compute_layout(&boxes, &request, &config).unwrap();
        render_svg(&layout, events, "Project <timeline>", &theme, &config)
    }

    #[test]
    fn renders_axis_connectors_and_dots() {
        let events = vec![
            TimelineEvent::new("2024-01-01").with_title("Kickoff"),
            TimelineEvent::new("2024-04-01").with_title("Beta & launch"),
        ];
        let svg = render(Mode::Horizontal, &events);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("part=\"axis-line\""));
        assert_eq!(svg.matches("part=\"connector-line\"").count(), 2);
        assert_eq!(svg.matches("part=\"dot\"").count(), 2);
        assert!(svg.contains("Beta &amp; launch"));
        assert!(svg.contains("aria-label=\"Project &lt;timeline&gt;\""));
        assert!(svg.contains("aria-hidden=\"true\""));
    }

    #[test]
    fn list_mode_omits_vector_layer_and_shows_dates() {
        let events = vec![TimelineEvent::new("2024-03-15").with_title("Launch")];
        let svg = render(Mode::List, &events);
        assert!(!svg.contains("svg-layer"));
        assert!(svg.contains("March 15, 2024"));
    }

    #[test]
    fn untitled_cards_fall_back_to_date_title() {
        let svg = render(Mode::Vertical, &[TimelineEvent::new("2024-12-25")]);
        assert!(svg.contains("Event on December 25, 2024"));
        assert!(svg.contains("Timeline event for 2024-12-25"));
    }

    #[test]
    fn escapes_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
