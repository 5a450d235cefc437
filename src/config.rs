use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Spacing between stacked rows in horizontal mode.
    pub row_gap: f64,
    /// Distance of the innermost columns from the axis in vertical mode.
    pub column_gap: f64,
    /// Lower bound for the content length along the axis.
    pub min_content_dim: f64,
    pub axis_margin: f64,
    pub top_margin: f64,
    pub bottom_padding: f64,
    pub axis_inset: f64,
    pub min_container_height: f64,
    pub row_item_gap: f64,
    pub column_item_gap: f64,
    pub column_stride_gap: f64,
    pub range_padding_months: u32,
    pub marker: MarkerConfig,
    pub card: CardConfig,
    pub list: ListConfig,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_gap: 330.0,
            column_gap: 100.0,
            min_content_dim: 1800.0,
            axis_margin: 60.0,
            top_margin: 20.0,
            bottom_padding: 150.0,
            axis_inset: 60.0,
            min_container_height: 100.0,
            row_item_gap: 30.0,
            column_item_gap: 15.0,
            column_stride_gap: 15.0,
            range_padding_months: 2,
            marker: MarkerConfig::default(),
            card: CardConfig::default(),
            list: ListConfig::default(),
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub tick_half_length: f64,
    pub horizontal_label_offset: f64,
    pub vertical_label_offset: f64,
    pub vertical_label_baseline: f64,
    /// Ranges up to this many 365.25-day years get monthly markers.
    pub monthly_threshold_years: f64,
    pub year_step: i32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            tick_half_length: 10.0,
            horizontal_label_offset: 25.0,
            vertical_label_offset: 20.0,
            vertical_label_baseline: 4.0,
            monthly_threshold_years: 2.0,
            year_step: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    pub width: f64,
    pub image_height: f64,
    pub content_padding: f64,
    pub content_min_height: f64,
    pub heading_font_size: f64,
    pub heading_gap: f64,
    pub heading_max_lines: usize,
    pub text_font_size: f64,
    pub text_line_height: f64,
    pub text_max_lines: usize,
    pub corner_radius: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 250.0,
            image_height: 140.0,
            content_padding: 20.0,
            content_min_height: 125.0,
            heading_font_size: 17.6,
            heading_gap: 8.0,
            heading_max_lines: 2,
            text_font_size: 14.4,
            text_line_height: 1.5,
            text_max_lines: 3,
            corner_radius: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub gap: f64,
    pub padding: f64,
    pub max_event_width: f64,
    pub date_font_size: f64,
    pub date_gap: f64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            gap: 16.0,
            padding: 20.0,
            max_event_width: 600.0,
            date_font_size: 13.6,
            date_gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#1e1e3f".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::dark();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    axis_color: Option<String>,
    axis_width: Option<f64>,
    connector_color: Option<String>,
    connector_width: Option<f64>,
    dot_color: Option<String>,
    dot_size: Option<f64>,
    marker_color: Option<String>,
    marker_text_color: Option<String>,
    marker_font_size: Option<f64>,
    event_bg_color: Option<String>,
    event_border_color: Option<String>,
    event_heading_color: Option<String>,
    event_text_color: Option<String>,
    event_placeholder_bg: Option<String>,
    event_placeholder_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TimelineConfigFile {
    row_gap: Option<f64>,
    column_gap: Option<f64>,
    min_content_dim: Option<f64>,
    axis_margin: Option<f64>,
    range_padding_months: Option<u32>,
    fast_text_metrics: Option<bool>,
    list_gap: Option<f64>,
    list_padding: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CardConfigFile {
    width: Option<f64>,
    image_height: Option<f64>,
    content_padding: Option<f64>,
    content_min_height: Option<f64>,
    corner_radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    timeline: Option<TimelineConfigFile>,
    card: Option<CardConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents).context("invalid config JSON")?;

    match parsed.theme.as_deref() {
        Some("light") => config.theme = Theme::light(),
        Some("dark") | Some("default") => config.theme = Theme::dark(),
        _ => {}
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.axis_color {
            theme.axis_color = v;
        }
        if let Some(v) = vars.axis_width {
            theme.axis_width = v;
        }
        if let Some(v) = vars.connector_color {
            theme.connector_color = v;
        }
        if let Some(v) = vars.connector_width {
            theme.connector_width = v;
        }
        if let Some(v) = vars.dot_color {
            theme.dot_color = v;
        }
        if let Some(v) = vars.dot_size {
            theme.dot_size = v;
        }
        if let Some(v) = vars.marker_color {
            theme.marker_color = v;
        }
        if let Some(v) = vars.marker_text_color {
            theme.marker_text_color = v;
        }
        if let Some(v) = vars.marker_font_size {
            theme.marker_font_size = v;
        }
        if let Some(v) = vars.event_bg_color {
            theme.event_background = v;
        }
        if let Some(v) = vars.event_border_color {
            theme.event_border = v;
        }
        if let Some(v) = vars.event_heading_color {
            theme.event_heading_color = v;
        }
        if let Some(v) = vars.event_text_color {
            theme.event_text_color = v;
        }
        if let Some(v) = vars.event_placeholder_bg {
            theme.placeholder_background = v;
        }
        if let Some(v) = vars.event_placeholder_color {
            theme.placeholder_text_color = v;
        }
    }
    config.render.background = config.theme.background.clone();

    if let Some(timeline) = parsed.timeline {
        let layout = &mut config.layout;
        if let Some(v) = timeline.row_gap {
            layout.row_gap = v;
        }
        if let Some(v) = timeline.column_gap {
            layout.column_gap = v;
        }
        if let Some(v) = timeline.min_content_dim {
            layout.min_content_dim = v;
        }
        if let Some(v) = timeline.axis_margin {
            layout.axis_margin = v;
        }
        if let Some(v) = timeline.range_padding_months {
            layout.range_padding_months = v;
        }
        if let Some(v) = timeline.fast_text_metrics {
            layout.fast_text_metrics = v;
        }
        if let Some(v) = timeline.list_gap {
            layout.list.gap = v;
        }
        if let Some(v) = timeline.list_padding {
            layout.list.padding = v;
        }
    }

    if let Some(card) = parsed.card {
        let target = &mut config.layout.card;
        if let Some(v) = card.width {
            target.width = v;
        }
        if let Some(v) = card.image_height {
            target.image_height = v;
        }
        if let Some(v) = card.content_padding {
            target.content_padding = v;
        }
        if let Some(v) = card.content_min_height {
            target.content_min_height = v;
        }
        if let Some(v) = card.corner_radius {
            target.corner_radius = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.row_gap, 330.0);
        assert_eq!(config.column_gap, 100.0);
        assert_eq!(config.min_content_dim, 1800.0);
        assert_eq!(config.card.width, 250.0);
    }

    #[test]
    fn overlays_partial_config() {
        let config = parse_config(
            r##"{
                "theme": "light",
                "themeVariables": { "dotColor": "#00ff00", "dotSize": 7 },
                "timeline": { "rowGap": 280, "columnGap": 60 },
                "card": { "width": 300 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.dot_color, "#00ff00");
        assert_eq!(config.theme.dot_size, 7.0);
        assert_eq!(config.layout.row_gap, 280.0);
        assert_eq!(config.layout.column_gap, 60.0);
        assert_eq!(config.layout.card.width, 300.0);
        assert_eq!(config.layout.min_content_dim, 1800.0);
        assert_eq!(config.render.background, Theme::light().background);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.row_gap, 330.0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_config("{ not json").is_err());
    }
}
