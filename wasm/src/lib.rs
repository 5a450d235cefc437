use serde::Deserialize;
use timeline_rs_renderer::{ContentSize, RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    row_gap: Option<f64>,
    column_gap: Option<f64>,
}

fn build_render_options(options: TimelineRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("light") {
        RenderOptions::light()
    } else {
        RenderOptions::dark()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    let viewport = render_options.viewport;
    render_options.viewport = ContentSize::new(
        options.width.unwrap_or(viewport.width),
        options.height.unwrap_or(viewport.height),
    );
    if let Some(row_gap) = options.row_gap {
        render_options.layout.row_gap = row_gap;
    }
    if let Some(column_gap) = options.column_gap {
        render_options.layout.column_gap = column_gap;
    }
    // No system fonts to query in the browser.
    render_options.layout.fast_text_metrics = true;

    render_options
}

#[wasm_bindgen]
pub fn render_timeline_svg(source: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TimelineRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TimelineRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(source, render_options)
        .map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
