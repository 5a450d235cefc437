use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub axis_color: String,
    pub axis_width: f64,
    pub connector_color: String,
    pub connector_width: f64,
    pub dot_color: String,
    pub dot_size: f64,
    pub marker_color: String,
    pub marker_text_color: String,
    pub marker_font_size: f64,
    pub event_background: String,
    pub event_border: String,
    pub event_heading_color: String,
    pub event_text_color: String,
    pub placeholder_background: String,
    pub placeholder_text_color: String,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#1e1e3f".to_string(),
            axis_color: "#47476b".to_string(),
            axis_width: 2.0,
            connector_color: "#47476b".to_string(),
            connector_width: 2.0,
            dot_color: "#ff6b6b".to_string(),
            dot_size: 5.0,
            marker_color: "#a4a4c1".to_string(),
            marker_text_color: "#a4a4c1".to_string(),
            marker_font_size: 14.4,
            event_background: "#2c2c54".to_string(),
            event_border: "#47476b".to_string(),
            event_heading_color: "#ffffff".to_string(),
            event_text_color: "#a4a4c1".to_string(),
            placeholder_background: "#3a3a66".to_string(),
            placeholder_text_color: "#8c8caf".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            axis_color: "#7a8aa6".to_string(),
            connector_color: "#c7d2e5".to_string(),
            dot_color: "#e5484d".to_string(),
            marker_color: "#7a8aa6".to_string(),
            marker_text_color: "#4a5568".to_string(),
            event_background: "#f8faff".to_string(),
            event_border: "#c7d2e5".to_string(),
            event_heading_color: "#1c2430".to_string(),
            event_text_color: "#4a5568".to_string(),
            placeholder_background: "#eef2f8".to_string(),
            placeholder_text_color: "#7a8aa6".to_string(),
            ..Self::dark()
        }
    }
}
