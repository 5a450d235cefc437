use crate::text_metrics;

/// A run of wrapped text and the box it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// Wraps `text` to `max_width`, keeps at most `max_lines` lines (the last
/// one gets an ellipsis when text was dropped) and measures the result.
pub fn measure_block(
    text: &str,
    font_size: f64,
    line_height: f64,
    max_width: f64,
    max_lines: usize,
    font_family: &str,
    fast_metrics: bool,
) -> TextBlock {
    let mut lines = Vec::new();
    for line in split_lines(text) {
        lines.extend(wrap_line(&line, max_width, font_size, font_family, fast_metrics));
    }
    lines.retain(|line| !line.is_empty());

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }

    let width = lines
        .iter()
        .map(|line| text_width(line, font_size, font_family, fast_metrics))
        .fold(0.0, f64::max);
    let height = lines.len() as f64 * font_size * line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.replace("<br/>", "\n")
        .replace("<br>", "\n")
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub(crate) fn wrap_line(
    line: &str,
    max_width: f64,
    font_size: f64,
    font_family: &str,
    fast_metrics: bool,
) -> Vec<String> {
    if text_width(line, font_size, font_family, fast_metrics) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size, font_family, fast_metrics) > max_width
            && !current.is_empty()
        {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(crate) fn text_width(text: &str, font_size: f64, font_family: &str, fast_metrics: bool) -> f64 {
    if fast_metrics {
        return fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

fn fallback_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(char_width_factor).sum::<f64>() * font_size
}

/// Approximate advance of `ch` in ems for a typical sans-serif face.
pub(crate) fn char_width_factor(ch: char) -> f64 {
    match ch {
        ' ' => 0.31,
        '.' | ',' | ':' | ';' | '|' | '!' | '\'' | '(' | ')' | '[' | ']' => 0.32,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 't' | 'r' => 0.34,
        '1' => 0.40,
        'm' | 'M' => 0.88,
        'w' | 'W' => 0.88,
        '@' | '#' | '%' | '&' => 0.95,
        'A'..='Z' => 0.68,
        'a'..='z' => 0.57,
        '0'..='9' => 0.60,
        _ => 0.58,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_handles_br_tags() {
        assert_eq!(split_lines("a<br/>b"), vec!["a", "b"]);
        assert_eq!(split_lines("a<br>b\n c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn char_width_factor_is_positive() {
        for ch in ['a', 'Z', ' ', '0', '@', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {ch:?} has zero width");
        }
    }

    #[test]
    fn fallback_width_scales_with_font_size() {
        let w16 = fallback_text_width("Hello", 16.0);
        let w32 = fallback_text_width("Hello", 32.0);
        assert!((w32 - w16 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_line_keeps_short_text() {
        assert_eq!(wrap_line("short", 1000.0, 16.0, "sans-serif", true).len(), 1);
    }

    #[test]
    fn wrap_line_splits_long_text() {
        let lines = wrap_line(
            "this is a rather long line that should be wrapped",
            100.0,
            16.0,
            "sans-serif",
            true,
        );
        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
    }

    #[test]
    fn measure_block_clamps_line_count() {
        let block = measure_block(
            "one two three four five six seven eight nine ten eleven twelve",
            16.0,
            1.5,
            60.0,
            2,
            "sans-serif",
            true,
        );
        assert_eq!(block.lines.len(), 2);
        assert!(block.lines[1].ends_with('…'));
        assert_eq!(block.height, 2.0 * 16.0 * 1.5);
    }

    #[test]
    fn measure_block_of_empty_text_is_empty() {
        let block = measure_block("", 16.0, 1.5, 200.0, 3, "sans-serif", true);
        assert!(block.lines.is_empty());
        assert_eq!(block.height, 0.0);
    }
}
