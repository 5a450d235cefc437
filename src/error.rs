use thiserror::Error;

/// Failures raised by a layout pass.
///
/// Empty input is not an error: a pass over zero events yields an empty
/// layout instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("degenerate date range: start {start} is not before end {end}")]
    DegenerateRange { start: String, end: String },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("timeline document is not valid JSON5: {0}")]
    Syntax(#[from] json5::Error),

    #[error("timeline document has no `events` array")]
    MissingEvents,

    #[error("event {index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: LayoutError,
    },
}
