use grid_util::point::Point;
use thiserror::Error;

/// Reasons a search run does not produce a found/not-found answer. Running out of frontier
/// is not one of them: that is reported as `Ok(false)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("a search needs both a start and an end cell")]
    MissingEndpoints,
    #[error("{0} is outside the grid or blocked and cannot be an endpoint")]
    InvalidEndpoint(Point),
    #[error("search was cancelled by the frame sink")]
    Cancelled,
}

/// Errors raised while editing or parsing a [SearchGrid](crate::SearchGrid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0} already holds the start or the end")]
    Occupied(Point),
    #[error("unknown cell glyph {0:?}")]
    UnknownGlyph(char),
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("more than one {0:?} cell")]
    DuplicateEndpoint(char),
}
