/// Errors produced while parsing scroll offset strings such as `"start 0.9"`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OffsetParseError {
    #[error("scroll offset is empty")]
    Empty,

    #[error("unknown edge '{0}', expected start, center, end, a number, or a percentage")]
    InvalidEdge(String),

    #[error("scroll offset '{0}' has more than two edges")]
    TooManyEdges(String),
}
