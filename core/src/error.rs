use thiserror::Error;

/// A malformed boolean query. Neither variant is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Unbalanced parentheses, found while converting to postfix.
    #[error("parse error: {0}")]
    Parse(String),
    /// An operator short of operands, or an expression that does not reduce to one result.
    #[error("evaluation error: {0}")]
    Eval(String),
}

impl QueryError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self { QueryError::Parse(msg.into()) }
    pub(crate) fn eval(msg: impl Into<String>) -> Self { QueryError::Eval(msg.into()) }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
