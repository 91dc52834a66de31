#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data: need {need} bytes, have {have}")]
    UnexpectedEof { need: usize, have: usize },

    #[error("invalid {field}: {value}")]
    InvalidCount { field: &'static str, value: i64 },

    #[error("{what} limit exceeded: requested {requested} (max {limit})")]
    LimitExceeded { what: &'static str, requested: usize, limit: usize },

    #[error("invalid decode options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, Error>;
