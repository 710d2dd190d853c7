use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid event record `{title}`: {reason}")]
    InvalidEvent { title: String, reason: String },

    #[error("event source failure: {0}")]
    SourceFailure(String),
}
