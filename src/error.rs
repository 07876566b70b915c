use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid format pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid locale table {locale:?}: {reason}")]
    InvalidLocaleTable { locale: String, reason: String },

    #[error("unrecognized timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid {which} threshold {days}: must be a finite number of days, zero or more")]
    InvalidThreshold { which: &'static str, days: f64 },

    #[error("refresh interval must be greater than zero")]
    ZeroInterval,
}
