use thiserror::Error;

pub type PmResult<T> = Result<T, PmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PmError {
    #[error("Unrecognized {what}: {given:?}")]
    Parse { what: &'static str, given: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
