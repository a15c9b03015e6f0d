use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} threshold must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("high threshold {high} is below medium threshold {medium}")]
    Inverted { high: f64, medium: f64 },
}
