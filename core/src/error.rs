pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Input arrays must have the same length ({field} has {actual}, expected {expected})")]
    MismatchedLengths {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("No usage history has been collected")]
    EmptyHistory,

    #[error("The life prediction model has not been trained")]
    ModelNotTrained,

    #[error("Regression failed: {0}")]
    Model(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
