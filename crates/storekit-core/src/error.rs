//! Error types for the core data model.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when converting vendor values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An integer code that the vendor enumeration does not define.
    #[error("invalid {kind} value: {value}")]
    InvalidEnumValue {
        /// The enumeration being decoded.
        kind: &'static str,
        /// The rejected code.
        value: u8,
    },

    /// An environment name other than production or sandbox.
    #[error("invalid environment: {0} (expected \"production\" or \"sandbox\")")]
    InvalidEnvironment(String),
}
