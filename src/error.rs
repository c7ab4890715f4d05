use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A user-supplied value was rejected. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// The import batch was rejected as a whole. Nothing was changed.
    #[error("Import failed: {0}")]
    Import(String),

    /// A sum of quantities doesn't fit the decimal range.
    #[error("Quantity total overflowed")]
    Overflow,

    #[error("Failed to render ranking image: {0}")]
    Render(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::Import(message.into())
    }

    pub fn render(message: impl ToString) -> Self {
        Self::Render(message.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
