use crate::domain::catalog::Amount;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("Item '{0}' is sold out")]
    OutOfStock(String),
    #[error("Transaction in progress. Please wait.")]
    TransactionInProgress,
    #[error("No item selected")]
    NotSelecting,
    #[error("Amount not fully paid: inserted {balance}, price {price}")]
    PaymentIncomplete { price: Amount, balance: Amount },
    #[error("Not sufficient change available for {0}")]
    InsufficientChange(Amount),
    #[error("Count for '{0}' would overflow")]
    Overflow(String),
    #[error("Unknown item '{0}'")]
    UnknownItem(String),
    #[error("Unknown coin '{0}'")]
    UnknownCoin(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl VendingError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfStock(_) => "out_of_stock",
            Self::TransactionInProgress => "transaction_in_progress",
            Self::NotSelecting => "not_selecting",
            Self::PaymentIncomplete { .. } => "payment_incomplete",
            Self::InsufficientChange(_) => "insufficient_change",
            Self::Overflow(_) => "overflow",
            Self::UnknownItem(_) => "unknown_item",
            Self::UnknownCoin(_) => "unknown_coin",
            Self::ValidationError(_) => "validation",
            Self::ConfigError(_) => "config",
            Self::CsvError(_) => "csv",
            Self::IoError(_) => "io",
            Self::JsonError(_) => "json",
        }
    }

    /// Change shortfalls never resolve without a coin restock, so they end
    /// the open transaction instead of being retried.
    pub fn aborts_transaction(&self) -> bool {
        matches!(self, Self::InsufficientChange(_))
    }
}

pub type Result<T> = std::result::Result<T, VendingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_insufficient_change_aborts() {
        assert!(VendingError::InsufficientChange(Amount::new(10)).aborts_transaction());
        assert!(!VendingError::OutOfStock("coke".to_string()).aborts_transaction());
        assert!(!VendingError::NotSelecting.aborts_transaction());
        assert!(!VendingError::Overflow("coke".to_string()).aborts_transaction());
        assert!(
            !VendingError::PaymentIncomplete {
                price: Amount::new(100),
                balance: Amount::new(25),
            }
            .aborts_transaction()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = VendingError::PaymentIncomplete {
            price: Amount::new(100),
            balance: Amount::new(25),
        };
        assert_eq!(
            err.to_string(),
            "Amount not fully paid: inserted 25, price 100"
        );
        assert_eq!(err.kind(), "payment_incomplete");
    }
}
