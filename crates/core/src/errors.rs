use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid quantity {quantity} for product `{product_id}`: quantity must be positive")]
    InvalidQuantity { product_id: String, quantity: u32 },
    #[error("invalid price {price} for product `{product_id}`: price must not be negative")]
    InvalidPrice { product_id: String, price: Decimal },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_quantity(product_id: &ProductId, quantity: u32) -> Self {
        Self::InvalidQuantity { product_id: product_id.0.clone(), quantity }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable error class used in operator-facing output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain_validation",
            Self::Persistence(_) => "persistence",
            Self::Integration(_) => "integration",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Persistence(_) | Self::Integration(_) => {
                "The service is temporarily unavailable. Please retry shortly."
            }
            Self::Configuration(_) => "An unexpected internal error occurred.",
        }
    }
}
