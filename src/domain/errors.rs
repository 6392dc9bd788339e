use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
    #[error("Customer Id {0} does not exist")]
    CustomerNotFound(i32),
    #[error("Payment method '{0}' is not supported")]
    UnsupportedPaymentMethod(String),
    #[error("All random numbers have already been issued")]
    NumbersExhausted,
    #[error("Store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_not_found_mentions_id() {
        let msg = DomainError::CustomerNotFound(999).to_string();
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("999"));
    }

    #[test]
    fn invalid_argument_names_parameter() {
        let err = DomainError::invalid_argument("customer_id", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid argument `customer_id`: must be positive"
        );
    }

    #[test]
    fn unsupported_method_names_method() {
        let err = DomainError::UnsupportedPaymentMethod("bitcoin".to_string());
        assert_eq!(err.to_string(), "Payment method 'bitcoin' is not supported");
    }
}
