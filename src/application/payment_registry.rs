use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::payment::{CreditCardPayment, PaymentMethod, PaypalPayment, PixPayment};

/// Payment methods keyed by case-folded method name.
///
/// Built once and read-only afterwards. When two methods share a name
/// (ignoring case) the one registered last wins.
#[derive(Clone, Default)]
pub struct PaymentRegistry {
    methods: HashMap<String, Arc<dyn PaymentMethod>>,
}

impl PaymentRegistry {
    pub fn new(methods: impl IntoIterator<Item = Arc<dyn PaymentMethod>>) -> Self {
        let methods = methods
            .into_iter()
            .map(|m| (m.method().to_lowercase(), m))
            .collect();
        Self { methods }
    }

    /// Credit card, PayPal and PIX.
    pub fn with_default_methods() -> Self {
        Self::new([
            Arc::new(CreditCardPayment) as Arc<dyn PaymentMethod>,
            Arc::new(PaypalPayment),
            Arc::new(PixPayment),
        ])
    }

    pub fn resolve(&self, method: &str) -> Option<&Arc<dyn PaymentMethod>> {
        self.methods.get(&method.to_lowercase())
    }

    /// Registered method names, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for PaymentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    struct Named(&'static str, bool);

    impl PaymentMethod for Named {
        fn method(&self) -> &str {
            self.0
        }

        fn pay(&self, _value: &BigDecimal, _customer_id: i32) -> bool {
            self.1
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = PaymentRegistry::with_default_methods();
        for name in ["PayPal", "paypal", "PAYPAL"] {
            let method = registry.resolve(name).expect("paypal should resolve");
            assert_eq!(method.method(), "paypal");
        }
    }

    #[test]
    fn unknown_method_is_absent() {
        let registry = PaymentRegistry::with_default_methods();
        assert!(registry.resolve("bitcoin").is_none());
    }

    #[test]
    fn defaults_are_registered() {
        let registry = PaymentRegistry::with_default_methods();
        assert_eq!(registry.method_names(), vec!["creditcard", "paypal", "pix"]);
    }

    #[test]
    fn last_registration_wins_on_duplicate_names() {
        let registry = PaymentRegistry::new([
            Arc::new(Named("Wallet", true)) as Arc<dyn PaymentMethod>,
            Arc::new(Named("WALLET", false)),
        ]);
        let method = registry.resolve("wallet").expect("wallet should resolve");
        assert_eq!(method.method(), "WALLET");
        assert!(!method.pay(&BigDecimal::from(1), 1));
        assert_eq!(registry.method_names(), vec!["wallet"]);
    }
}
