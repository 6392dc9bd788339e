use bigdecimal::BigDecimal;
use log::debug;

/// A way of settling a payment.
///
/// `method` is the name callers use to select it; lookups ignore case.
pub trait PaymentMethod: Send + Sync {
    fn method(&self) -> &str;
    fn pay(&self, value: &BigDecimal, customer_id: i32) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CreditCardPayment;

impl PaymentMethod for CreditCardPayment {
    fn method(&self) -> &str {
        "creditcard"
    }

    fn pay(&self, value: &BigDecimal, customer_id: i32) -> bool {
        debug!("Settling {} by credit card for customer {}", value, customer_id);
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PaypalPayment;

impl PaymentMethod for PaypalPayment {
    fn method(&self) -> &str {
        "paypal"
    }

    fn pay(&self, value: &BigDecimal, customer_id: i32) -> bool {
        debug!("Settling {} via PayPal for customer {}", value, customer_id);
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PixPayment;

impl PaymentMethod for PixPayment {
    fn method(&self) -> &str {
        "pix"
    }

    fn pay(&self, value: &BigDecimal, customer_id: i32) -> bool {
        debug!("Settling {} via PIX for customer {}", value, customer_id);
        true
    }
}
