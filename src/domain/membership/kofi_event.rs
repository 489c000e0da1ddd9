//! Ko-fi webhook payload.
//!
//! Ko-fi posts `application/x-www-form-urlencoded` with a single `data`
//! field whose value is this JSON document.

use secrecy::SecretString;
use serde::Deserialize;

/// Kind of Ko-fi transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum KofiEventType {
    Donation,
    Subscription,
    #[serde(rename = "Shop Order")]
    ShopOrder,
    Commission,
    #[serde(other)]
    Other,
}

/// The JSON document carried in the webhook `data` field.
///
/// Only the fields the webhook acts on are required; the rest are optional
/// so a payload shape change on Ko-fi's side does not drop payments.
#[derive(Debug, Clone, Deserialize)]
pub struct KofiPayload {
    pub verification_token: SecretString,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(rename = "type")]
    pub event_type: KofiEventType,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    pub email: String,
    #[serde(default)]
    pub is_subscription_payment: bool,
    #[serde(default)]
    pub is_first_subscription_payment: bool,
    #[serde(default)]
    pub kofi_transaction_id: Option<String>,
    #[serde(default)]
    pub tier_name: Option<String>,
}

impl KofiPayload {
    /// Whether this payment should create or extend a membership.
    pub fn qualifies(&self) -> bool {
        self.is_subscription_payment || self.event_type == KofiEventType::Subscription
    }
}

#[cfg(test)]
impl KofiPayload {
    pub(crate) fn test_subscription(email: &str) -> Self {
        Self {
            verification_token: SecretString::new("kofi-token".to_string()),
            message_id: None,
            timestamp: None,
            event_type: KofiEventType::Subscription,
            from_name: None,
            amount: Some("5.00".to_string()),
            currency: Some("USD".to_string()),
            email: email.to_string(),
            is_subscription_payment: true,
            is_first_subscription_payment: false,
            kofi_transaction_id: None,
            tier_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> KofiPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_subscription_payload() {
        let payload = parse(
            r#"{
                "verification_token": "abc",
                "message_id": "m-1",
                "timestamp": "2024-03-01T09:00:00Z",
                "type": "Subscription",
                "is_public": true,
                "from_name": "Ada",
                "message": null,
                "amount": "5.00",
                "url": "https://ko-fi.com/Home/CoffeeShop?txid=1",
                "email": "ada@example.com",
                "currency": "USD",
                "is_subscription_payment": true,
                "is_first_subscription_payment": true,
                "kofi_transaction_id": "txn-1",
                "tier_name": "Early book club"
            }"#,
        );

        assert_eq!(payload.event_type, KofiEventType::Subscription);
        assert_eq!(payload.tier_name.as_deref(), Some("Early book club"));
        assert!(payload.qualifies());
    }

    #[test]
    fn shop_order_type_is_recognised() {
        let payload = parse(r#"{"verification_token":"x","type":"Shop Order","email":"a@b.c"}"#);
        assert_eq!(payload.event_type, KofiEventType::ShopOrder);
        assert!(!payload.qualifies());
    }

    #[test]
    fn unknown_type_is_other() {
        let payload = parse(r#"{"verification_token":"x","type":"Gift","email":"a@b.c"}"#);
        assert_eq!(payload.event_type, KofiEventType::Other);
    }

    #[test]
    fn donation_flagged_as_subscription_payment_qualifies() {
        let payload = parse(
            r#"{"verification_token":"x","type":"Donation","email":"a@b.c","is_subscription_payment":true}"#,
        );
        assert!(payload.qualifies());
    }

    #[test]
    fn plain_donation_does_not_qualify() {
        let payload = parse(r#"{"verification_token":"x","type":"Donation","email":"a@b.c"}"#);
        assert!(!payload.qualifies());
    }
}
