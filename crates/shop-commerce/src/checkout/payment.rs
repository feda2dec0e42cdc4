//! Payment method selection and card details.

use serde::{Deserialize, Serialize};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit_card" | "card" => Some(PaymentMethod::CreditCard),
            "paypal" => Some(PaymentMethod::Paypal),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
        }
    }
}

/// Card fields collected on the payment step.
///
/// Only presence is checked; nothing is sent anywhere.
#[derive(Clone, Default, PartialEq)]
pub struct CardDetails {
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    /// Names of the fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("card number", &self.number),
            ("name on card", &self.name),
            ("expiry date", &self.expiry),
            ("CVC", &self.cvc),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check if every field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Card number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** **** **** {}", last4)
    }
}

// Card data never goes into logs
impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked_number())
            .field("name", &self.name)
            .field("expiry", &self.expiry)
            .field("cvc", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CardDetails {
        CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            name: "John Doe".to_string(),
            expiry: "12/29".to_string(),
            cvc: "123".to_string(),
        }
    }

    #[test]
    fn test_missing_fields() {
        assert!(filled().is_complete());

        let card = CardDetails {
            expiry: " ".to_string(),
            cvc: String::new(),
            ..filled()
        };
        assert_eq!(card.missing_fields(), vec!["expiry date", "CVC"]);
        assert_eq!(CardDetails::default().missing_fields().len(), 4);
    }

    #[test]
    fn test_masked_number() {
        assert_eq!(filled().masked_number(), "**** **** **** 4242");
        assert_eq!(CardDetails::default().masked_number(), "**** **** **** ");
    }

    #[test]
    fn test_debug_hides_card() {
        let debug = format!("{:?}", filled());
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::CreditCard);
        assert_eq!(PaymentMethod::from_str("paypal"), Some(PaymentMethod::Paypal));
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            r#""credit_card""#
        );
    }
}
