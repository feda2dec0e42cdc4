//! Address book entries.

use crate::ids::AddressId;
use serde::{Deserialize, Serialize};

/// A saved postal address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    /// Recipient name.
    pub name: String,
    pub street: String,
    pub city: String,
    /// State/province code (e.g., "NY").
    #[serde(default)]
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: String,
    /// Preselected at checkout.
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {} {}, {}",
            self.name, self.street, self.city, self.state, self.postal_code, self.country
        )
    }

    /// Format as multi-line, the way the address card shows it.
    pub fn multi_line(&self) -> String {
        let mut lines = vec![
            self.name.clone(),
            self.street.clone(),
            format!("{}, {} {}", self.city, self.state, self.postal_code),
            self.country.clone(),
        ];
        if !self.phone.is_empty() {
            lines.push(self.phone.clone());
        }
        lines.join("\n")
    }
}

/// The address to preselect: the default one, else the first.
pub fn preselected(addresses: &[Address]) -> Option<&Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}
