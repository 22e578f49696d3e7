use serde::{Deserialize, Serialize};

use super::errors::OrderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    Address,
    City,
    State,
    PostalCode,
}

impl std::fmt::Display for ShippingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingField::Address => write!(f, "address"),
            ShippingField::City => write!(f, "city"),
            ShippingField::State => write!(f, "state"),
            ShippingField::PostalCode => write!(f, "postal_code"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl ShippingAddress {
    /// Trims every field and rejects the first blank one.
    pub fn normalized(self) -> Result<Self, OrderError> {
        let field = |value: String, name: ShippingField| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(OrderError::MissingShippingField(name))
            } else {
                Ok(trimmed.to_string())
            }
        };

        Ok(Self {
            address: field(self.address, ShippingField::Address)?,
            city: field(self.city, ShippingField::City)?,
            state: field(self.state, ShippingField::State)?,
            postal_code: field(self.postal_code, ShippingField::PostalCode)?,
        })
    }
}

/// Trimmed free text, `None` when blank.
pub fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
