//! Core types for stockpile

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque item identifier
///
/// The textual format belongs to the storage backend that issued it; values
/// are only constructed by a backend, either when an item is created or when
/// a raw path segment passes [`crate::storage::ItemStore::parse_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl Item {
    pub fn from_new(id: ItemId, item: NewItem) -> Self {
        Self {
            id,
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Mutable fields of an item, as accepted by create and update requests.
///
/// Absent fields take their zero value; `validate` decides whether the result
/// is acceptable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewItem {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, unit_price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Check the field constraints that must hold before anything is persisted
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_item("name must not be empty"));
        }
        // NaN fails this comparison too
        if !(self.unit_price >= 0.0) {
            return Err(Error::invalid_item("unitPrice must be non-negative"));
        }
        if self.quantity < 0 {
            return Err(Error::invalid_item("quantity must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_zero_values() {
        assert!(NewItem::new("widget", 0.0, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert!(matches!(
            NewItem::new("", 1.0, 1).validate(),
            Err(Error::InvalidItem(_))
        ));
        assert!(matches!(
            NewItem::new("widget", -0.01, 1).validate(),
            Err(Error::InvalidItem(_))
        ));
        assert!(matches!(
            NewItem::new("widget", 1.0, -1).validate(),
            Err(Error::InvalidItem(_))
        ));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let item: NewItem = serde_json::from_str(r#"{"name":"bolt"}"#).unwrap();
        assert_eq!(item, NewItem::new("bolt", 0.0, 0));

        let item: NewItem = serde_json::from_str("{}").unwrap();
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::from_new(ItemId::new("abc"), NewItem::new("nut", 2.5, 3));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "abc", "name": "nut", "unitPrice": 2.5, "quantity": 3})
        );
    }
}
