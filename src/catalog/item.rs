//! # Catalog Items
//!
//! The stored item record and the payload accepted when creating one.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::errors::{CatalogError, CatalogResult};

/// A catalog record
///
/// `id` comes from the creation timestamp in milliseconds, so uniqueness is
/// best-effort: two creations within the same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Largest magnitude below which every whole `f64` is an exact integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole prices as JSON integers so `123` round-trips as `123`, not
/// `123.0`
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl Item {
    /// Whether `needle` (already lowercased) occurs in the name or category,
    /// ignoring case
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// Payload for `POST /api/items`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewItem {
    /// Shape-check an arbitrary JSON body
    ///
    /// Rejects non-objects, missing or extra fields (including a client
    /// supplied `id`), blank strings and negative or non-finite prices.
    pub fn from_json(body: Value) -> CatalogResult<Self> {
        if !body.is_object() {
            return Err(CatalogError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        }

        let item: NewItem = serde_json::from_value(body)
            .map_err(|e| CatalogError::InvalidPayload(e.to_string()))?;
        item.validate()?;
        Ok(item)
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidPayload("name must not be blank".into()));
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::InvalidPayload(
                "category must not be blank".into(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::InvalidPayload(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Attach an id, producing the record to persist
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}
