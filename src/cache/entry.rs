//! Wire schema for cart entries in the fast lookup store.
//!
//! Every write uses the versioned [`CartEntry`] object. Reads also accept two
//! legacy shapes that older writers left behind:
//!
//! - a snapshot object without `version`: `{"user_id", "items", "updated"}`
//! - a bare item list: `[...]` (or `null` for an empty list)
//!
//! Dispatch is explicit on the top-level JSON shape and the `version` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CacheError;
use crate::models::{Cart, CartItem};

pub const CART_ENTRY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub version: u32,
    pub user_id: u64,
    pub items: Vec<CartItem>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct LegacySnapshot {
    #[serde(default)]
    user_id: Option<u64>,
    #[serde(default)]
    items: Option<Vec<CartItem>>,
    #[serde(default)]
    updated: Option<DateTime<Utc>>,
}

impl CartEntry {
    pub fn new(user_id: u64, items: Vec<CartItem>, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            version: CART_ENTRY_VERSION,
            user_id,
            items,
            updated_at,
        }
    }

    pub fn from_cart(cart: &Cart) -> Self {
        Self::new(cart.user_id, cart.items.clone(), Some(cart.updated_at))
    }

    pub fn encode(&self) -> Result<Vec<u8>, CacheError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode any known entry shape. `user_id` fills in the owner for bare
    /// lists, which carry no header.
    pub fn decode(key: &str, user_id: u64, bytes: &[u8]) -> Result<Self, CacheError> {
        let corrupt = |reason: String| CacheError::Corrupt {
            key: key.to_string(),
            reason,
        };

        let value: Value = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        let versioned = value
            .as_object()
            .is_some_and(|fields| fields.contains_key("version"));

        match value {
            Value::Null => Ok(Self::new(user_id, Vec::new(), None)),
            Value::Array(_) => {
                let items: Vec<CartItem> =
                    serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;
                Ok(Self::new(user_id, items, None))
            }
            Value::Object(_) if versioned => {
                let entry: CartEntry =
                    serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;
                if entry.version != CART_ENTRY_VERSION {
                    return Err(corrupt(format!(
                        "unsupported entry version {}",
                        entry.version
                    )));
                }
                Ok(entry)
            }
            Value::Object(_) => {
                let legacy: LegacySnapshot =
                    serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;
                Ok(Self::new(
                    legacy.user_id.unwrap_or(user_id),
                    legacy.items.unwrap_or_default(),
                    legacy.updated,
                ))
            }
            other => Err(corrupt(format!("unexpected JSON value: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const KEY: &str = "cart:7";

    fn item(product_id: u64) -> CartItem {
        CartItem {
            product_id,
            quantity: 2,
            user_id: 7,
        }
    }

    #[test]
    fn canonical_entry_survives_encode_decode() {
        let updated = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let entry = CartEntry::new(7, vec![item(1), item(1)], Some(updated));

        let bytes = entry.encode().unwrap();
        let decoded = CartEntry::decode(KEY, 7, &bytes).unwrap();

        assert_eq!(decoded, entry);
    }

    #[test]
    fn empty_canonical_entry_is_not_absent() {
        let bytes = CartEntry::new(7, Vec::new(), None).encode().unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn legacy_snapshot_decodes() {
        let raw = br#"{"user_id":7,"items":[{"product_id":3,"quantity":1,"user_id":7}],"updated":"2024-05-01T10:00:00.123456789+02:00"}"#;
        let entry = CartEntry::decode(KEY, 7, raw).unwrap();

        assert_eq!(entry.version, CART_ENTRY_VERSION);
        assert_eq!(entry.items.len(), 1);
        assert_eq!(entry.items[0].product_id, 3);
        let updated = entry.updated_at.unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(updated, expected);
    }

    #[test]
    fn legacy_snapshot_with_null_items_is_empty() {
        let raw = br#"{"user_id":7,"items":null,"updated":"0001-01-01T00:00:00Z"}"#;
        let entry = CartEntry::decode(KEY, 7, raw).unwrap();
        assert!(entry.items.is_empty());
    }

    #[test]
    fn legacy_bare_list_decodes() {
        let raw = br#"[{"product_id":1,"quantity":1,"user_id":7},{"product_id":2,"quantity":4,"user_id":7}]"#;
        let entry = CartEntry::decode(KEY, 7, raw).unwrap();

        assert_eq!(entry.user_id, 7);
        assert_eq!(entry.updated_at, None);
        assert_eq!(
            entry.items.iter().map(|i| i.product_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn null_list_is_empty() {
        let entry = CartEntry::decode(KEY, 9, b"null").unwrap();
        assert_eq!(entry.user_id, 9);
        assert!(entry.items.is_empty());
    }

    #[test]
    fn unknown_version_is_corrupt() {
        let raw = br#"{"version":2,"user_id":7,"items":[],"updated_at":null}"#;
        let err = CartEntry::decode(KEY, 7, raw).unwrap_err();
        assert!(matches!(err, CacheError::Corrupt { .. }));
        assert!(err.to_string().contains("unsupported entry version 2"));
    }

    #[test]
    fn garbage_is_corrupt() {
        for raw in [&b"not json"[..], b"42", br#"[{"product_id":"x"}]"#] {
            let err = CartEntry::decode(KEY, 7, raw).unwrap_err();
            assert!(err.to_string().starts_with("corrupt cart entry at cart:7"));
        }
    }
}
