use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

/// One line of a cart. Only meaningful inside a cart's item list; the same
/// `product_id` may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub product_id: u64,
    pub quantity: i64,
    pub user_id: u64,
}

/// Full cart snapshot: durable header fields plus the cached item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub user_id: u64,
    pub items: Vec<CartItem>,
    #[serde(rename = "updated")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Remove at most one item per requested product id, taking the first
    /// match in list order. Ids with no match are skipped. Returns how many
    /// items were removed.
    pub fn remove_first_matches(items: &mut Vec<CartItem>, product_ids: &[u64]) -> usize {
        let mut removed = 0;
        for product_id in product_ids {
            if let Some(pos) = items.iter().position(|item| item.product_id == *product_id) {
                items.remove(pos);
                removed += 1;
            }
        }
        removed
    }
}
