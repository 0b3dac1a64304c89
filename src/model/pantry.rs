use serde::{Deserialize, Serialize};

/// A food item a user has in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub name: String,
    /// Days until the item expires; `None` when the item has no expiry date
    #[serde(default)]
    pub expiry_days_remaining: Option<i64>,
}

impl PantryItem {
    pub fn new(name: impl Into<String>, expiry_days_remaining: Option<i64>) -> Self {
        PantryItem {
            name: name.into(),
            expiry_days_remaining,
        }
    }

    /// An item is usable unless its expiry date has been reached.
    pub fn is_available(&self) -> bool {
        self.expiry_days_remaining.map_or(true, |days| days > 0)
    }
}

/// Returns the names of every non-expired item, in input order.
///
/// This is the `available` list every matching operation expects.
pub fn available_ingredients(items: &[PantryItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.is_available())
        .map(|item| item.name.clone())
        .collect()
}

/// Returns available items that expire within `days`, soonest first.
///
/// Items without an expiry date never expire and are not included.
pub fn expiring_within(items: &[PantryItem], days: i64) -> Vec<&PantryItem> {
    let mut expiring: Vec<&PantryItem> = items
        .iter()
        .filter(|item| item.is_available())
        .filter(|item| matches!(item.expiry_days_remaining, Some(d) if d <= days))
        .collect();
    expiring.sort_by_key(|item| item.expiry_days_remaining);
    expiring
}
