use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::client::ClientInfo;
use crate::domain::menu::MenuItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub Uuid);

impl QuoteId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one quote line. Distinct from `MenuItemId`: two lines may
/// reference the same menu item under the append policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub Uuid);

impl LineId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Re-adding a menu item bumps the quantity on its existing line.
    #[default]
    Merge,
    /// Every add creates a fresh line, even for the same menu item.
    Append,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Append => "append",
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub uid: LineId,
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub client_info: ClientInfo,
    pub items: Vec<SelectedItem>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new() -> Self {
        Self {
            id: QuoteId::generate(),
            client_info: ClientInfo::default(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn line(&self, uid: &LineId) -> Option<&SelectedItem> {
        self.items.iter().find(|line| &line.uid == uid)
    }

    /// Returns the uid of the affected line. Under the merge policy the
    /// supplied comment is discarded when an existing line absorbs the add.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        comment: Option<String>,
        policy: DuplicatePolicy,
    ) -> LineId {
        if policy == DuplicatePolicy::Merge {
            if let Some(line) = self.items.iter_mut().find(|line| line.item.id == item.id) {
                line.quantity += 1;
                return line.uid;
            }
        }

        let uid = LineId::generate();
        self.items.push(SelectedItem {
            uid,
            item: item.clone(),
            quantity: 1,
            comment: normalize_comment(comment),
        });
        uid
    }

    /// Quantities at or below zero remove the line; a stored line is never
    /// left with `quantity == 0`. Unknown uids are ignored.
    pub fn set_quantity(&mut self, uid: &LineId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(uid);
        }
        match self.items.iter_mut().find(|line| &line.uid == uid) {
            Some(line) => {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    pub fn remove_line(&mut self, uid: &LineId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.uid != uid);
        self.items.len() != before
    }

    /// Empty text clears the note. Unknown uids are ignored.
    pub fn set_comment(&mut self, uid: &LineId, comment: &str) -> bool {
        match self.items.iter_mut().find(|line| &line.uid == uid) {
            Some(line) => {
                line.comment = normalize_comment(Some(comment.to_string()));
                true
            }
            None => false,
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use crate::domain::menu::{MenuItem, MenuItemId};

    use super::{DuplicatePolicy, LineId, Quote};

    fn menu_item(id: u32, name: &str) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            name: name.to_string(),
            category: "Salads".to_string(),
            price: Decimal::new(850, 2),
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn merge_policy_bumps_quantity_for_same_menu_item() {
        let mut quote = Quote::new();
        let salad = menu_item(1, "Garden Salad");

        let first = quote.add_item(&salad, None, DuplicatePolicy::Merge);
        let second =
            quote.add_item(&salad, Some("comment is discarded".to_string()), DuplicatePolicy::Merge);

        assert_eq!(first, second);
        assert_eq!(quote.items.len(), 1);
        assert_eq!(quote.items[0].quantity, 2);
        assert_eq!(quote.items[0].comment, None);
    }

    #[test]
    fn append_policy_keeps_parallel_lines() {
        let mut quote = Quote::new();
        let salad = menu_item(1, "Garden Salad");

        let first = quote.add_item(&salad, None, DuplicatePolicy::Append);
        let second = quote.add_item(&salad, Some("no onions".to_string()), DuplicatePolicy::Append);

        assert_ne!(first, second);
        assert_eq!(quote.items.len(), 2);
        assert!(quote.items.iter().all(|line| line.quantity == 1));
        assert_eq!(quote.items[1].comment.as_deref(), Some("no onions"));
    }

    #[test]
    fn uids_stay_unique_across_adds() {
        let mut quote = Quote::new();
        for id in 0..8 {
            quote.add_item(&menu_item(id % 3, "item"), None, DuplicatePolicy::Append);
        }

        let uids: HashSet<LineId> = quote.items.iter().map(|line| line.uid).collect();
        assert_eq!(uids.len(), quote.items.len());
    }

    #[test]
    fn zero_and_negative_quantities_remove_the_line() {
        for doomed_quantity in [0i64, -1] {
            let mut quote = Quote::new();
            let uid = quote.add_item(&menu_item(1, "Garden Salad"), None, DuplicatePolicy::Merge);

            assert!(quote.set_quantity(&uid, doomed_quantity));
            assert!(quote.items.is_empty());
            assert_eq!(quote.line(&uid), None);
        }
    }

    #[test]
    fn positive_quantity_is_stored_as_given() {
        let mut quote = Quote::new();
        let uid = quote.add_item(&menu_item(1, "Garden Salad"), None, DuplicatePolicy::Merge);

        assert!(quote.set_quantity(&uid, 7));
        assert_eq!(quote.items[0].quantity, 7);
    }

    #[test]
    fn operations_on_missing_uid_are_noops() {
        let mut quote = Quote::new();
        quote.add_item(&menu_item(1, "Garden Salad"), None, DuplicatePolicy::Merge);
        let snapshot = quote.clone();
        let ghost = LineId::generate();

        assert!(!quote.set_quantity(&ghost, 4));
        assert!(!quote.remove_line(&ghost));
        assert!(!quote.set_comment(&ghost, "nobody home"));
        assert_eq!(quote, snapshot);
    }

    #[test]
    fn comment_updates_and_clears() {
        let mut quote = Quote::new();
        let uid = quote.add_item(&menu_item(1, "Garden Salad"), None, DuplicatePolicy::Merge);

        assert!(quote.set_comment(&uid, "extra dressing"));
        assert_eq!(quote.items[0].comment.as_deref(), Some("extra dressing"));

        assert!(quote.set_comment(&uid, ""));
        assert_eq!(quote.items[0].comment, None);
    }
}
