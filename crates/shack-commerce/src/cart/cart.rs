//! Cart and line item types.

use crate::cart::customization::{unit_price, PizzaCustomization};
use crate::catalog::{Catalog, MenuItem};
use crate::error::CommerceError;
use crate::ids::LineId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Subtitle used when a pizza's size is not in the catalog.
const FALLBACK_SIZE_NAME: &str = "Medium";

/// A customized pizza in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PizzaLine {
    /// Derived key, see [`PizzaCustomization::line_key`].
    pub id: LineId,
    pub base: MenuItem,
    pub quantity: u32,
    pub customization: PizzaCustomization,
}

/// A flat-priced item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtherLine {
    /// Same as the item id.
    pub id: LineId,
    pub item: MenuItem,
    pub quantity: u32,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum LineItem {
    Pizza(PizzaLine),
    Other(OtherLine),
}

impl LineItem {
    pub fn id(&self) -> &LineId {
        match self {
            LineItem::Pizza(p) => &p.id,
            LineItem::Other(o) => &o.id,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            LineItem::Pizza(p) => p.quantity,
            LineItem::Other(o) => o.quantity,
        }
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        match self {
            LineItem::Pizza(p) => &mut p.quantity,
            LineItem::Other(o) => &mut o.quantity,
        }
    }

    /// Price of one unit of this line.
    pub fn unit_price(&self, catalog: &Catalog) -> Result<Money, CommerceError> {
        match self {
            LineItem::Pizza(p) => unit_price(&p.base, &p.customization, catalog),
            LineItem::Other(o) => Ok(o.item.price),
        }
    }

    /// Display row for order summaries.
    pub fn summary(&self, catalog: &Catalog) -> SummaryLine {
        match self {
            LineItem::Other(o) => SummaryLine {
                id: o.id.clone(),
                title: o.item.name.clone(),
                subtitle: String::new(),
                quantity: o.quantity,
            },
            LineItem::Pizza(p) => {
                let size = catalog
                    .find_size(&p.customization.size_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or(FALLBACK_SIZE_NAME);
                let toppings: Vec<&str> = p
                    .customization
                    .topping_ids
                    .iter()
                    .filter_map(|id| catalog.find_topping(id))
                    .map(|t| t.name.as_str())
                    .collect();
                let subtitle = if toppings.is_empty() {
                    size.to_string()
                } else {
                    format!("{} \u{2022} {}", size, toppings.join(", "))
                };
                SummaryLine {
                    id: p.id.clone(),
                    title: p.base.name.clone(),
                    subtitle,
                    quantity: p.quantity,
                }
            }
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryLine {
    pub id: LineId,
    pub title: String,
    pub subtitle: String,
    pub quantity: u32,
}

/// The order being built: ordered line items plus free-form notes.
///
/// Invariants: every line has a quantity above zero, and line ids are unique
/// (a pizza's id is its customization key, a flat item's id is its item id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    notes: String,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted parts.
    ///
    /// Pizza lines are re-keyed from their base and customization, zero-quantity
    /// lines are dropped and lines sharing an id are merged into the first
    /// occurrence, so the invariants hold whatever was stored.
    pub fn from_parts(items: Vec<LineItem>, notes: String) -> Self {
        let mut cart = Self {
            items: Vec::with_capacity(items.len()),
            notes,
        };
        for mut item in items {
            if item.quantity() == 0 {
                continue;
            }
            if let LineItem::Pizza(p) = &mut item {
                p.id = p.customization.line_key(&p.base.id);
            }
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id() == item.id()) {
                let merged = existing.quantity().saturating_add(item.quantity());
                *existing.quantity_mut() = merged;
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one customized pizza.
    ///
    /// Increments the matching line if this exact customization is already in
    /// the cart, otherwise appends a new line with quantity 1.
    pub fn add_pizza(&mut self, base: MenuItem, customization: PizzaCustomization) -> LineId {
        let key = customization.line_key(&base.id);
        if self.bump(&key) {
            return key;
        }
        debug!(line = %key, "adding pizza line");
        self.items.push(LineItem::Pizza(PizzaLine {
            id: key.clone(),
            base,
            quantity: 1,
            customization,
        }));
        key
    }

    /// Add one flat-priced item, incrementing its line if already present.
    pub fn add_other(&mut self, item: MenuItem) -> LineId {
        let key = LineId::new(item.id.as_str());
        if self.bump(&key) {
            return key;
        }
        debug!(line = %key, "adding item line");
        self.items.push(LineItem::Other(OtherLine {
            id: key.clone(),
            item,
            quantity: 1,
        }));
        key
    }

    fn bump(&mut self, line_id: &LineId) -> bool {
        match self.items.iter_mut().find(|i| i.id() == line_id) {
            Some(existing) => {
                let q = existing.quantity_mut();
                *q = q.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Increase a line's quantity by one. Returns false for an unknown line.
    pub fn increment(&mut self, line_id: &LineId) -> bool {
        self.bump(line_id)
    }

    /// Decrease a line's quantity by one, removing it when it reaches zero.
    /// Returns false for an unknown line.
    pub fn decrement(&mut self, line_id: &LineId) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id() == line_id) else {
            return false;
        };
        let q = self.items[pos].quantity_mut();
        *q = q.saturating_sub(1);
        if *q == 0 {
            debug!(line = %line_id, "removing line at zero quantity");
            self.items.remove(pos);
        }
        true
    }

    /// Remove a line regardless of quantity.
    pub fn remove(&mut self, line_id: &LineId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id() != line_id);
        self.items.len() < len_before
    }

    /// Empty the cart and its notes.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notes.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Get a line by ID.
    pub fn get(&self, line_id: &LineId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == line_id)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    /// Check if cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary rows in cart order.
    pub fn summary_lines(&self, catalog: &Catalog) -> Vec<SummaryLine> {
        self.items.iter().map(|i| i.summary(catalog)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ItemId, ToppingId};

    fn item(catalog: &Catalog, id: &str) -> MenuItem {
        catalog.find_item(&ItemId::new(id)).unwrap().clone()
    }

    fn basil_large() -> PizzaCustomization {
        PizzaCustomization::new("lg", [ToppingId::new("basil")])
    }

    #[test]
    fn test_same_pizza_twice_is_one_line() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        let a = cart.add_pizza(item(&catalog, "margherita"), basil_large());
        let b = cart.add_pizza(item(&catalog, "margherita"), basil_large());

        assert_eq!(a, b);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_different_toppings_are_separate_lines() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_pizza(item(&catalog, "margherita"), basil_large());
        cart.add_pizza(
            item(&catalog, "margherita"),
            PizzaCustomization::new("lg", [ToppingId::new("basil"), ToppingId::new("mushrooms")]),
        );

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_existing_lines_keep_position() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_other(item(&catalog, "coke"));
        cart.add_other(item(&catalog, "water"));
        cart.add_other(item(&catalog, "coke"));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["coke", "water"]);
        assert_eq!(cart.get(&LineId::new("coke")).unwrap().quantity(), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        let line = cart.add_other(item(&catalog, "water"));
        cart.increment(&line);

        assert!(cart.decrement(&line));
        assert_eq!(cart.get(&line).unwrap().quantity(), 1);
        assert!(cart.decrement(&line));
        assert!(cart.is_empty());
        assert!(!cart.decrement(&line));
    }

    #[test]
    fn test_unknown_line_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.increment(&LineId::new("ghost")));
        assert!(!cart.remove(&LineId::new("ghost")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_resets_notes() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_other(item(&catalog, "garlic-knots"));
        cart.set_notes("ring the bell");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.notes(), "");
    }

    #[test]
    fn test_from_parts_restores_invariants() {
        let catalog = Catalog::pizza_shack();
        let water = item(&catalog, "water");
        let line = |quantity| {
            LineItem::Other(OtherLine {
                id: LineId::new("water"),
                item: water.clone(),
                quantity,
            })
        };
        let cart = Cart::from_parts(vec![line(2), line(0), line(3)], "hi".to_string());

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.notes(), "hi");
    }

    #[test]
    fn test_from_parts_rekeys_pizza_lines() {
        let catalog = Catalog::pizza_shack();
        let margherita = item(&catalog, "margherita");
        let stored = LineItem::Pizza(PizzaLine {
            id: LineId::new("stale-key"),
            base: margherita.clone(),
            quantity: 1,
            customization: PizzaCustomization::new("lg", [ToppingId::new("basil")]),
        });
        let mut cart = Cart::from_parts(vec![stored], String::new());
        assert_eq!(cart.items()[0].id().as_str(), "margherita|lg|basil");

        let line = cart.add_pizza(
            margherita,
            PizzaCustomization::new("lg", [ToppingId::new("basil")]),
        );
        assert_eq!(line.as_str(), "margherita|lg|basil");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_summary_lines() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_pizza(
            item(&catalog, "margherita"),
            PizzaCustomization::new("lg", [ToppingId::new("pepperoni"), ToppingId::new("basil")]),
        );
        cart.add_pizza(item(&catalog, "meat-lovers"), PizzaCustomization::new("sm", []));
        cart.add_other(item(&catalog, "coke"));

        let rows = cart.summary_lines(&catalog);
        assert_eq!(rows[0].title, "Margherita");
        assert_eq!(rows[0].subtitle, "Large (16\") \u{2022} Basil, Pepperoni");
        assert_eq!(rows[1].subtitle, "Small (12\")");
        assert_eq!(rows[2].subtitle, "");
    }

    #[test]
    fn test_summary_unknown_size_falls_back() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_pizza(
            item(&catalog, "margherita"),
            PizzaCustomization::new("xxl", [ToppingId::new("pineapple")]),
        );
        assert_eq!(cart.summary_lines(&catalog)[0].subtitle, "Medium");
    }

    #[test]
    fn test_line_item_json_shape() {
        let catalog = Catalog::pizza_shack();
        let mut cart = Cart::new();
        cart.add_pizza(item(&catalog, "margherita"), basil_large());

        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["kind"], "pizza");
        assert_eq!(json["data"]["id"], "margherita|lg|basil");
        assert_eq!(json["data"]["quantity"], 1);
        assert_eq!(json["data"]["base"]["price"], 16);
        assert_eq!(json["data"]["customization"]["sizeId"], "lg");
        assert_eq!(json["data"]["customization"]["toppingIds"][0], "basil");
    }
}
