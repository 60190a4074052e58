//! Catalog types.

use crate::ids::{CategoryId, ItemId, SizeId, ToppingId};
use crate::money::{deserialize_price, Money};
use serde::{Deserialize, Serialize};

/// A purchasable item on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base price (pizzas) or flat price (everything else). Never negative.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Money,
}

impl MenuItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A titled group of menu items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuCategory {
    pub id: CategoryId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub items: Vec<MenuItem>,
}

/// A pizza size. The delta is added to the pizza's base price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    pub price_delta: Money,
}

/// A pizza topping with an additive price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topping {
    pub id: ToppingId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Money,
}

/// Shop details shown around the order flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub pickup_eta: String,
    pub note: String,
}

/// The full menu: categories, the pizza option tables and shop details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub restaurant: Restaurant,
    pub categories: Vec<MenuCategory>,
    pub sizes: Vec<Size>,
    pub toppings: Vec<Topping>,
    /// Category whose items can be customized with size and toppings.
    pub pizza_category: CategoryId,
    /// Size preselected when a pizza is opened for customization.
    pub default_size: SizeId,
}

impl Catalog {
    /// Iterate over every item in every category, in menu order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Find an item in any category.
    pub fn find_item(&self, id: &ItemId) -> Option<&MenuItem> {
        self.items().find(|i| &i.id == id)
    }

    /// Get a category by ID.
    pub fn category(&self, id: &CategoryId) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Items of the pizza category.
    pub fn pizzas(&self) -> &[MenuItem] {
        self.category(&self.pizza_category)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether an item is customizable as a pizza.
    pub fn is_pizza(&self, id: &ItemId) -> bool {
        self.pizzas().iter().any(|p| &p.id == id)
    }

    pub fn find_size(&self, id: &SizeId) -> Option<&Size> {
        self.sizes.iter().find(|s| &s.id == id)
    }

    pub fn find_topping(&self, id: &ToppingId) -> Option<&Topping> {
        self.toppings.iter().find(|t| &t.id == id)
    }
}
