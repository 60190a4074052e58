//! The shop's menu.
//!
//! Prices are placeholders.

use super::{Catalog, MenuCategory, MenuItem, Restaurant, Size, Topping};
use crate::ids::{CategoryId, SizeId, ToppingId};
use crate::money::Money;

/// Category holding the customizable pizzas.
pub const PIZZA_CATEGORY: &str = "pizzas";

/// Size preselected for a new pizza.
pub const DEFAULT_SIZE: &str = "md";

impl Catalog {
    /// The Pizza Shack menu.
    pub fn pizza_shack() -> Self {
        Self {
            restaurant: Restaurant {
                name: "Tony's Pizza Shack".to_string(),
                pickup_eta: "~20 min pickup".to_string(),
                note: "Prices are placeholders. No payment\u{2014}this is a demo checkout flow."
                    .to_string(),
            },
            categories: vec![
                MenuCategory {
                    id: CategoryId::new(PIZZA_CATEGORY),
                    title: "Signature Pizzas".to_string(),
                    note: Some("All pizzas are 14\" wood-fired".to_string()),
                    items: vec![
                        MenuItem::new("classic-pepperoni", "Classic Pepperoni", Money::dollars(18))
                            .with_description("Old-world pepperoni, mozzarella, tomato sauce."),
                        MenuItem::new("margherita", "Margherita", Money::dollars(16))
                            .with_description("Fresh mozzarella, basil, extra virgin olive oil."),
                        MenuItem::new("meat-lovers", "The Meat Shack", Money::dollars(22))
                            .with_description("Pepperoni, sausage, bacon, ham."),
                        MenuItem::new("veggie-delight", "Garden Veggie", Money::dollars(19))
                            .with_description("Bell peppers, onions, mushrooms, olives."),
                    ],
                },
                MenuCategory {
                    id: CategoryId::new("sides"),
                    title: "Sides & Wings".to_string(),
                    note: Some("Perfect pairings".to_string()),
                    items: vec![
                        MenuItem::new("garlic-knots", "Garlic Knots (6pc)", Money::dollars(8))
                            .with_description("Served with warm marinara."),
                        MenuItem::new("buffalo-wings", "Spicy Buffalo Wings", Money::dollars(14))
                            .with_description("8 jumbo wings with celery & ranch."),
                    ],
                },
                MenuCategory {
                    id: CategoryId::new("drinks"),
                    title: "Cold Drinks".to_string(),
                    note: None,
                    items: vec![
                        MenuItem::new("coke", "Mexican Coke", Money::new(350)),
                        MenuItem::new("water", "San Pellegrino", Money::dollars(4)),
                    ],
                },
            ],
            sizes: vec![
                size("sm", "Small (12\")", Money::dollars(-2)),
                size("md", "Medium (14\")", Money::zero()),
                size("lg", "Large (16\")", Money::dollars(4)),
            ],
            toppings: vec![
                topping("extra-cheese", "Extra Cheese", Money::dollars(2)),
                topping("mushrooms", "Mushrooms", Money::dollars(2)),
                topping("pepperoni", "Pepperoni", Money::dollars(3)),
                topping("sausage", "Sausage", Money::dollars(3)),
                topping("jalapeno", "Jalape\u{f1}o", Money::new(150)),
                topping("basil", "Basil", Money::dollars(1)),
            ],
            pizza_category: CategoryId::new(PIZZA_CATEGORY),
            default_size: SizeId::new(DEFAULT_SIZE),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::pizza_shack()
    }
}

fn size(id: &str, name: &str, price_delta: Money) -> Size {
    Size {
        id: SizeId::new(id),
        name: name.to_string(),
        price_delta,
    }
}

fn topping(id: &str, name: &str, price: Money) -> Topping {
    Topping {
        id: ToppingId::new(id),
        name: name.to_string(),
        price,
    }
}
