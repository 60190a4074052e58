//! Pizza customization and unit pricing.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, MenuItem};
use crate::error::CommerceError;
use crate::ids::{ItemId, LineId, SizeId, ToppingId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Chosen size and topping set for one pizza.
///
/// Toppings are a set: duplicates collapse and iteration is sorted, which is
/// what the line key relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PizzaCustomization {
    pub size_id: SizeId,
    pub topping_ids: BTreeSet<ToppingId>,
}

impl PizzaCustomization {
    pub fn new(size_id: impl Into<SizeId>, toppings: impl IntoIterator<Item = ToppingId>) -> Self {
        Self {
            size_id: size_id.into(),
            topping_ids: toppings.into_iter().collect(),
        }
    }

    /// Toggle a topping on or off.
    pub fn toggle_topping(&mut self, topping: ToppingId) {
        if !self.topping_ids.remove(&topping) {
            self.topping_ids.insert(topping);
        }
    }

    /// Cart key for this customization of `base`: `base|size|t1,t2,...`.
    pub fn line_key(&self, base: &ItemId) -> LineId {
        let toppings: Vec<&str> = self.topping_ids.iter().map(|t| t.as_str()).collect();
        LineId::new(format!("{}|{}|{}", base, self.size_id, toppings.join(",")))
    }
}

/// Unit price of a customized pizza.
///
/// `base.price + size delta + sum of topping prices`. A size or topping the
/// catalog does not know contributes nothing.
pub fn unit_price(
    base: &MenuItem,
    customization: &PizzaCustomization,
    catalog: &Catalog,
) -> Result<Money, CommerceError> {
    let size_delta = catalog
        .find_size(&customization.size_id)
        .map(|s| s.price_delta)
        .unwrap_or_default();
    let toppings = Money::try_sum(
        customization
            .topping_ids
            .iter()
            .filter_map(|id| catalog.find_topping(id))
            .map(|t| t.price),
    )
    .ok_or(CommerceError::Overflow)?;
    base.price
        .checked_add(size_delta)
        .and_then(|price| price.checked_add(toppings))
        .ok_or(CommerceError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita(catalog: &Catalog) -> &MenuItem {
        catalog.find_item(&ItemId::new("margherita")).unwrap()
    }

    #[test]
    fn test_large_with_basil() {
        let catalog = Catalog::pizza_shack();
        let custom = PizzaCustomization::new("lg", [ToppingId::new("basil")]);
        assert_eq!(
            unit_price(margherita(&catalog), &custom, &catalog).unwrap(),
            Money::dollars(21)
        );
    }

    #[test]
    fn test_small_with_jalapeno() {
        let catalog = Catalog::pizza_shack();
        let custom = PizzaCustomization::new("sm", [ToppingId::new("jalapeno")]);
        // 16 - 2 + 1.50
        assert_eq!(
            unit_price(margherita(&catalog), &custom, &catalog).unwrap(),
            Money::new(1550)
        );
    }

    #[test]
    fn test_unknown_options_contribute_zero() {
        let catalog = Catalog::pizza_shack();
        let custom = PizzaCustomization::new(
            "xxl",
            [ToppingId::new("pineapple"), ToppingId::new("basil")],
        );
        assert_eq!(
            unit_price(margherita(&catalog), &custom, &catalog).unwrap(),
            Money::dollars(17)
        );
    }

    #[test]
    fn test_line_key_sorts_toppings() {
        let a = PizzaCustomization::new(
            "md",
            [ToppingId::new("sausage"), ToppingId::new("basil")],
        );
        let b = PizzaCustomization::new(
            "md",
            [ToppingId::new("basil"), ToppingId::new("sausage")],
        );
        let base = ItemId::new("margherita");
        assert_eq!(a.line_key(&base), b.line_key(&base));
        assert_eq!(a.line_key(&base).as_str(), "margherita|md|basil,sausage");
    }

    #[test]
    fn test_line_key_without_toppings() {
        let custom = PizzaCustomization::new("lg", []);
        assert_eq!(
            custom.line_key(&ItemId::new("meat-lovers")).as_str(),
            "meat-lovers|lg|"
        );
    }

    #[test]
    fn test_toggle_topping() {
        let mut custom = PizzaCustomization::new("md", []);
        custom.toggle_topping(ToppingId::new("basil"));
        assert!(custom.topping_ids.contains(&ToppingId::new("basil")));
        custom.toggle_topping(ToppingId::new("basil"));
        assert!(custom.topping_ids.is_empty());
    }

    #[test]
    fn test_duplicate_toppings_in_json_collapse() {
        let custom: PizzaCustomization =
            serde_json::from_str(r#"{"sizeId":"md","toppingIds":["basil","basil"]}"#).unwrap();
        assert_eq!(custom.topping_ids.len(), 1);
    }
}
