//! Order page controller.
//!
//! Ties the cart, pricing, session persistence and checkout together the way
//! the order screen uses them: restore once on open, then save after every
//! change.

use crate::cart::{Cart, CartPricing, PizzaCustomization, SummaryLine};
use crate::catalog::{Catalog, MenuItem};
use crate::checkout::{CheckoutFlow, CheckoutStatus};
use crate::clock::Clock;
use crate::error::CommerceError;
use crate::ids::{ItemId, LineId, SizeId, ToppingId};
use crate::session::{OrderMode, SessionStore};
use tracing::{debug, info};

/// State behind the order screen.
#[derive(Debug)]
pub struct OrderPage<S, C> {
    catalog: Catalog,
    store: S,
    clock: C,
    mode: OrderMode,
    cart: Cart,
    checkout: CheckoutFlow,
}

impl<S: SessionStore, C: Clock> OrderPage<S, C> {
    /// Open the order page, restoring any saved session.
    ///
    /// Opening never writes: the saved record (and its timestamp) is left as
    /// is until the first change.
    pub fn open(catalog: Catalog, store: S, clock: C) -> Self {
        let (mode, cart) = match store.load() {
            Some(session) => {
                debug!(
                    lines = session.line_items.len(),
                    mode = %session.mode,
                    "restored order session"
                );
                (
                    session.mode,
                    Cart::from_parts(session.line_items, session.notes),
                )
            }
            None => (OrderMode::default(), Cart::new()),
        };

        Self {
            catalog,
            store,
            clock,
            mode,
            cart,
            checkout: CheckoutFlow::new(),
        }
    }

    /// Use a custom checkout delay.
    pub fn with_checkout_delay(mut self, delay_ms: i64) -> Self {
        self.checkout = CheckoutFlow::with_delay(delay_ms);
        self
    }

    fn persist(&self) {
        let notes = if self.cart.is_empty() && self.cart.notes().trim().is_empty() {
            ""
        } else {
            self.cart.notes()
        };
        self.store.save(self.mode, self.cart.items(), notes);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn notes(&self) -> &str {
        self.cart.notes()
    }

    pub fn status(&self) -> CheckoutStatus {
        self.checkout.status()
    }

    pub fn checkout_flow(&self) -> &CheckoutFlow {
        &self.checkout
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        self.mode = mode;
        self.persist();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.cart.set_notes(notes);
        self.persist();
    }

    /// Add one pizza from the pizza category with the given size and toppings.
    pub fn add_pizza(
        &mut self,
        item_id: &ItemId,
        size_id: &SizeId,
        topping_ids: impl IntoIterator<Item = ToppingId>,
    ) -> Result<LineId, CommerceError> {
        let base = self.lookup_item(item_id)?;
        if !self.catalog.is_pizza(item_id) {
            return Err(CommerceError::NotAPizza(item_id.to_string()));
        }
        if self.catalog.find_size(size_id).is_none() {
            return Err(CommerceError::SizeNotFound(size_id.to_string()));
        }
        let customization = PizzaCustomization::new(size_id.clone(), topping_ids);
        if let Some(unknown) = customization
            .topping_ids
            .iter()
            .find(|t| self.catalog.find_topping(t).is_none())
        {
            return Err(CommerceError::ToppingNotFound(unknown.to_string()));
        }

        let line = self.cart.add_pizza(base, customization);
        self.persist();
        Ok(line)
    }

    /// Add one flat-priced item. Pizzas are added with their default size.
    pub fn add_item(&mut self, item_id: &ItemId) -> Result<LineId, CommerceError> {
        if self.catalog.is_pizza(item_id) {
            let size = self.catalog.default_size.clone();
            return self.add_pizza(item_id, &size, []);
        }
        let item = self.lookup_item(item_id)?;
        let line = self.cart.add_other(item);
        self.persist();
        Ok(line)
    }

    pub fn increment(&mut self, line_id: &LineId) -> Result<(), CommerceError> {
        if !self.cart.increment(line_id) {
            return Err(CommerceError::LineNotFound(line_id.to_string()));
        }
        self.persist();
        Ok(())
    }

    pub fn decrement(&mut self, line_id: &LineId) -> Result<(), CommerceError> {
        if !self.cart.decrement(line_id) {
            return Err(CommerceError::LineNotFound(line_id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Empty the cart and notes and drop the saved session.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.store.clear();
    }

    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        CartPricing::calculate(&self.cart, &self.catalog)
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        self.cart.summary_lines(&self.catalog)
    }

    /// Start the simulated checkout.
    pub fn checkout(&mut self) -> Result<(), CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.checkout.begin(self.clock.now_millis())?;
        info!(items = self.cart.item_count(), "checkout started");
        Ok(())
    }

    /// Advance the checkout timer. On completion the cart and saved session
    /// are cleared.
    pub fn tick(&mut self) -> CheckoutStatus {
        if self.checkout.poll(self.clock.now_millis()) {
            info!("checkout complete");
            self.clear();
        }
        self.checkout.status()
    }

    /// Leave the success screen and start over.
    pub fn start_new_order(&mut self) -> Result<(), CommerceError> {
        self.checkout.reset()
    }

    fn lookup_item(&self, item_id: &ItemId) -> Result<MenuItem, CommerceError> {
        self.catalog
            .find_item(item_id)
            .cloned()
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CHECKOUT_DELAY_MS;
    use crate::clock::ManualClock;
    use crate::money::Money;
    use crate::session::{KvSessionStore, SESSION_KEY, SESSION_TTL_MS};
    use shack_cache::{KvStore, MemoryStore};
    use std::sync::Arc;

    const T0: i64 = 1_700_000_000_000;

    type Page = OrderPage<KvSessionStore<Arc<MemoryStore>, ManualClock>, ManualClock>;

    fn open(mem: &Arc<MemoryStore>, clock: &ManualClock) -> Page {
        OrderPage::open(
            Catalog::pizza_shack(),
            KvSessionStore::new(mem.clone(), clock.clone()),
            clock.clone(),
        )
    }

    fn fresh() -> (Page, Arc<MemoryStore>, ManualClock) {
        let mem = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(T0);
        (open(&mem, &clock), mem, clock)
    }

    #[test]
    fn test_example_order_totals() {
        let (mut page, _, _) = fresh();
        let margherita = ItemId::new("margherita");
        let lg = SizeId::new("lg");
        page.add_pizza(&margherita, &lg, [ToppingId::new("basil")]).unwrap();
        page.add_pizza(&margherita, &lg, [ToppingId::new("basil")]).unwrap();
        page.add_item(&ItemId::new("water")).unwrap();

        let pricing = page.pricing().unwrap();
        assert_eq!(pricing.subtotal, Money::dollars(46));
        assert_eq!(pricing.tax.display(), "$3.68");
        assert_eq!(pricing.total.display(), "$49.68");
        assert_eq!(page.cart().items().len(), 2);
    }

    #[test]
    fn test_open_does_not_save() {
        let (_page, mem, _) = fresh();
        assert!(mem.is_empty());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let (mut page, mem, clock) = fresh();
        page.add_item(&ItemId::new("buffalo-wings")).unwrap();
        page.set_mode(OrderMode::Delivery);
        page.set_notes("extra ranch");

        let reopened = open(&mem, &clock);
        assert_eq!(reopened.mode(), OrderMode::Delivery);
        assert_eq!(reopened.notes(), "extra ranch");
        assert_eq!(reopened.cart(), page.cart());
    }

    #[test]
    fn test_reopen_keeps_original_timestamp() {
        let (mut page, mem, clock) = fresh();
        page.add_item(&ItemId::new("coke")).unwrap();
        clock.advance(60_000);
        let _reopened = open(&mem, &clock);

        let store = KvSessionStore::new(mem.clone(), clock.clone());
        assert_eq!(store.load().unwrap().updated_at, T0);
    }

    #[test]
    fn test_expired_session_starts_fresh() {
        let (mut page, mem, clock) = fresh();
        page.add_item(&ItemId::new("coke")).unwrap();
        clock.advance(SESSION_TTL_MS + 1);

        let reopened = open(&mem, &clock);
        assert!(reopened.cart().is_empty());
        assert_eq!(reopened.mode(), OrderMode::Pickup);
        assert!(!mem.exists(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_blank_notes_on_empty_cart_save_as_empty() {
        let (mut page, mem, clock) = fresh();
        page.set_notes("   ");

        let store = KvSessionStore::new(mem, clock);
        assert_eq!(store.load().unwrap().notes, "");
        assert_eq!(page.notes(), "   ");
    }

    #[test]
    fn test_clear_removes_session() {
        let (mut page, mem, _) = fresh();
        page.add_item(&ItemId::new("coke")).unwrap();
        page.set_notes("hi");
        page.clear();

        assert!(page.cart().is_empty());
        assert_eq!(page.notes(), "");
        assert!(mem.is_empty());
    }

    #[test]
    fn test_rejects_unknown_options() {
        let (mut page, _, _) = fresh();
        let margherita = ItemId::new("margherita");
        assert_eq!(
            page.add_pizza(&margherita, &SizeId::new("xxl"), []),
            Err(CommerceError::SizeNotFound("xxl".to_string()))
        );
        assert_eq!(
            page.add_pizza(&margherita, &SizeId::new("md"), [ToppingId::new("pineapple")]),
            Err(CommerceError::ToppingNotFound("pineapple".to_string()))
        );
        assert_eq!(
            page.add_pizza(&ItemId::new("coke"), &SizeId::new("md"), []),
            Err(CommerceError::NotAPizza("coke".to_string()))
        );
        assert_eq!(
            page.add_item(&ItemId::new("calzone")),
            Err(CommerceError::ItemNotFound("calzone".to_string()))
        );
        assert!(page.cart().is_empty());
    }

    #[test]
    fn test_add_item_on_pizza_uses_default_size() {
        let (mut page, _, _) = fresh();
        let line = page.add_item(&ItemId::new("classic-pepperoni")).unwrap();
        assert_eq!(line.as_str(), "classic-pepperoni|md|");
    }

    #[test]
    fn test_quantity_controls() {
        let (mut page, _, _) = fresh();
        let line = page.add_item(&ItemId::new("garlic-knots")).unwrap();
        page.increment(&line).unwrap();
        assert_eq!(page.cart().item_count(), 2);
        page.decrement(&line).unwrap();
        page.decrement(&line).unwrap();
        assert!(page.cart().is_empty());
        assert_eq!(
            page.decrement(&line),
            Err(CommerceError::LineNotFound("garlic-knots".to_string()))
        );
    }

    #[test]
    fn test_checkout_flow() {
        let (mut page, mem, clock) = fresh();
        assert_eq!(page.checkout(), Err(CommerceError::EmptyCart));

        page.add_item(&ItemId::new("coke")).unwrap();
        page.checkout().unwrap();
        assert_eq!(page.status(), CheckoutStatus::Processing { started_at: T0 });

        clock.advance(CHECKOUT_DELAY_MS - 1);
        assert!(matches!(page.tick(), CheckoutStatus::Processing { .. }));
        assert_eq!(page.cart().item_count(), 1);

        clock.advance(1);
        assert_eq!(page.tick(), CheckoutStatus::Success);
        assert!(page.cart().is_empty());
        assert!(mem.is_empty());

        assert!(page.checkout().is_err());
        page.start_new_order().unwrap();
        assert_eq!(page.status(), CheckoutStatus::Idle);
    }

    #[test]
    fn test_custom_checkout_delay() {
        let (page, _, _) = fresh();
        let mut page = page.with_checkout_delay(0);
        page.add_item(&ItemId::new("water")).unwrap();
        page.checkout().unwrap();
        assert_eq!(page.tick(), CheckoutStatus::Success);
    }
}
