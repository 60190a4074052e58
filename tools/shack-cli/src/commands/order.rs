//! Order commands.
//!
//! Every invocation restores the saved session from the state directory,
//! applies one change and lets the order page persist it.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use shack_cache::FileStore;
use shack_commerce::catalog::Catalog;
use shack_commerce::checkout::CheckoutStatus;
use shack_commerce::clock::{Clock, SystemClock};
use shack_commerce::order::OrderPage;
use shack_commerce::session::{KvSessionStore, OrderMode, SessionStore};
use shack_commerce::{ItemId, LineId, Money, SizeId, ToppingId};

use super::{OrderArgs, OrderCommand};
use crate::context::Context;
use crate::output::status_badge;

type CliOrderPage = OrderPage<KvSessionStore<FileStore, SystemClock>, SystemClock>;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let mut page = open_page(ctx)?;

    match args.command.unwrap_or(OrderCommand::Show) {
        OrderCommand::Show => {}
        OrderCommand::Add {
            item,
            size,
            toppings,
        } => {
            let line = add_to_order(&mut page, &item, size.as_deref(), &toppings)?;
            ctx.output.success(&format!("Added {}", line));
        }
        OrderCommand::Inc { line } => {
            page.increment(&LineId::new(line))?;
        }
        OrderCommand::Dec { line } => {
            page.decrement(&LineId::new(line))?;
        }
        OrderCommand::Mode { mode } => {
            let mode: OrderMode = mode.parse().map_err(|e: String| anyhow!(e))?;
            page.set_mode(mode);
        }
        OrderCommand::Notes { text } => {
            page.set_notes(text);
        }
        OrderCommand::Clear => {
            page.clear();
            ctx.output.success("Order cleared");
        }
        OrderCommand::Checkout => return checkout(&mut page, ctx).await,
    }

    show(&page, ctx)
}

fn open_page(ctx: &Context) -> Result<CliOrderPage> {
    let state_dir = &ctx.config.order.state_dir;
    let store = FileStore::open(state_dir)
        .with_context(|| format!("Failed to open order state in {}", state_dir.display()))?;
    ctx.output
        .debug(&format!("order state: {}", store.root().display()));

    let sessions = KvSessionStore::new(store, SystemClock);
    Ok(OrderPage::open(Catalog::pizza_shack(), sessions, SystemClock))
}

/// Add an item. A size or topping makes it a pizza request; pizzas without
/// options get the default size.
fn add_to_order<S: SessionStore, C: Clock>(
    page: &mut OrderPage<S, C>,
    item: &str,
    size: Option<&str>,
    toppings: &[String],
) -> Result<LineId> {
    let item_id = ItemId::new(item);
    let customized = size.is_some() || !toppings.is_empty();

    let line = if customized || page.catalog().is_pizza(&item_id) {
        let size_id = size
            .map(SizeId::new)
            .unwrap_or_else(|| page.catalog().default_size.clone());
        page.add_pizza(&item_id, &size_id, toppings.iter().map(ToppingId::new))?
    } else {
        page.add_item(&item_id)?
    };
    Ok(line)
}

async fn checkout(page: &mut CliOrderPage, ctx: &Context) -> Result<()> {
    let total = page.pricing()?.total;
    let mode = page.mode();
    page.checkout()?;

    let spinner = ctx.output.spinner("Placing order...");
    loop {
        if let Some(wait) = page.checkout_flow().remaining(SystemClock.now_millis()) {
            tokio::time::sleep(wait).await;
        }
        match page.tick() {
            CheckoutStatus::Success => break,
            CheckoutStatus::Processing { .. } => continue,
            CheckoutStatus::Idle => {
                spinner.finish_and_clear();
                bail!("Checkout was interrupted");
            }
        }
    }
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "status": CheckoutStatus::Success.as_str(),
            "mode": mode,
            "total": total,
        }));
        return Ok(());
    }

    ctx.output.success(&format!("Order placed: {} ({})", total, mode));
    if mode == OrderMode::Pickup {
        ctx.output
            .info(&format!("Ready in {}", page.catalog().restaurant.pickup_eta));
    }
    ctx.output.info(&page.catalog().restaurant.note);
    Ok(())
}

/// Snapshot of the order for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderView {
    mode: OrderMode,
    status: &'static str,
    lines: Vec<LineView>,
    notes: String,
    item_count: u64,
    subtotal: Money,
    tax: Money,
    total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Local>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineView {
    id: LineId,
    title: String,
    subtitle: String,
    quantity: u32,
    unit_price: Money,
    subtotal: Money,
}

fn order_view<S: SessionStore, C: Clock>(page: &OrderPage<S, C>) -> Result<OrderView> {
    let pricing = page.pricing()?;
    let lines = page
        .summary()
        .into_iter()
        .zip(pricing.line_items)
        .map(|(summary, priced)| LineView {
            id: summary.id,
            title: summary.title,
            subtitle: summary.subtitle,
            quantity: summary.quantity,
            unit_price: priced.unit_price,
            subtotal: priced.subtotal,
        })
        .collect();

    let saved_at = page
        .store()
        .load()
        .and_then(|session| DateTime::from_timestamp_millis(session.updated_at))
        .map(|t| t.with_timezone(&Local));

    Ok(OrderView {
        mode: page.mode(),
        status: page.status().as_str(),
        lines,
        notes: page.notes().to_string(),
        item_count: pricing.item_count,
        subtotal: pricing.subtotal,
        tax: pricing.tax,
        total: pricing.total,
        saved_at,
    })
}

fn show(page: &CliOrderPage, ctx: &Context) -> Result<()> {
    let view = order_view(page)?;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!("Your order ({})", view.mode));
    ctx.output.kv("status", &status_badge(view.status));
    if let Some(saved_at) = view.saved_at {
        ctx.output
            .kv("saved", &saved_at.format("%Y-%m-%d %H:%M").to_string());
    }

    if view.lines.is_empty() {
        ctx.output.info("Your cart is empty. Add something with `shack order add`.");
        return Ok(());
    }

    for line in &view.lines {
        ctx.output.price_row(
            &format!("{} x{}", line.title, line.quantity),
            line.subtotal,
            32,
        );
        ctx.output.detail(&format!("{}  [{}]", line.subtitle, line.id));
    }
    if !view.notes.is_empty() {
        ctx.output.kv("notes", &view.notes);
    }

    ctx.output.list_item(&format!("{} items", view.item_count));
    ctx.output.price_row("Subtotal", view.subtotal, 32);
    ctx.output.price_row("Tax", view.tax, 32);
    ctx.output.price_row("Total", view.total, 32);
    Ok(())
}
