//! # Cart Commands
//!
//! ## Output
//! ```text
//! $ rocketshoes cart add 1
//!   #1  Tênis de Caminhada Leve Confortável      x2     R$179.90     R$359.80
//!   ─────────────────────────────────────────────────────────────────────────
//!   1 product, 2 items                                      Total  R$359.80
//!
//! $ rocketshoes cart add 1        (stock is 2)
//! ! Quantidade solicitada fora de estoque
//!   ...cart unchanged...
//! ```
//!
//! A failed operation prints the shopper-facing message, then the
//! unchanged cart, and exits with status 1.

use std::sync::Arc;

use rocketshoes_cart::CollectingNotifier;
use rocketshoes_core::{CartSummary, ProductId, UpdateProductAmount};

use super::{Context, Store};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub async fn show(ctx: &Context, json: bool) -> CommandResult {
    let notifier = Arc::new(CollectingNotifier::new());
    let store = ctx.open_store(notifier).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&store.summary())?);
    } else {
        print_summary(ctx, &store.summary());
    }
    Ok(())
}

pub async fn add(ctx: &Context, id: u64) -> CommandResult {
    let notifier = Arc::new(CollectingNotifier::new());
    let store = ctx.open_store(notifier.clone()).await?;

    store.add_product(ProductId::new(id)).await;

    finish(ctx, &store, &notifier)
}

pub async fn remove(ctx: &Context, id: u64) -> CommandResult {
    let notifier = Arc::new(CollectingNotifier::new());
    let store = ctx.open_store(notifier.clone()).await?;

    store.remove_product(ProductId::new(id)).await;

    finish(ctx, &store, &notifier)
}

pub async fn update(ctx: &Context, id: u64, amount: i64) -> CommandResult {
    let notifier = Arc::new(CollectingNotifier::new());
    let store = ctx.open_store(notifier.clone()).await?;

    store
        .update_product_amount(UpdateProductAmount::new(id, amount))
        .await;

    finish(ctx, &store, &notifier)
}

/// Prints notifications and the cart; fails if anything was notified.
fn finish(ctx: &Context, store: &Store, notifier: &CollectingNotifier) -> CommandResult {
    let messages = notifier.messages();
    for message in &messages {
        eprintln!("! {}", message);
    }

    print_summary(ctx, &store.summary());

    if messages.is_empty() {
        Ok(())
    } else {
        Err(messages.join("; ").into())
    }
}

fn print_summary(ctx: &Context, summary: &CartSummary) {
    if summary.entries.is_empty() {
        println!("  (cart is empty)");
        return;
    }

    for entry in &summary.entries {
        println!(
            "  #{:<3} {:<40} x{:<4} {:>12} {:>12}",
            entry.id.get(),
            truncate(&entry.title, 40),
            entry.amount,
            ctx.config.format_money(entry.price),
            ctx.config.format_money(entry.subtotal),
        );
    }

    println!("  {}", "─".repeat(75));
    println!(
        "  {} {}, {} {}{:>width$}  {}",
        summary.item_count,
        plural(summary.item_count as u64, "product"),
        summary.total_quantity,
        plural(summary.total_quantity, "item"),
        "Total",
        ctx.config.format_money(summary.total),
        width = 30,
    );
}

fn plural(n: u64, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Tênis", 10), "Tênis");
        assert_eq!(truncate("Tênis de Caminhada", 6), "Tênis…");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "item"), "item");
        assert_eq!(plural(0, "item"), "items");
        assert_eq!(plural(3, "product"), "products");
    }
}
