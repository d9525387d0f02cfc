//! Catalog listing: every product with its current stock.

use std::collections::HashMap;

use tracing::warn;

use super::Context;

pub async fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let (products, stock) = tokio::try_join!(ctx.client.list_products(), ctx.client.list_stock())?;

    let stock: HashMap<_, _> = stock.into_iter().map(|s| (s.id, s.amount)).collect();

    for product in &products {
        let available = match stock.get(&product.id) {
            Some(amount) => amount.to_string(),
            None => {
                warn!(product_id = %product.id, "No stock record for product");
                "-".to_string()
            }
        };

        println!(
            "  #{:<3} {:<55} {:>12}  stock {:>4}",
            product.id.get(),
            product.title,
            ctx.config.format_money(product.price),
            available,
        );
    }

    Ok(())
}
