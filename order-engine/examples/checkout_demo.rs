//! Checkout demo
//!
//! Seeds a small catalog into the in-memory store and walks one dine-in
//! order from cart to released table, logging every step.
//!
//! ```bash
//! cargo run -p order-engine --example checkout_demo
//! ```

use order_engine::catalog::CatalogService;
use order_engine::common::init_logger;
use order_engine::orders::OrdersManager;
use order_engine::store::{MemoryStore, RecordStore};
use order_engine::tables::TablesManager;
use order_engine::tenant::TenantContext;
use rust_decimal::Decimal;
use shared::cart::Cart;
use shared::models::{
    CategoryCreate, DiningTableCreate, MenuItemCreate, OrderCreate, OrderStatus, Outlet,
    OverrideUpsert, PaymentMethod, PaymentStatus,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("info", false)?;

    let store = Arc::new(MemoryStore::new());
    let ctx = TenantContext::new("store-1", "outlet-1");

    store
        .put_outlet(&Outlet {
            id: ctx.outlet_id.clone(),
            store_id: ctx.store_id.clone(),
            name: "Riverside".to_string(),
            tax_percent: Decimal::from(10),
            service_percent: Decimal::from(5),
            is_active: true,
        })
        .await?;

    let catalog = CatalogService::new(store.clone());
    let mains = catalog
        .create_category(
            &ctx,
            CategoryCreate {
                name: "Mains".to_string(),
                sort_order: None,
            },
        )
        .await?;
    let satay = catalog
        .create_item(
            &ctx,
            MenuItemCreate {
                category_id: mains.id.clone(),
                name: "Chicken Satay".to_string(),
                base_price: 25000,
                base_discount_price: None,
                base_available: None,
            },
        )
        .await?;
    catalog
        .upsert_override(
            &ctx,
            &satay.id,
            OverrideUpsert {
                price_override: Some(23000),
                is_available_override: None,
            },
        )
        .await?;

    for view in catalog.effective_menu(&ctx).await? {
        info!(
            item = %view.name,
            price = view.effective_price,
            available = view.effective_available,
            "effective menu entry"
        );
    }

    let tables = TablesManager::new(store.clone());
    let table = tables
        .create_table(
            &ctx,
            DiningTableCreate {
                name: "T1".to_string(),
                capacity: Some(4),
            },
        )
        .await?;

    let orders = OrdersManager::new(store.clone());
    let mut cart = Cart::new();
    cart.add_line(satay.id.clone(), 2, None);
    let order_id = orders
        .create_order(
            &ctx,
            OrderCreate {
                table_id: Some(table.id.clone()),
                cart,
                customer_notes: None,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await?;

    let order = orders.get_order(&ctx, &order_id).await?;
    info!(
        order_id = %order_id,
        subtotal = order.subtotal,
        tax = order.tax_amount,
        service = order.service_charge,
        total = order.total_amount,
        "order created"
    );

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        orders.advance_status(&ctx, &order_id, target).await?;
    }

    if let Err(e) = tables.release(&ctx, &table.id).await {
        info!(error = %e, "release blocked until the bill is settled");
    }

    orders
        .set_payment_status(&ctx, &order_id, PaymentStatus::Paid)
        .await?;
    info!(
        table_status = ?tables.status(&ctx, &table.id).await?,
        "settled and released"
    );

    Ok(())
}
