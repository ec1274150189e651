//! Order manager flow tests
//!
//! Shared fixture: one store, one outlet (tax 10%, service 5%), two menu
//! items, and one table, driven through the public manager APIs.

mod test_lifecycle;

pub(crate) use crate::catalog::CatalogService;
pub(crate) use crate::orders::{OrderError, OrdersManager};
pub(crate) use crate::payment::{PaymentError, PaymentGateway, PaymentToken};
pub(crate) use crate::store::{MemoryStore, RecordStore};
pub(crate) use crate::tables::{TableError, TablesManager};
pub(crate) use crate::tenant::TenantContext;
pub(crate) use shared::cart::Cart;
pub(crate) use shared::models::{
    DiningTableCreate, MenuItem, MenuItemCreate, OrderCreate, OrderStatus, Outlet, OverrideUpsert,
    PaymentMethod, PaymentStatus, TableStatus,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Gateway double that records initiation calls
pub(crate) struct RecordingGateway {
    pub calls: Mutex<Vec<(String, i64)>>,
    pub fail: bool,
}

impl RecordingGateway {
    pub(crate) fn new(fail: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn initiate_payment(
        &self,
        order_id: &str,
        amount: i64,
    ) -> Result<PaymentToken, PaymentError> {
        self.calls.lock().push((order_id.to_string(), amount));
        if self.fail {
            return Err(PaymentError::Unavailable("gateway down".to_string()));
        }
        Ok(PaymentToken(format!("tok-{order_id}")))
    }
}

pub(crate) struct Fixture {
    pub store: Arc<MemoryStore>,
    pub orders: OrdersManager,
    pub tables: TablesManager,
    pub catalog: CatalogService,
    pub gateway: Arc<RecordingGateway>,
    pub ctx: TenantContext,
    pub table_id: String,
    /// 25000 base price
    pub satay: MenuItem,
    /// 15000 base price
    pub tea: MenuItem,
}

pub(crate) async fn fixture() -> Fixture {
    fixture_with_gateway(false).await
}

pub(crate) async fn fixture_with_gateway(gateway_fails: bool) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let ctx = TenantContext::new("store-1", "outlet-1");

    store
        .put_outlet(&Outlet {
            id: ctx.outlet_id.clone(),
            store_id: ctx.store_id.clone(),
            name: "Downtown".to_string(),
            tax_percent: Decimal::from(10),
            service_percent: Decimal::from(5),
            is_active: true,
        })
        .await
        .unwrap();

    let catalog = CatalogService::new(store.clone());
    let satay = seed_item(&catalog, &ctx, "Chicken Satay", 25000).await;
    let tea = seed_item(&catalog, &ctx, "Iced Tea", 15000).await;

    let tables = TablesManager::new(store.clone());
    let table = tables
        .create_table(
            &ctx,
            DiningTableCreate {
                name: "T1".to_string(),
                capacity: Some(4),
            },
        )
        .await
        .unwrap();

    let gateway = Arc::new(RecordingGateway::new(gateway_fails));
    let orders = OrdersManager::new(store.clone()).with_gateway(gateway.clone());

    Fixture {
        store,
        orders,
        tables,
        catalog,
        gateway,
        ctx,
        table_id: table.id,
        satay,
        tea,
    }
}

pub(crate) async fn seed_item(
    catalog: &CatalogService,
    ctx: &TenantContext,
    name: &str,
    price: i64,
) -> MenuItem {
    catalog
        .create_item(
            ctx,
            MenuItemCreate {
                category_id: "cat-1".to_string(),
                name: name.to_string(),
                base_price: price,
                base_discount_price: None,
                base_available: None,
            },
        )
        .await
        .unwrap()
}

pub(crate) fn cart_of(items: &[(&MenuItem, i32)]) -> Cart {
    let mut cart = Cart::new();
    for (item, quantity) in items {
        cart.add_line(item.id.clone(), *quantity, None);
    }
    cart
}

/// Dine-in checkout payload on the fixture table, cash by default
pub(crate) fn dine_in(fx: &Fixture, cart: Cart) -> OrderCreate {
    OrderCreate {
        table_id: Some(fx.table_id.clone()),
        cart,
        customer_notes: None,
        payment_method: PaymentMethod::Cash,
    }
}

/// Drive an order through the forward chain up to `target`
pub(crate) async fn advance_to(fx: &Fixture, order_id: &str, target: OrderStatus) {
    let chain = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];
    for status in chain {
        fx.orders
            .advance_status(&fx.ctx, order_id, status)
            .await
            .unwrap();
        if status == target {
            break;
        }
    }
}
