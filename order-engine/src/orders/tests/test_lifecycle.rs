use super::*;
use crate::payment::PaymentResult;

async fn one_line_order(fx: &Fixture) -> String {
    let cart = cart_of(&[(&fx.tea, 1)]);
    fx.orders.create_order(&fx.ctx, dine_in(fx, cart)).await.unwrap()
}

#[tokio::test]
async fn test_full_chain_stepwise() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        fx.orders.advance_status(&fx.ctx, &order_id, target).await.unwrap();
        let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();
        assert_eq!(order.status, target);
    }
}

#[tokio::test]
async fn test_skipping_a_step_rejected() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    let result = fx
        .orders
        .advance_status(&fx.ctx, &order_id, OrderStatus::Ready)
        .await;
    assert!(matches!(
        result,
        Err(OrderError::InvalidTransition {
            current: OrderStatus::Pending,
            requested: OrderStatus::Ready,
        })
    ));

    // Nothing moved
    let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_advance_is_idempotent_on_retry() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    fx.orders
        .advance_status(&fx.ctx, &order_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    let first = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();

    // Client retry of the same command succeeds without a state change
    fx.orders
        .advance_status(&fx.ctx, &order_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    let second = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();

    assert_eq!(second.status, OrderStatus::Confirmed);
    assert_eq!(second.version, first.version);
    assert_eq!(second.updated_at, first.updated_at);
}

#[tokio::test]
async fn test_cancel_from_every_non_terminal_status() {
    let fx = fixture().await;
    for target in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ] {
        let order_id = one_line_order(&fx).await;
        if target != OrderStatus::Pending {
            advance_to(&fx, &order_id, target).await;
        }
        fx.orders
            .advance_status(&fx.ctx, &order_id, OrderStatus::Cancelled)
            .await
            .unwrap();
        let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }
}

#[tokio::test]
async fn test_cancel_after_completed_rejected() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;
    advance_to(&fx, &order_id, OrderStatus::Completed).await;

    let result = fx
        .orders
        .advance_status(&fx.ctx, &order_id, OrderStatus::Cancelled)
        .await;
    assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_payment_settles_once() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    fx.orders
        .set_payment_status(&fx.ctx, &order_id, PaymentStatus::Paid)
        .await
        .unwrap();

    // Same-state retry is a no-op
    fx.orders
        .set_payment_status(&fx.ctx, &order_id, PaymentStatus::Paid)
        .await
        .unwrap();

    // A paid order never silently becomes unpaid
    let result = fx
        .orders
        .set_payment_status(&fx.ctx, &order_id, PaymentStatus::Unpaid)
        .await;
    assert!(matches!(
        result,
        Err(OrderError::InvalidPaymentTransition {
            current: PaymentStatus::Paid,
            requested: PaymentStatus::Unpaid,
        })
    ));
}

#[tokio::test]
async fn test_failed_payment_is_terminal() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    fx.orders
        .set_payment_status(&fx.ctx, &order_id, PaymentStatus::Failed)
        .await
        .unwrap();
    let result = fx
        .orders
        .set_payment_status(&fx.ctx, &order_id, PaymentStatus::Paid)
        .await;
    assert!(matches!(
        result,
        Err(OrderError::InvalidPaymentTransition { .. })
    ));
}

#[tokio::test]
async fn test_webhook_drives_payment_status() {
    let fx = fixture().await;

    let order_id = one_line_order(&fx).await;
    fx.orders
        .on_payment_result(&fx.ctx, &order_id, PaymentResult::Succeeded)
        .await
        .unwrap();
    let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Paid);

    let order_id = one_line_order(&fx).await;
    fx.orders
        .on_payment_result(&fx.ctx, &order_id, PaymentResult::Failed)
        .await
        .unwrap();
    let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
async fn test_unknown_order_not_found() {
    let fx = fixture().await;
    let result = fx
        .orders
        .advance_status(&fx.ctx, "ghost", OrderStatus::Confirmed)
        .await;
    assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
}

#[tokio::test]
async fn test_foreign_tenant_reads_not_found() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;

    // Same id under a different store scope is indistinguishable from a
    // missing order
    let foreign = TenantContext::new("store-2", "outlet-1");
    let result = fx
        .orders
        .advance_status(&foreign, &order_id, OrderStatus::Confirmed)
        .await;
    assert!(matches!(result, Err(OrderError::OrderNotFound(_))));

    let foreign_outlet = TenantContext::new("store-1", "outlet-2");
    let result = fx.orders.get_order(&foreign_outlet, &order_id).await;
    assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
}

#[tokio::test]
async fn test_stale_pending_query() {
    let fx = fixture().await;
    let order_id = one_line_order(&fx).await;
    let order = fx.orders.get_order(&fx.ctx, &order_id).await.unwrap();

    // Strictly-before cutoff: the order itself is not yet stale at its
    // own creation instant
    let stale = fx
        .orders
        .stale_pending_since(&fx.ctx, order.created_at)
        .await
        .unwrap();
    assert!(stale.is_empty());

    let stale = fx
        .orders
        .stale_pending_since(&fx.ctx, order.created_at + 1)
        .await
        .unwrap();
    assert_eq!(stale, vec![order_id.clone()]);

    // Leaving pending removes it from the stale set
    fx.orders
        .advance_status(&fx.ctx, &order_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    let stale = fx
        .orders
        .stale_pending_since(&fx.ctx, order.created_at + 1)
        .await
        .unwrap();
    assert!(stale.is_empty());
}
