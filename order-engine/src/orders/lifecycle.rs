//! Order status state machine
//!
//! Forward-only, no skipping; cancellation is reachable from every
//! non-terminal status. Re-applying the current state is a no-op so that
//! client-side retries on network failure stay safe.

use super::error::OrderError;
use shared::models::{OrderStatus, PaymentStatus};

/// Outcome of a transition check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Write the new state
    Apply,
    /// Already there; nothing to write
    Noop,
}

/// Validate a status transition
pub fn check_transition(current: OrderStatus, target: OrderStatus) -> Result<Advance, OrderError> {
    if current == target {
        return Ok(Advance::Noop);
    }
    let allowed = match target {
        OrderStatus::Cancelled => !current.is_terminal(),
        _ => current.successor() == Some(target),
    };
    if allowed {
        Ok(Advance::Apply)
    } else {
        Err(OrderError::InvalidTransition {
            current,
            requested: target,
        })
    }
}

/// Validate a payment status transition
///
/// Only `unpaid -> paid` and `unpaid -> failed` exist; a paid order never
/// silently becomes unpaid again.
pub fn check_payment_transition(
    current: PaymentStatus,
    target: PaymentStatus,
) -> Result<Advance, OrderError> {
    if current == target {
        return Ok(Advance::Noop);
    }
    if current == PaymentStatus::Unpaid {
        return Ok(Advance::Apply);
    }
    Err(OrderError::InvalidPaymentTransition {
        current,
        requested: target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    #[test]
    fn test_forward_chain_stepwise() {
        for pair in CHAIN.windows(2) {
            assert_eq!(check_transition(pair[0], pair[1]).unwrap(), Advance::Apply);
        }
    }

    #[test]
    fn test_no_skipping() {
        let result = check_transition(OrderStatus::Pending, OrderStatus::Ready);
        assert!(matches!(
            result,
            Err(OrderError::InvalidTransition {
                current: OrderStatus::Pending,
                requested: OrderStatus::Ready,
            })
        ));
        assert!(check_transition(OrderStatus::Confirmed, OrderStatus::Completed).is_err());
    }

    #[test]
    fn test_no_going_back() {
        assert!(check_transition(OrderStatus::Preparing, OrderStatus::Confirmed).is_err());
        assert!(check_transition(OrderStatus::Completed, OrderStatus::Ready).is_err());
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert_eq!(
                check_transition(status, OrderStatus::Cancelled).unwrap(),
                Advance::Apply
            );
        }
    }

    #[test]
    fn test_cancel_from_completed_rejected() {
        assert!(check_transition(OrderStatus::Completed, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn test_same_state_is_noop() {
        assert_eq!(
            check_transition(OrderStatus::Confirmed, OrderStatus::Confirmed).unwrap(),
            Advance::Noop
        );
        assert_eq!(
            check_transition(OrderStatus::Cancelled, OrderStatus::Cancelled).unwrap(),
            Advance::Noop
        );
    }

    #[test]
    fn test_payment_transitions() {
        assert_eq!(
            check_payment_transition(PaymentStatus::Unpaid, PaymentStatus::Paid).unwrap(),
            Advance::Apply
        );
        assert_eq!(
            check_payment_transition(PaymentStatus::Unpaid, PaymentStatus::Failed).unwrap(),
            Advance::Apply
        );
        assert_eq!(
            check_payment_transition(PaymentStatus::Paid, PaymentStatus::Paid).unwrap(),
            Advance::Noop
        );
    }

    #[test]
    fn test_paid_never_reverts() {
        assert!(check_payment_transition(PaymentStatus::Paid, PaymentStatus::Unpaid).is_err());
        assert!(check_payment_transition(PaymentStatus::Paid, PaymentStatus::Failed).is_err());
        assert!(check_payment_transition(PaymentStatus::Failed, PaymentStatus::Paid).is_err());
    }
}
