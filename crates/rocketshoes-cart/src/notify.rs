//! # Notifiers
//!
//! Implementations of [`Notifier`]: where "Quantidade solicitada fora de
//! estoque" ends up.
//!
//! | Notifier             | Used by                                    |
//! |----------------------|--------------------------------------------|
//! | `TracingNotifier`    | Long-running hosts: logs at `warn`         |
//! | `CollectingNotifier` | The CLI (prints after the command) & tests |
//! | `NoOpNotifier`       | Callers that only use the `try_*` methods  |

use std::sync::{Mutex, PoisonError};

use tracing::warn;

use rocketshoes_core::CartOperation;

use crate::ports::Notifier;

/// One notification as it was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub operation: CartOperation,
    pub message: String,
}

/// Logs every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, operation: CartOperation, message: &str) {
        warn!(operation = %operation, "{}", message);
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _operation: CartOperation, _message: &str) {}
}

/// Keeps notifications in order until they are taken.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of everything collected so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Just the message texts, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, operation: CartOperation, message: &str) {
        self.lock().push(Notification {
            operation,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::{MSG_OUT_OF_STOCK, MSG_REMOVE_FAILED};

    #[test]
    fn test_collecting_notifier_keeps_order() {
        let notifier = CollectingNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(CartOperation::Add, MSG_OUT_OF_STOCK);
        notifier.notify(CartOperation::Remove, MSG_REMOVE_FAILED);

        assert_eq!(
            notifier.messages(),
            vec![MSG_OUT_OF_STOCK.to_string(), MSG_REMOVE_FAILED.to_string()]
        );
        assert_eq!(notifier.notifications()[1].operation, CartOperation::Remove);
    }

    #[test]
    fn test_take_drains() {
        let notifier = CollectingNotifier::new();
        notifier.notify(CartOperation::UpdateAmount, "x");

        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_other_notifiers_accept_anything() {
        TracingNotifier.notify(CartOperation::Add, MSG_OUT_OF_STOCK);
        NoOpNotifier.notify(CartOperation::Add, MSG_OUT_OF_STOCK);
    }
}
