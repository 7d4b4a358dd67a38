//! Blocking shopper notices.
//!
//! The cart tells the shopper about three things: an item was added, checkout
//! was refused because the cart is empty, and an order was placed. Each notice
//! must be acknowledged before the operation that raised it returns, so
//! [`Notifier::acknowledge`] is synchronous.

use std::fmt;

use apple_cart_core::Price;

/// A message the shopper must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A product was added to the cart.
    ItemAdded { name: String },
    /// Checkout was attempted with nothing in the cart.
    EmptyCart,
    /// The order was placed and the cart cleared.
    OrderPlaced { total: Price },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemAdded { name } => write!(f, "\"{name}\" додано до кошика!"),
            Self::EmptyCart => f.write_str("Кошик порожній. Додайте товари для оформлення."),
            Self::OrderPlaced { total } => write!(
                f,
                "🎉 Замовлення оформлено!\nЗагальна сума: {total}.\nМи зв'яжемося з вами найближчим часом для підтвердження."
            ),
        }
    }
}

/// Capability for presenting notices to the shopper.
pub trait Notifier {
    /// Present `notice` and return once it has been acknowledged.
    fn acknowledge(&mut self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn acknowledge(&mut self, notice: &Notice) {
        (**self).acknowledge(notice);
    }
}

/// Notifier that keeps every notice, for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices in the order they were raised.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Drain recorded notices.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Notifier that only emits a log event; nothing waits on a shopper.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn acknowledge(&mut self, notice: &Notice) {
        tracing::info!(%notice, "Shopper notice");
    }
}
