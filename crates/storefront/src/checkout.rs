//! Checkout hand-off to an external messaging channel.
//!
//! There is no order backend: checkout turns the cart into a plain-text order
//! message and hands it to a `wa.me`-style link that the shopper opens in a new
//! tab. The cart is left as it is.

use std::fmt::Write as _;

use kitchenmart_core::CurrencyCode;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::notify::Notice;
use crate::store::{Cart, Effect, Storefront};

/// First line of every order message.
pub const ORDER_GREETING: &str = "Hello! I would like to place an order:";

/// Closing payment-terms notice of every order message.
pub const PAYMENT_TERMS: &str =
    "I understand this is CASH ON DELIVERY only. Please confirm my order.";

/// Viewing context the hand-off link is opened in.
pub const HANDOFF_TARGET: &str = "_blank";

/// Errors building a [`CheckoutChannel`].
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid channel URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("channel URL must use https, got {0:?}")]
    InsecureScheme(String),
    #[error("recipient must be a phone number in international format, got {0:?}")]
    InvalidRecipient(String),
}

/// The fixed destination orders are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutChannel {
    base_url: Url,
    recipient: String,
}

impl CheckoutChannel {
    /// Create a channel for `recipient` on the messaging service at `base_url`.
    ///
    /// A leading `+` on the recipient is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not `https`, or the
    /// recipient is not a run of digits.
    pub fn new(base_url: &str, recipient: &str) -> Result<Self, ChannelError> {
        let base_url = Url::parse(base_url)?;
        if base_url.scheme() != "https" {
            return Err(ChannelError::InsecureScheme(base_url.scheme().to_owned()));
        }

        let digits = recipient.trim().trim_start_matches('+');
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ChannelError::InvalidRecipient(recipient.to_owned()));
        }

        Ok(Self {
            base_url,
            recipient: digits.to_owned(),
        })
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The link that opens a chat with `message` pre-filled.
    #[must_use]
    pub fn handoff_url(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.as_str().trim_end_matches('/'),
            self.recipient,
            urlencoding::encode(message)
        )
    }
}

/// An order ready to be opened in a new viewing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutHandoff {
    pub url: String,
    pub target: &'static str,
}

/// Build the human-readable order message for `cart`.
#[must_use]
pub fn order_message(cart: &Cart, currency: CurrencyCode) -> String {
    let mut message = format!("{ORDER_GREETING}\n\n");
    for item in cart.items() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            message,
            "- {} (Qty: {}) - {}",
            item.title, item.quantity, item.price
        );
    }
    let _ = write!(message, "\nTotal: {}\n\n", cart.subtotal(currency));
    message.push_str(PAYMENT_TERMS);
    message
}

impl Storefront {
    /// Hand the cart off to `channel`. An empty cart only produces a warning.
    pub fn checkout(&self, channel: &CheckoutChannel) -> Vec<Effect> {
        if self.cart().is_empty() {
            return vec![Effect::Notify(Notice::warning("Your cart is empty"))];
        }

        let message = order_message(self.cart(), self.currency());
        tracing::info!(
            lines = self.cart().len(),
            items = self.cart().item_count(),
            recipient = channel.recipient(),
            "checkout hand-off"
        );

        vec![Effect::OpenExternal(CheckoutHandoff {
            url: channel.handoff_url(&message),
            target: HANDOFF_TARGET,
        })]
    }
}
