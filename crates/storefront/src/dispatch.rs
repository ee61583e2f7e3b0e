//! Action dispatch.
//!
//! UI controls are identified by an action name (the class the storefront
//! markup puts on the control, e.g. `add-to-cart`). The [`Dispatcher`] maps
//! each name to a handler that reads the product id and card details from an
//! [`ActionInput`] and runs the matching [`Storefront`] operation.

use std::collections::HashMap;

use kitchenmart_core::{Price, PriceError, ProductId, ProductSnapshot};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::checkout::CheckoutChannel;
use crate::store::{Effect, Storefront};

/// Action names understood by the default dispatcher.
pub mod actions {
    pub const LIKE: &str = "like-btn";
    pub const ADD_TO_CART: &str = "add-to-cart";
    pub const REMOVE_FROM_CART: &str = "remove-from-cart";
    pub const REMOVE_FROM_WISHLIST: &str = "remove-from-wishlist";
    pub const QUANTITY_DECREASE: &str = "quantity-decrease";
    pub const QUANTITY_INCREASE: &str = "quantity-increase";
    pub const EMPTY_CART: &str = "empty-cart-btn";
    pub const CHECKOUT: &str = "checkout-btn";
}

/// Errors resolving an action before any state changes.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("action {0:?} needs a product id")]
    MissingProductId(&'static str),
    #[error("no details available for product {0}")]
    UnknownProduct(ProductId),
    #[error("invalid product price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// What a UI control carries: the product id from its `data-id` and, for
/// controls on a product card, the card's title, price and image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInput {
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    /// The shopper confirmed a destructive action.
    pub confirmed: bool,
}

impl ActionInput {
    /// Input carrying only a product id.
    #[must_use]
    pub fn for_product(id: ProductId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Everything a handler may touch.
pub struct ActionContext<'a> {
    pub storefront: &'a mut Storefront,
    pub catalog: &'a Catalog,
    pub channel: &'a CheckoutChannel,
}

/// An action handler.
pub type Handler = fn(&mut ActionContext<'_>, &ActionInput) -> Result<Vec<Effect>, DispatchError>;

/// Map from action name to handler.
#[derive(Clone)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(actions::LIKE, toggle_wishlist);
        dispatcher.register(actions::ADD_TO_CART, add_to_cart);
        dispatcher.register(actions::REMOVE_FROM_CART, remove_from_cart);
        dispatcher.register(actions::REMOVE_FROM_WISHLIST, remove_from_wishlist);
        dispatcher.register(actions::QUANTITY_DECREASE, decrease_quantity);
        dispatcher.register(actions::QUANTITY_INCREASE, increase_quantity);
        dispatcher.register(actions::EMPTY_CART, empty_cart);
        dispatcher.register(actions::CHECKOUT, checkout);
        dispatcher
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort_unstable();
        f.debug_struct("Dispatcher").field("actions", &names).finish()
    }
}

impl Dispatcher {
    /// A dispatcher with no actions registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` under `action`, replacing any previous handler.
    pub fn register(&mut self, action: &'static str, handler: Handler) {
        self.handlers.insert(action, handler);
    }

    #[must_use]
    pub fn handles(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Run the handler registered for `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is unknown or its input is incomplete.
    /// No state is changed when an error is returned.
    pub fn dispatch(
        &self,
        action: &str,
        ctx: &mut ActionContext<'_>,
        input: &ActionInput,
    ) -> Result<Vec<Effect>, DispatchError> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| DispatchError::UnknownAction(action.to_owned()))?;
        tracing::debug!(action, product_id = ?input.id, "dispatching action");
        handler(ctx, input)
    }
}

fn require_id(action: &'static str, input: &ActionInput) -> Result<ProductId, DispatchError> {
    input
        .id
        .clone()
        .ok_or(DispatchError::MissingProductId(action))
}

/// Product details for add/like: from the card fields when present,
/// otherwise from the catalog, the wishlist, then the cart.
fn resolve_snapshot(
    action: &'static str,
    ctx: &ActionContext<'_>,
    input: &ActionInput,
) -> Result<ProductSnapshot, DispatchError> {
    let id = require_id(action, input)?;

    if let (Some(title), Some(price)) = (&input.title, &input.price) {
        return Ok(ProductSnapshot {
            price: Price::parse_display(price, ctx.storefront.currency())?,
            title: title.trim().to_owned(),
            image: input.image.clone().unwrap_or_default(),
            id,
        });
    }

    ctx.catalog
        .get(&id)
        .cloned()
        .or_else(|| ctx.storefront.wishlist().get(&id).map(|item| item.snapshot()))
        .or_else(|| ctx.storefront.cart().get(&id).map(|item| item.snapshot()))
        .ok_or(DispatchError::UnknownProduct(id))
}

fn toggle_wishlist(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let snapshot = resolve_snapshot(actions::LIKE, ctx, input)?;
    Ok(ctx.storefront.toggle_wishlist(snapshot))
}

fn add_to_cart(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let snapshot = resolve_snapshot(actions::ADD_TO_CART, ctx, input)?;
    Ok(ctx.storefront.add_to_cart(snapshot))
}

fn remove_from_cart(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let id = require_id(actions::REMOVE_FROM_CART, input)?;
    Ok(ctx.storefront.remove_from_cart(&id))
}

fn remove_from_wishlist(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let id = require_id(actions::REMOVE_FROM_WISHLIST, input)?;
    Ok(ctx.storefront.remove_from_wishlist(&id))
}

fn decrease_quantity(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let id = require_id(actions::QUANTITY_DECREASE, input)?;
    Ok(ctx.storefront.decrease_quantity(&id))
}

fn increase_quantity(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    let id = require_id(actions::QUANTITY_INCREASE, input)?;
    Ok(ctx.storefront.increase_quantity(&id))
}

#[allow(clippy::unnecessary_wraps)]
fn empty_cart(
    ctx: &mut ActionContext<'_>,
    input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    Ok(ctx.storefront.empty_cart(input.confirmed))
}

#[allow(clippy::unnecessary_wraps)]
fn checkout(
    ctx: &mut ActionContext<'_>,
    _input: &ActionInput,
) -> Result<Vec<Effect>, DispatchError> {
    Ok(ctx.storefront.checkout(ctx.channel))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::Notice;
    use crate::store::tests::{empty_storefront, id, snapshot};

    fn channel() -> CheckoutChannel {
        CheckoutChannel::new("https://wa.me", "254714227080").unwrap()
    }

    fn card(product_id: &str, title: &str, price: &str) -> ActionInput {
        ActionInput {
            id: Some(id(product_id)),
            title: Some(title.to_string()),
            price: Some(price.to_string()),
            image: Some(format!("img/{product_id}.jpg")),
            confirmed: false,
        }
    }

    #[test]
    fn test_every_ui_action_is_registered() {
        let dispatcher = Dispatcher::default();
        for action in [
            actions::LIKE,
            actions::ADD_TO_CART,
            actions::REMOVE_FROM_CART,
            actions::REMOVE_FROM_WISHLIST,
            actions::QUANTITY_DECREASE,
            actions::QUANTITY_INCREASE,
            actions::EMPTY_CART,
            actions::CHECKOUT,
        ] {
            assert!(dispatcher.handles(action), "{action} not registered");
        }
    }

    #[test]
    fn test_add_from_card_fields() {
        let mut storefront = empty_storefront();
        let catalog = Catalog::default();
        let channel = channel();
        let mut ctx = ActionContext {
            storefront: &mut storefront,
            catalog: &catalog,
            channel: &channel,
        };

        let dispatcher = Dispatcher::default();
        dispatcher
            .dispatch(
                actions::ADD_TO_CART,
                &mut ctx,
                &card("knife-set", " Knife Set ", "KSh 1,200"),
            )
            .unwrap();

        let item = storefront.cart().get(&id("knife-set")).unwrap();
        assert_eq!(item.title, "Knife Set");
        assert_eq!(item.price.display(), "KSh 1,200");
        assert_eq!(item.image, "img/knife-set.jpg");
    }

    #[test]
    fn test_add_from_wishlist_without_card_fields() {
        let mut storefront = empty_storefront();
        storefront.toggle_wishlist(snapshot("mug", "Mug", "KSh 400"));
        let catalog = Catalog::default();
        let channel = channel();
        let mut ctx = ActionContext {
            storefront: &mut storefront,
            catalog: &catalog,
            channel: &channel,
        };

        Dispatcher::default()
            .dispatch(
                actions::ADD_TO_CART,
                &mut ctx,
                &ActionInput::for_product(id("mug")),
            )
            .unwrap();
        assert_eq!(storefront.cart().get(&id("mug")).unwrap().title, "Mug");
    }

    #[test]
    fn test_add_falls_back_to_catalog() {
        let mut storefront = empty_storefront();
        let catalog = Catalog::new(vec![snapshot("pan", "Pan", "KSh 2,000")]);
        let channel = channel();
        let mut ctx = ActionContext {
            storefront: &mut storefront,
            catalog: &catalog,
            channel: &channel,
        };

        Dispatcher::default()
            .dispatch(actions::LIKE, &mut ctx, &ActionInput::for_product(id("pan")))
            .unwrap();
        assert!(storefront.wishlist().contains(&id("pan")));
    }

    #[test]
    fn test_dispatch_errors_leave_state_alone() {
        let mut storefront = empty_storefront();
        let catalog = Catalog::default();
        let channel = channel();
        let mut ctx = ActionContext {
            storefront: &mut storefront,
            catalog: &catalog,
            channel: &channel,
        };
        let dispatcher = Dispatcher::default();

        assert!(matches!(
            dispatcher.dispatch("explode", &mut ctx, &ActionInput::default()),
            Err(DispatchError::UnknownAction(_))
        ));
        assert!(matches!(
            dispatcher.dispatch(actions::REMOVE_FROM_CART, &mut ctx, &ActionInput::default()),
            Err(DispatchError::MissingProductId(actions::REMOVE_FROM_CART))
        ));
        let ghost = ActionInput::for_product(id("ghost"));
        assert!(matches!(
            dispatcher.dispatch(actions::ADD_TO_CART, &mut ctx, &ghost),
            Err(DispatchError::UnknownProduct(_))
        ));
        assert!(matches!(
            dispatcher.dispatch(actions::ADD_TO_CART, &mut ctx, &card("pan", "Pan", "cheap")),
            Err(DispatchError::InvalidPrice(_))
        ));
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_empty_cart_and_checkout_need_no_id() {
        let mut storefront = empty_storefront();
        let catalog = Catalog::default();
        let channel = channel();
        let mut ctx = ActionContext {
            storefront: &mut storefront,
            catalog: &catalog,
            channel: &channel,
        };
        let dispatcher = Dispatcher::default();

        let effects = dispatcher
            .dispatch(actions::CHECKOUT, &mut ctx, &ActionInput::default())
            .unwrap();
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::warning("Your cart is empty"))]
        );

        let effects = dispatcher
            .dispatch(actions::EMPTY_CART, &mut ctx, &ActionInput::default())
            .unwrap();
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::info("Cart is already empty"))]
        );
    }

    #[test]
    fn test_custom_handler_registration() {
        fn noop(
            _ctx: &mut ActionContext<'_>,
            _input: &ActionInput,
        ) -> Result<Vec<Effect>, DispatchError> {
            Ok(Vec::new())
        }

        let mut dispatcher = Dispatcher::empty();
        assert!(!dispatcher.handles("noop"));
        dispatcher.register("noop", noop);
        assert!(dispatcher.handles("noop"));
    }
}
