//! Action route handler.
//!
//! Every UI control posts to `/actions/{action}` with the product id and,
//! on product cards, the card's title, price and image. The action runs
//! under the shop lock; its effects decide what comes back.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use kitchenmart_core::ProductId;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::instrument;

use super::cart::CONFIRM_EMPTY_CART;
use super::fragments::{
    CartItemsOobTemplate, CountersOobTemplate, ToastsOobTemplate, WishlistItemsOobTemplate,
};
use super::is_htmx;
use crate::dispatch::{ActionContext, ActionInput};
use crate::error::{AppError, Result};
use crate::notify::Toast;
use crate::state::{AppState, Shop};
use crate::store::{Effect, Storefront};
use crate::views::{CartView, Counters, ToastView, WishlistView};

/// Client-side event names carried in `HX-Trigger`.
pub mod events {
    pub const LIKE_CHANGED: &str = "like-changed";
    pub const CONFIRM_EMPTY_CART: &str = "confirm-empty-cart";
    pub const OPEN_WINDOW: &str = "open-window";
    pub const CART_UPDATED: &str = "cart-updated";
    pub const WISHLIST_UPDATED: &str = "wishlist-updated";
}

const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// The page a control was on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Products,
    Cart,
    Wishlist,
}

impl View {
    /// Path of the page to return to after a plain form post.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "/",
            Self::Cart => "/cart",
            Self::Wishlist => "/wishlist",
        }
    }
}

/// Action form data. Blank fields count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub view: View,
}

impl ActionForm {
    /// Convert to dispatcher input.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the product id is malformed.
    pub fn to_input(&self) -> Result<ActionInput> {
        let id = non_blank(self.id.as_ref())
            .map(|raw| ProductId::parse(&raw))
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(ActionInput {
            id,
            title: non_blank(self.title.as_ref()),
            price: non_blank(self.price.as_ref()),
            image: non_blank(self.image.as_ref()),
            confirmed: self.confirmed,
        })
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Run a UI action.
#[instrument(skip(state, headers))]
pub async fn dispatch(
    State(state): State<AppState>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ActionForm>,
) -> Result<Response> {
    let input = form.to_input()?;
    let now = Utc::now();

    let mut shop = state.shop();
    let mut ctx = ActionContext {
        storefront: &mut shop.storefront,
        catalog: state.catalog(),
        channel: state.channel(),
    };
    let effects = state.dispatcher().dispatch(&action, &mut ctx, &input)?;
    let toasts = issue_notices(&mut shop, &effects, now);

    if is_htmx(&headers) {
        htmx_response(&shop.storefront, &effects, &toasts, form.view, now)
    } else {
        Ok(redirect_response(&effects, form.view))
    }
}

/// Queue every notice among `effects` as a toast.
fn issue_notices(shop: &mut Shop, effects: &[Effect], now: DateTime<Utc>) -> Vec<Toast> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notice) => Some(shop.notifier.issue(notice.clone(), now)),
            _ => None,
        })
        .collect()
}

/// Out-of-band swaps for every refreshed region on screen, new toasts, and
/// an `HX-Trigger` header for the rest.
fn htmx_response(
    storefront: &Storefront,
    effects: &[Effect],
    toasts: &[Toast],
    view: View,
    now: DateTime<Utc>,
) -> Result<Response> {
    let mut body = String::new();
    let refreshed = |wanted: &Effect| effects.contains(wanted);

    if refreshed(&Effect::RefreshCartCount) || refreshed(&Effect::RefreshWishlistCount) {
        let counters = Counters::project(storefront);
        body.push_str(&CountersOobTemplate { counters }.render()?);
    }
    if view == View::Cart && refreshed(&Effect::RefreshCartView) {
        let cart = CartView::project(storefront.cart(), storefront.currency());
        body.push_str(&CartItemsOobTemplate { cart }.render()?);
    }
    if view == View::Wishlist && refreshed(&Effect::RefreshWishlistView) {
        let wishlist = WishlistView::project(storefront.wishlist());
        body.push_str(&WishlistItemsOobTemplate { wishlist }.render()?);
    }
    if !toasts.is_empty() {
        let toasts = ToastView::project_all(toasts, now);
        body.push_str(&ToastsOobTemplate { toasts }.render()?);
    }

    let mut response = Html(body).into_response();
    let triggers = client_events(effects);
    if !triggers.is_empty() {
        let value = HeaderValue::from_str(&Value::Object(triggers).to_string())
            .map_err(|e| AppError::Internal(format!("invalid HX-Trigger header: {e}")))?;
        response.headers_mut().insert(HX_TRIGGER, value);
    }
    Ok(response)
}

/// Effects the page handles in script, keyed by event name.
fn client_events(effects: &[Effect]) -> Map<String, Value> {
    let mut triggers = Map::new();
    let mut likes = Vec::new();

    for effect in effects {
        match effect {
            Effect::MarkLiked(id) => likes.push(json!({ "id": id, "liked": true })),
            Effect::ResetLiked(id) => likes.push(json!({ "id": id, "liked": false })),
            Effect::ConfirmEmptyCart { prompt } => {
                triggers.insert(
                    events::CONFIRM_EMPTY_CART.to_owned(),
                    json!({ "prompt": prompt }),
                );
            }
            Effect::OpenExternal(handoff) => {
                triggers.insert(events::OPEN_WINDOW.to_owned(), json!(handoff));
            }
            Effect::RefreshCartCount => {
                triggers.insert(events::CART_UPDATED.to_owned(), Value::Null);
            }
            Effect::RefreshWishlistCount => {
                triggers.insert(events::WISHLIST_UPDATED.to_owned(), Value::Null);
            }
            Effect::Notify(_) | Effect::RefreshCartView | Effect::RefreshWishlistView => {}
        }
    }

    if !likes.is_empty() {
        triggers.insert(events::LIKE_CHANGED.to_owned(), Value::Array(likes));
    }
    triggers
}

/// `303 See Other` to wherever the shopper should land next.
fn redirect_response(effects: &[Effect], view: View) -> Response {
    for effect in effects {
        match effect {
            Effect::OpenExternal(handoff) => return Redirect::to(&handoff.url).into_response(),
            Effect::ConfirmEmptyCart { .. } => {
                return Redirect::to(&format!("/cart?confirm={CONFIRM_EMPTY_CART}")).into_response();
            }
            _ => {}
        }
    }
    Redirect::to(view.path()).into_response()
}
