//! Run storefront actions from the command line.

use kitchenmart_core::ProductId;
use kitchenmart_storefront::catalog::Catalog;
use kitchenmart_storefront::config::StorefrontConfig;
use kitchenmart_storefront::dispatch::{ActionContext, ActionInput, Dispatcher};
use kitchenmart_storefront::store::Effect;
use tracing::info;

use super::open_storefront;

/// Build dispatcher input from command-line flags.
///
/// # Errors
///
/// Returns an error if the product id is malformed.
pub fn input(
    id: Option<&str>,
    title: Option<String>,
    price: Option<String>,
    image: Option<String>,
    confirmed: bool,
) -> Result<ActionInput, Box<dyn std::error::Error>> {
    Ok(ActionInput {
        id: id.map(ProductId::parse).transpose()?,
        title,
        price,
        image,
        confirmed,
    })
}

/// Run `action` against the persisted state and print what it produced.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened or the action
/// is rejected.
pub fn run(
    config: &StorefrontConfig,
    action: &str,
    input: &ActionInput,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut storefront = open_storefront(config)?;
    let catalog = Catalog::load_or_empty(config.catalog_path.as_deref());

    let mut ctx = ActionContext {
        storefront: &mut storefront,
        catalog: &catalog,
        channel: &config.checkout,
    };
    let effects = Dispatcher::default().dispatch(action, &mut ctx, input)?;
    info!(action, effects = effects.len(), "action complete");

    for line in describe(&effects) {
        println!("{line}");
    }
    Ok(())
}

/// Terminal rendering of the effects a user would notice.
pub(super) fn describe(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(notice) => {
                Some(format!("[{}] {}", notice.severity.as_str(), notice.message))
            }
            Effect::ConfirmEmptyCart { prompt } => {
                Some(format!("{prompt} Re-run with --confirmed to proceed."))
            }
            Effect::OpenExternal(handoff) => Some(handoff.url.clone()),
            _ => None,
        })
        .collect()
}
