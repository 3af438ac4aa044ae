//! Cart commands. All need a signed-in session.

use shopfront_client::{ClientError, ShopClient};
use shopfront_core::validation::validate_quantity;
use shopfront_core::{CartItemRequest, EntityId};

use super::{ensure, print_json};
use crate::args::CartCommand;
use crate::error::{CliResult, OrFail};

pub async fn run(client: &ShopClient, command: CartCommand) -> CliResult<()> {
    ensure(client.guard().require_auth())?;
    let cart = client.cart();

    let data = match command {
        CartCommand::Show => cart.get().await.or_fail("Loading cart")?,
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            check_quantity(quantity).or_fail("Adding to cart")?;
            let product_id: EntityId = product_id.parse().unwrap_or_else(|e| match e {});
            cart.add(&CartItemRequest {
                product_id,
                quantity,
            })
            .await
            .or_fail("Adding to cart")?
        }
        CartCommand::Update {
            product_id,
            quantity,
        } => {
            check_quantity(quantity).or_fail("Updating cart")?;
            cart.update(&product_id, quantity)
                .await
                .or_fail("Updating cart")?
        }
        CartCommand::Remove { product_id } => cart
            .remove(&product_id)
            .await
            .or_fail("Removing from cart")?,
        CartCommand::Clear => cart.clear().await.or_fail("Clearing cart")?,
    };

    print_json(&data);
    Ok(())
}

fn check_quantity(quantity: i64) -> Result<(), ClientError> {
    validate_quantity(quantity).map_err(ClientError::from)
}
