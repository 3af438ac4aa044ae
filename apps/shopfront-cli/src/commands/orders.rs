//! Order commands.

use shopfront_client::ShopClient;

use super::{ensure, parse_json, print_json};
use crate::args::OrdersCommand;
use crate::error::{CliResult, OrFail};

pub async fn run(client: &ShopClient, command: OrdersCommand) -> CliResult<()> {
    ensure(client.guard().require_auth())?;
    let orders = client.orders();

    let data = match command {
        OrdersCommand::List => orders.get_all().await.or_fail("Loading orders")?,
        OrdersCommand::Get { id } => orders.get_by_id(&id).await.or_fail("Loading order")?,
        OrdersCommand::Create { json } => {
            let body = parse_json(&json)?;
            orders.create(&body).await.or_fail("Placing order")?
        }
        OrdersCommand::Status { id, status } => {
            ensure(client.guard().require_admin())?;
            orders
                .update_status(&id, &status)
                .await
                .or_fail("Updating order status")?
        }
        OrdersCommand::Cancel { id } => orders.cancel(&id).await.or_fail("Cancelling order")?,
    };

    print_json(&data);
    Ok(())
}
