//! Product catalogue commands.

use shopfront_client::{ProductQuery, ShopClient};

use super::{ensure, parse_json, print_json};
use crate::args::ProductsCommand;
use crate::error::{CliResult, OrFail};

pub async fn run(client: &ShopClient, command: ProductsCommand) -> CliResult<()> {
    let products = client.products();

    let data = match command {
        ProductsCommand::List(f) => {
            let query: ProductQuery = f.filters.into_iter().collect();
            products.get_all(&query).await.or_fail("Loading products")?
        }
        ProductsCommand::Get { id } => products.get_by_id(&id).await.or_fail("Loading product")?,
        ProductsCommand::Create { json } => {
            ensure(client.guard().require_admin())?;
            let body = parse_json(&json)?;
            products.create(&body).await.or_fail("Creating product")?
        }
        ProductsCommand::Update { id, json } => {
            ensure(client.guard().require_admin())?;
            let body = parse_json(&json)?;
            products
                .update(&id, &body)
                .await
                .or_fail("Updating product")?
        }
        ProductsCommand::Delete { id } => {
            ensure(client.guard().require_admin())?;
            products.delete(&id).await.or_fail("Deleting product")?
        }
    };

    print_json(&data);
    Ok(())
}
