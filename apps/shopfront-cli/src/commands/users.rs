//! User administration commands. Admin only.

use shopfront_client::ShopClient;

use super::{ensure, parse_json, print_json};
use crate::args::UsersCommand;
use crate::error::{CliResult, OrFail};

pub async fn run(client: &ShopClient, command: UsersCommand) -> CliResult<()> {
    ensure(client.guard().require_admin())?;
    let users = client.users();

    let data = match command {
        UsersCommand::List => users.get_all().await.or_fail("Loading users")?,
        UsersCommand::Get { id } => users.get_by_id(&id).await.or_fail("Loading user")?,
        UsersCommand::Update { id, json } => {
            let body = parse_json(&json)?;
            users.update(&id, &body).await.or_fail("Updating user")?
        }
        UsersCommand::Delete { id } => users.delete(&id).await.or_fail("Deleting user")?,
    };

    print_json(&data);
    Ok(())
}
