//! # CLI Commands
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch & shared helpers)
//! ├── auth.rs     ◄─── login, register, logout, whoami
//! ├── products.rs ◄─── list/get open; create/update/delete admin only
//! ├── cart.rs     ◄─── signed-in only
//! ├── orders.rs   ◄─── signed-in only; status admin only
//! └── users.rs    ◄─── admin only
//! ```
//!
//! Guard checks run against the cached session before any request. They
//! save a round-trip; the backend still decides.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use serde_json::Value;
use shopfront_client::{Access, ShopClient};

use crate::args::Commands;
use crate::error::{CliError, CliResult};

/// Runs one command against the client.
pub async fn dispatch(client: &ShopClient, command: Commands) -> CliResult<()> {
    match command {
        Commands::Login {
            email,
            password,
            admin,
        } => auth::login(client, &email, &password, admin).await,
        Commands::Register {
            name,
            email,
            password,
        } => auth::register(client, &name, &email, &password).await,
        Commands::Logout => auth::logout(client),
        Commands::Whoami { verify } => auth::whoami(client, verify).await,
        Commands::Products(cmd) => products::run(client, cmd).await,
        Commands::Cart(cmd) => cart::run(client, cmd).await,
        Commands::Orders(cmd) => orders::run(client, cmd).await,
        Commands::Users(cmd) => users::run(client, cmd).await,
    }
}

/// Turns a refused guard into an error.
pub(crate) fn ensure(access: Access) -> CliResult<()> {
    match access {
        Access::Granted => Ok(()),
        Access::Redirect(nav) => Err(CliError::access_denied(nav)),
    }
}

/// Parses a JSON object given on the command line.
pub(crate) fn parse_json(raw: &str) -> CliResult<Value> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CliError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(CliError::InvalidJson("expected a JSON object".into()));
    }
    Ok(value)
}

pub(crate) fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::Navigation;

    #[test]
    fn test_parse_json_requires_object() {
        assert!(parse_json(r#"{"name":"Mug","price":9.5}"#).is_ok());
        assert!(matches!(parse_json("[1,2]"), Err(CliError::InvalidJson(_))));
        assert!(matches!(parse_json("{name"), Err(CliError::InvalidJson(_))));
    }

    #[test]
    fn test_ensure() {
        assert!(ensure(Access::Granted).is_ok());
        assert!(matches!(
            ensure(Access::Redirect(Navigation::AdminLogin)),
            Err(CliError::AccessDenied {
                redirect: Navigation::AdminLogin,
                ..
            })
        ));
    }
}
