//! Sign-in commands.

use shopfront_client::{AuthStatus, LoginOutcome, ShopClient};
use tracing::info;

use crate::error::{CliError, CliResult, OrFail};

pub async fn login(client: &ShopClient, email: &str, password: &str, admin: bool) -> CliResult<()> {
    let flows = client.flows();
    let outcome = if admin {
        flows.admin_login(email, password).await
    } else {
        flows.user_login(email, password).await
    }
    .or_fail("Login")?;

    match outcome {
        LoginOutcome::Redirect(next) => {
            let name = client
                .session()
                .get_user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            println!("Login successful! Welcome, {}.", name);
            info!(next = %next, "Signed in");
            Ok(())
        }
        LoginOutcome::AccessDenied(next) => {
            println!("Access denied. You are not an admin.");
            Err(CliError::access_denied(next))
        }
        LoginOutcome::NotAccepted(message) => {
            println!("{}", message.unwrap_or_else(|| "Login was not accepted.".into()));
            Ok(())
        }
    }
}

pub async fn register(client: &ShopClient, name: &str, email: &str, password: &str) -> CliResult<()> {
    match client
        .flows()
        .register(name, email, password)
        .await
        .or_fail("Registration")?
    {
        LoginOutcome::NotAccepted(message) => {
            println!("{}", message.unwrap_or_else(|| "Registration was not accepted.".into()));
        }
        _ => println!("Registration successful! Please login."),
    }
    Ok(())
}

pub fn logout(client: &ShopClient) -> CliResult<()> {
    client.flows().logout().or_fail("Logout")?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(client: &ShopClient, verify: bool) -> CliResult<()> {
    let user = if verify {
        match client.flows().check_auth_status().await.or_fail("Session check")? {
            AuthStatus::SignedIn(user) => Some(user),
            AuthStatus::Expired(_) => {
                println!("Session expired. Please login again.");
                return Ok(());
            }
            AuthStatus::SignedOut => None,
        }
    } else if client.guard().is_authenticated() {
        client.session().get_user()
    } else {
        None
    };

    match user {
        Some(user) => {
            let role = user.role.as_ref().map(|r| r.as_str()).unwrap_or("unknown");
            println!("{} ({})", user.display_name(), role);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
