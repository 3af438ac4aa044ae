use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(about = "Browse the shop, manage your cart and orders, administer the catalogue", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, bypassing page-origin resolution
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        email: String,
        password: String,

        /// Require an administrator account
        #[arg(long)]
        admin: bool,
    },

    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Check the session with the backend first
        #[arg(long)]
        verify: bool,
    },

    /// Product catalogue
    #[command(subcommand, alias = "p")]
    Products(ProductsCommand),

    /// Shopping cart (requires sign-in)
    #[command(subcommand)]
    Cart(CartCommand),

    /// Orders (requires sign-in)
    #[command(subcommand, alias = "o")]
    Orders(OrdersCommand),

    /// User administration (admin only)
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductFilters),

    /// Show one product
    Get { id: String },

    /// Create a product from a JSON object (admin only)
    Create { json: String },

    /// Update a product from a JSON object (admin only)
    Update { id: String, json: String },

    /// Delete a product (admin only)
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct ProductFilters {
    /// Filter as key=value; repeatable, sent in the given order
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        product_id: String,
        #[arg(default_value_t = 1)]
        quantity: i64,
    },

    /// Set the quantity of a product already in the cart
    Update { product_id: String, quantity: i64 },

    /// Remove a product
    #[command(alias = "rm")]
    Remove { product_id: String },

    /// Empty the cart
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List,

    /// Show one order
    Get { id: String },

    /// Place an order from a JSON object
    Create { json: String },

    /// Change an order's status (admin only)
    Status { id: String, status: String },

    /// Cancel an order
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List,

    /// Show one user
    Get { id: String },

    /// Update a user from a JSON object
    Update { id: String, json: String },

    /// Delete a user
    #[command(alias = "rm")]
    Delete { id: String },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shopfront").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_login_flags() {
        let cli = parse(&["login", "root@shop.io", "secret", "--admin", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Login {
                email,
                password,
                admin,
            } => {
                assert_eq!(email, "root@shop.io");
                assert_eq!(password, "secret");
                assert!(admin);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_product_filters_keep_order() {
        let cli = parse(&[
            "products", "list", "-f", "sort=price", "--filter", "category=tea=green",
        ]);
        match cli.command {
            Commands::Products(ProductsCommand::List(f)) => assert_eq!(
                f.filters,
                vec![
                    ("sort".to_string(), "price".to_string()),
                    ("category".to_string(), "tea=green".to_string()),
                ]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_filter_rejected() {
        assert!(Cli::try_parse_from(["shopfront", "products", "list", "-f", "nokey"]).is_err());
        assert!(Cli::try_parse_from(["shopfront", "products", "list", "-f", "=x"]).is_err());
    }

    #[test]
    fn test_cart_add_default_quantity() {
        match parse(&["cart", "add", "12"]).command {
            Commands::Cart(CartCommand::Add {
                product_id,
                quantity,
            }) => {
                assert_eq!(product_id, "12");
                assert_eq!(quantity, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["orders", "status", "41", "shipped", "--api-url", "http://x/api"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert!(matches!(
            cli.command,
            Commands::Orders(OrdersCommand::Status { .. })
        ));
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(
            parse(&["p", "ls"]).command,
            Commands::Products(ProductsCommand::List(_))
        ));
        assert!(matches!(
            parse(&["users", "rm", "3"]).command,
            Commands::Users(UsersCommand::Delete { .. })
        ));
    }
}
