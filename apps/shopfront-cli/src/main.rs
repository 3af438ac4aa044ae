use clap::Parser;
use shopfront_cli::args::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = shopfront_cli::run(cli).await {
        eprintln!("{}", e);
        if e.is_network() {
            eprintln!("Check that the shop backend is running and reachable.");
        }
        std::process::exit(1);
    }
}
