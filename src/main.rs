use anyhow::Result;
use clap::Parser;

use forum_sim::{cli::Cli, menu::Menu, service};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    // Logs go to stderr; stdout belongs to the menu.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.plain {
        colored::control::set_override(false);
    }

    let forum = service::spawn();
    Menu::new(forum).run().await
}
