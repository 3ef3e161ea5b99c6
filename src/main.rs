use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedbell::app::AppContext;
use feedbell::cli::{commands, Cli, Commands};
use feedbell::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        None => {
            commands::run(&ctx, None, false).await?;
        }
        Some(Commands::Run {
            interval,
            no_initial_poll,
        }) => {
            commands::run(&ctx, interval.as_deref(), no_initial_poll).await?;
        }
        Some(Commands::Once) => {
            commands::once(&ctx).await?;
        }
        Some(Commands::Feeds) => {
            commands::list_feeds(&ctx)?;
        }
        Some(Commands::Image { url, base }) => {
            commands::show_image(&ctx, &url, base.as_deref()).await?;
        }
    }

    Ok(())
}
