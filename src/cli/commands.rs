use std::time::Duration;

use crate::app::{AppContext, FeedbellError, Result};
use crate::daemon::{Daemon, DaemonConfig};

/// Run the scheduler until SIGINT/SIGTERM.
pub async fn run(ctx: &AppContext, interval: Option<&str>, no_initial_poll: bool) -> Result<()> {
    let interval = match interval {
        Some(s) => Duration::from_secs(DaemonConfig::parse_interval(s).map_err(FeedbellError::Other)?),
        None => ctx.config.poll_interval(),
    };

    let config = DaemonConfig {
        interval,
        poll_on_start: !no_initial_poll,
    };

    let mut daemon = Daemon::new(ctx.poller()?, config);
    daemon.run().await?;
    Ok(())
}

/// One pass. On a fresh process every feed is new, so each announces its newest item.
pub async fn once(ctx: &AppContext) -> Result<()> {
    let mut poller = ctx.poller()?;
    let summary = poller.poll_once().await;

    println!(
        "Pass complete: {} feeds, {} announced, {} feed errors, {} delivery errors",
        summary.feeds, summary.announced, summary.failed_feeds, summary.failed_deliveries
    );
    Ok(())
}

pub fn list_feeds(ctx: &AppContext) -> Result<()> {
    let feeds = &ctx.config.feeds;

    if feeds.is_empty() {
        println!("No feeds configured");
        return Ok(());
    }

    for feed in feeds {
        println!(
            "{} [{}] -> channel {} ({})\n  {}",
            feed.name, feed.tag, feed.channel_id, feed.color, feed.url
        );
    }

    Ok(())
}

pub async fn show_image(ctx: &AppContext, url: &str, base: Option<&str>) -> Result<()> {
    let resolver = ctx.image_resolver()?;

    match resolver.resolve(Some(url), base).await {
        Some(image) => println!("{}", image),
        None => println!("No image found"),
    }

    Ok(())
}
