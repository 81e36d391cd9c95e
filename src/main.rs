// src/main.rs
use clap::Parser;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::info;

use nhl_gdt::cli::Args;
use nhl_gdt::config::Config;
use nhl_gdt::data_fetcher::create_http_client;
use nhl_gdt::error::AppError;
use nhl_gdt::gdt::run_cycle;
use nhl_gdt::logging::setup_logging;
use nhl_gdt::reddit::RedditClient;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // First load attempt only feeds the log file path; a broken config
    // still gets logging set up before the real load reports the error
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let (log_file_path, _guard) = setup_logging(&args, config_log_path.as_ref()).await?;
    info!("Logs are being written to: {log_file_path}");

    let mut config = Config::load().await?;
    if let Some(team) = args.team.as_ref() {
        config.team_tri_code = team.clone();
    }

    let client = create_http_client(config.http_timeout_seconds).map_err(AppError::ApiFetch)?;
    let reddit = RedditClient::new(client.clone(), &config);

    info!(
        "Following {} for r/{} with a {}-minute lead time",
        config.team_tri_code, config.subreddit, config.lead_time_minutes
    );

    if args.once {
        run_cycle(&client, &config, &reddit, args.date.as_deref(), args.dry_run).await;
        return Ok(());
    }

    // Sequential poll loop: each cycle runs to completion before the next
    // tick fires, so there is never more than one cycle in flight
    let mut ticker = interval(Duration::from_secs(config.poll_interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        run_cycle(&client, &config, &reddit, args.date.as_deref(), args.dry_run).await;
    }
}
