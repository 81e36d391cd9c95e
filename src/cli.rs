use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// NHL Game Day Thread Bot
///
/// Polls the NHL schedule for the followed team and posts a game day thread
/// to the configured subreddit once the next game is within the lead-time
/// window. Duplicate threads are suppressed by scanning the newest posts in
/// the subreddit.
///
/// Without flags the bot runs as a polling daemon; `--once` runs a single
/// decision cycle and exits.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Run a single decision cycle and exit. Useful from cron or for
    /// checking what the bot would do right now.
    #[arg(short, long)]
    pub once: bool,

    /// Go through the whole decision cycle but log the would-be post
    /// instead of submitting it to Reddit.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Anchor date for the schedule window in YYYY-MM-DD format.
    /// Defaults to today.
    #[arg(short, long, help_heading = "Overrides", value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Tri-code of the team to follow, overriding the configured one.
    #[arg(short, long, help_heading = "Overrides", value_name = "TRI_CODE")]
    pub team: Option<String>,

    /// Write logs to a custom file path instead of the default location.
    #[arg(long = "log-file", help_heading = "Configuration")]
    pub log_file: Option<String>,

    /// Enable debug logging to stdout.
    #[arg(long, help_heading = "Debug Options")]
    pub debug: bool,
}
