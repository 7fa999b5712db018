use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodtunes::{cli, config, error, mood::MoodPolicy, server::AppState, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web application
    Serve(ServeOptions),

    /// Authorize with Spotify API and store the token
    Auth,

    /// Show the mood and audio-feature constraints for a text
    Mood(MoodOptions),

    /// Recommend tracks for a text
    Recommend(RecommendOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the application in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MoodOptions {
    /// How you feel, in your own words
    pub text: String,

    /// Mood policy: threshold or keyword (defaults to MOOD_POLICY)
    #[clap(long)]
    pub policy: Option<MoodPolicy>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// How you feel, in your own words
    pub text: String,

    /// Mood policy: threshold or keyword (defaults to MOOD_POLICY)
    #[clap(long)]
    pub policy: Option<MoodPolicy>,

    /// Number of tracks (defaults to RECOMMENDATION_LIMIT)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn require_config() {
    if let Err(missing) = config::validate() {
        error!(
            "Missing configuration: {}\nSet them in {} or the environment.",
            missing.join(", "),
            config::env_path().display()
        );
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            require_config();
            cli::serve(AppState::from_config(), opt.open).await
        }
        Command::Auth => {
            require_config();
            cli::auth(AppState::from_config()).await
        }
        Command::Mood(opt) => {
            cli::mood(&opt.text, opt.policy.unwrap_or_else(config::mood_policy))
        }
        Command::Recommend(opt) => {
            require_config();
            cli::recommend(
                &opt.text,
                opt.policy.unwrap_or_else(config::mood_policy),
                opt.limit.unwrap_or_else(config::recommendation_limit),
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
