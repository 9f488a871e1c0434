use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporltui::{
    cli::{self, Transport},
    config, warning,
};

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
    /// Defaults to the terminal UI
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Remove the stored token
    Logout,

    /// Store client credentials in the config file
    Configure(ConfigureOptions),

    /// Open the terminal UI
    Tui,

    /// Show the currently playing track
    Status,

    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Toggle between play and pause
    Toggle,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    Previous,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Log in again even if a valid token exists
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigureOptions {
    /// Spotify application client ID
    #[clap(long)]
    pub client_id: Option<String>,

    /// Spotify application client secret
    #[clap(long)]
    pub client_secret: Option<String>,

    /// Redirect URI registered for the application
    #[clap(long)]
    pub redirect_uri: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Tui) {
        Command::Auth(opt) => cli::auth(opt.force).await,
        Command::Logout => cli::logout().await,
        Command::Configure(opt) => {
            cli::configure(opt.client_id, opt.client_secret, opt.redirect_uri).await
        }
        Command::Tui => cli::tui().await,
        Command::Status => cli::status().await,
        Command::Play => cli::transport(Transport::Play).await,
        Command::Pause => cli::transport(Transport::Pause).await,
        Command::Toggle => cli::transport(Transport::Toggle).await,
        Command::Next => cli::transport(Transport::Next).await,
        Command::Previous => cli::transport(Transport::Previous).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
