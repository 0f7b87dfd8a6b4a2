mod layout_cmd;
mod remote;
mod wall_cmd;

use clap::{Args, Parser, Subcommand};

use canvas::error::{EditorError, ValidationError};
use canvas::wall::GateError;

use crate::layout_cmd::LayoutCommand;
use crate::remote::TransportError;
use crate::wall_cmd::WallCommand;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{code}: {0}", code = .0.error_code())]
    Layout(#[from] EditorError),
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Gate(#[from] GateError),
    #[error("no edit key configured; set WALL_EDIT_KEY")]
    MissingEditKey,
    #[error("no rack `{0}` in layout")]
    UnknownRack(String),
    #[error("no image `{0}` on the wall")]
    UnknownImage(String),
    #[error("invalid value for {field}: {value}")]
    InvalidArg { field: &'static str, value: String },
    #[error("{0} already exists; pass --force to overwrite")]
    FileExists(String),
}

#[derive(Parser, Debug)]
#[command(name = "wallboard-cli", about = "Store floor plan and image wall CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit store layout files.
    Layout(LayoutArgs),
    /// Inspect and edit the shared image wall.
    Wall(WallArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[command(subcommand)]
    command: LayoutCommand,
}

#[derive(Args, Debug)]
struct WallArgs {
    #[arg(long, env = "WALLBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Shared secret that unlocks editing.
    #[arg(long, env = "WALL_EDIT_KEY", hide_env_values = true)]
    edit_key: Option<String>,

    /// Password to try against the edit key; prompted for when absent.
    #[arg(long, env = "WALL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: WallCommand,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Layout(args) => layout_cmd::run(args.command),
        Command::Wall(args) => {
            let ctx = wall_cmd::WallContext {
                remote: remote::RemoteWall::new(&args.base_url),
                edit_key: args.edit_key,
                password: args.password,
            };
            wall_cmd::run(&ctx, args.command).await
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` is no.
fn confirm(prompt: &str) -> Result<bool, CliError> {
    eprint!("{prompt} [y/N] ");
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
