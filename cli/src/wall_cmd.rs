//! `wall` subcommands: read and edit the shared image wall over HTTP.
//!
//! Mutations go through an unlocked [`WallEngine`], exactly as the browser
//! editor does, and every persist it asks for is sent to the server as a full
//! replacement. A read failure or an entry that does not decode as an image
//! aborts a mutation, so a save never drops what the server holds.

#[cfg(test)]
#[path = "wall_cmd_test.rs"]
mod wall_cmd_test;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Subcommand, ValueEnum};
use serde_json::{Value, json};
use tracing::info;

use canvas::camera::Point;
use canvas::engine::{Action, WallAction};
use canvas::wall::{ImageId, Shape, WallImage, WallMode, scatter_position};
use canvas::wall_engine::{WallEngine, Zoom};

use crate::remote::RemoteWall;
use crate::{CliError, confirm, print_json};

pub struct WallContext {
    pub remote: RemoteWall,
    pub edit_key: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ZoomArg {
    In,
    Out,
}

impl From<ZoomArg> for Zoom {
    fn from(arg: ZoomArg) -> Self {
        match arg {
            ZoomArg::In => Zoom::In,
            ZoomArg::Out => Zoom::Out,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WallCommand {
    /// Print the wall as JSON, or write it to a file.
    Pull {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the wall with the images in a JSON file.
    Push { file: PathBuf },
    /// Upload an image file; it lands at a random spot unless placed.
    Add {
        path: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Rotate an image 45 degrees clockwise.
    Rotate { id: f64 },
    /// Resize an image by a factor, or one zoom step (in by default).
    Scale {
        id: f64,
        #[arg(long, conflicts_with = "zoom")]
        factor: Option<f64>,
        #[arg(long, value_enum)]
        zoom: Option<ZoomArg>,
    },
    /// Change an image's clip shape.
    Shape {
        id: f64,
        #[arg(value_parser = parse_shape)]
        shape: Shape,
    },
    /// Delete an image after confirmation.
    Rm {
        id: f64,
        #[arg(long)]
        yes: bool,
    },
}

fn parse_shape(s: &str) -> Result<Shape, String> {
    Shape::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = Shape::ALL.iter().map(|s| s.as_str()).collect();
        format!("expected one of {}, got `{s}`", names.join(", "))
    })
}

pub(crate) async fn run(ctx: &WallContext, command: WallCommand) -> Result<(), CliError> {
    match command {
        WallCommand::Pull { out } => {
            let doc = json!({ "images": ctx.remote.load().await });
            match out {
                Some(path) => {
                    tokio::fs::write(&path, serde_json::to_string_pretty(&doc)?).await?;
                    info!(path = %path.display(), "wall written");
                    Ok(())
                }
                None => print_json(&doc),
            }
        }
        WallCommand::Push { file } => {
            let images = parse_wall_file(&tokio::fs::read_to_string(&file).await?)?;
            let mut engine = unlocked(ctx)?;
            engine.load(images);
            ctx.remote.save(&engine.images.snapshot()).await?;
            Ok(())
        }
        WallCommand::Add { path, x, y } => {
            let bytes = tokio::fs::read(&path).await?;
            let mut engine = open(ctx).await?;
            let scatter = scatter_position(rand::random(), rand::random());
            let at = Point::new(x.unwrap_or(scatter.x), y.unwrap_or(scatter.y));
            let actions = engine.upload(data_uri(&path, &bytes), at, now_ms());
            commit(ctx, actions).await?;
            match engine.images.iter().last() {
                Some(image) => print_json(&image_summary(image)),
                None => Ok(()),
            }
        }
        WallCommand::Rotate { id } => mutate(ctx, id, |engine, id| engine.rotate(id)).await,
        WallCommand::Scale { id, factor, zoom } => match factor {
            Some(factor) if !factor.is_finite() || factor <= 0.0 => {
                Err(CliError::InvalidArg { field: "factor", value: factor.to_string() })
            }
            Some(factor) => mutate(ctx, id, |engine, id| engine.scale(id, factor)).await,
            None => {
                let zoom = zoom.map_or(Zoom::In, Zoom::from);
                mutate(ctx, id, |engine, id| engine.zoom(id, zoom)).await
            }
        },
        WallCommand::Shape { id, shape } => mutate(ctx, id, |engine, id| engine.set_shape(id, shape)).await,
        WallCommand::Rm { id, yes } => {
            if !yes && !confirm(&format!("Delete image {id}?"))? {
                eprintln!("cancelled");
                return Ok(());
            }
            mutate(ctx, id, |engine, id| engine.delete(id)).await
        }
    }
}

/// Editor opened in edit mode with the gate already passed.
fn unlocked(ctx: &WallContext) -> Result<WallEngine, CliError> {
    let key = ctx.edit_key.as_deref().ok_or(CliError::MissingEditKey)?;
    let attempt = match ctx.password.as_deref() {
        Some(password) => password.to_owned(),
        None => prompt_password()?,
    };
    let mut engine = WallEngine::new(WallMode::Edit);
    engine.unlock(&attempt, key)?;
    Ok(engine)
}

/// Unlocked editor hydrated from the server.
async fn open(ctx: &WallContext) -> Result<WallEngine, CliError> {
    let mut engine = unlocked(ctx)?;
    engine.load(ctx.remote.fetch().await?);
    Ok(engine)
}

async fn mutate(
    ctx: &WallContext,
    id: f64,
    apply: impl FnOnce(&mut WallEngine, ImageId) -> Vec<WallAction>,
) -> Result<(), CliError> {
    let id = ImageId(id);
    let mut engine = open(ctx).await?;
    if !engine.images.contains(&id) {
        return Err(CliError::UnknownImage(id.0.to_string()));
    }
    commit(ctx, apply(&mut engine, id)).await?;
    match engine.images.get(&id) {
        Some(image) => print_json(&image_summary(image)),
        None => Ok(()),
    }
}

async fn commit(ctx: &WallContext, actions: Vec<WallAction>) -> Result<(), CliError> {
    for action in actions {
        if let Action::Persist(snapshot) = action {
            ctx.remote.save(&snapshot).await?;
        }
    }
    Ok(())
}

/// The image without its (often very large) `src`.
fn image_summary(image: &WallImage) -> Value {
    json!({
        "id": image.id,
        "x": image.x,
        "y": image.y,
        "width": image.width,
        "height": image.height,
        "rotation": image.rotation,
        "shape": image.shape,
    })
}

/// Accepts either the endpoint's `{"images": [...]}` shape or a bare array.
fn parse_wall_file(text: &str) -> Result<Vec<WallImage>, CliError> {
    let list = match serde_json::from_str(text)? {
        Value::Object(mut map) => map.remove("images").unwrap_or(Value::Null),
        other => other,
    };
    Ok(serde_json::from_value(list)?)
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn data_uri(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes))
}

fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| (d.as_secs_f64() * 1000.0).floor())
}

fn prompt_password() -> Result<String, CliError> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
