//! `layout` subcommands: edit a layout file through the floor engine.
//!
//! Each command loads the file into a [`FloorEngine`], drives it the way the
//! editor UI would, and writes the file back only when the engine asks for a
//! persist. A failed validation leaves the file as it was.

#[cfg(test)]
#[path = "layout_cmd_test.rs"]
mod layout_cmd_test;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use time::OffsetDateTime;
use tracing::info;

use canvas::consts::{DEFAULT_LENGTH_FT, DEFAULT_STORE_ID, DEFAULT_WIDTH_FT, LAYOUT_FILENAME};
use canvas::editor::RackForm;
use canvas::engine::{Action, FloorAction};
use canvas::floor::{FloorArea, NumberingType, Orientation, Rack};
use canvas::floor_engine::FloorEngine;
use canvas::layout::LayoutDocument;

use crate::{CliError, confirm, print_json};

#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    /// Write an empty layout.
    New {
        #[arg(default_value = LAYOUT_FILENAME)]
        file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_LENGTH_FT)]
        length_ft: f64,
        #[arg(long, default_value_t = DEFAULT_WIDTH_FT)]
        width_ft: f64,
        #[arg(long, default_value = DEFAULT_STORE_ID)]
        store_id: String,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Summarize a layout, or print it as JSON.
    Show {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Change the store dimensions.
    Area { file: PathBuf, length_ft: f64, width_ft: f64 },
    /// Add a rack with default attributes, then apply any given ones.
    AddRack {
        file: PathBuf,
        #[command(flatten)]
        attrs: RackArgs,
        #[arg(long)]
        x: Option<i32>,
        #[arg(long)]
        y: Option<i32>,
    },
    /// Change a rack's attributes.
    EditRack {
        file: PathBuf,
        rack_id: String,
        #[command(flatten)]
        attrs: RackArgs,
    },
    /// Place a rack at a cell.
    MoveRack { file: PathBuf, rack_id: String, x: i32, y: i32 },
    /// Delete a rack after confirmation.
    RmRack {
        file: PathBuf,
        rack_id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Attribute overrides; absent flags keep the rack's current value.
#[derive(Args, Debug, Default)]
pub struct RackArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub columns: Option<i64>,
    #[arg(long, value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,
    #[arg(long, value_parser = parse_numbering)]
    pub numbering: Option<NumberingType>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

impl RackArgs {
    fn apply_to(self, form: &mut RackForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(columns) = self.columns {
            form.total_columns = columns;
        }
        if let Some(orientation) = self.orientation {
            form.orientation = orientation;
        }
        if let Some(numbering) = self.numbering {
            form.numbering_type = numbering;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(color) = self.color {
            form.color = color;
        }
    }
}

fn parse_orientation(s: &str) -> Result<Orientation, String> {
    match s {
        "horizontal" => Ok(Orientation::Horizontal),
        "vertical" => Ok(Orientation::Vertical),
        _ => Err(format!("expected horizontal or vertical, got `{s}`")),
    }
}

fn parse_numbering(s: &str) -> Result<NumberingType, String> {
    match s {
        "odd" => Ok(NumberingType::Odd),
        "even" => Ok(NumberingType::Even),
        _ => Err(format!("expected odd or even, got `{s}`")),
    }
}

pub(crate) fn run(command: LayoutCommand) -> Result<(), CliError> {
    match command {
        LayoutCommand::New { file, length_ft, width_ft, store_id, force } => {
            if file.exists() && !force {
                return Err(CliError::FileExists(file.display().to_string()));
            }
            let area = FloorArea::new(length_ft, width_ft)?;
            let doc = LayoutDocument::build(&store_id, &area, std::iter::empty::<&Rack>(), OffsetDateTime::now_utc());
            fs::write(&file, doc.to_json_pretty()?)?;
            info!(path = %file.display(), %store_id, "layout created");
            Ok(())
        }
        LayoutCommand::Show { file, json } => {
            let engine = open(&file)?;
            if json {
                print_json(&engine.export_layout(OffsetDateTime::now_utc()))
            } else {
                print!("{}", summarize(&engine));
                Ok(())
            }
        }
        LayoutCommand::Area { file, length_ft, width_ft } => {
            let mut engine = open(&file)?;
            engine.apply_area(length_ft, width_ft)?;
            save(&file, &engine)
        }
        LayoutCommand::AddRack { file, attrs, x, y } => {
            let mut engine = open(&file)?;
            let id = engine.create_rack().into_iter().find_map(|a| match a {
                Action::EditRequested(id) => Some(id),
                _ => None,
            });
            let Some(id) = id else {
                return Err(CliError::UnknownRack(String::new()));
            };
            edit(&mut engine, &id, attrs)?;
            if x.is_some() || y.is_some() {
                let (cx, cy) = position(&engine, &id)?;
                engine.move_rack(&id, x.unwrap_or(cx), y.unwrap_or(cy));
            }
            save(&file, &engine)?;
            println!("{id}");
            Ok(())
        }
        LayoutCommand::EditRack { file, rack_id, attrs } => {
            let mut engine = open(&file)?;
            let actions = edit(&mut engine, &rack_id, attrs)?;
            persist_if_asked(&file, &engine, &actions)
        }
        LayoutCommand::MoveRack { file, rack_id, x, y } => {
            let mut engine = open(&file)?;
            let actions = engine.move_rack(&rack_id, x, y);
            if actions.is_empty() {
                return Err(CliError::UnknownRack(rack_id));
            }
            persist_if_asked(&file, &engine, &actions)
        }
        LayoutCommand::RmRack { file, rack_id, yes } => {
            let mut engine = open(&file)?;
            let form = engine.open_editor(&rack_id).ok_or_else(|| CliError::UnknownRack(rack_id.clone()))?;
            let request = form.request_delete();
            if !yes && !confirm(&format!("Delete rack {} ({})?", form.name, request.rack_id()))? {
                request.cancel();
                eprintln!("cancelled");
                return Ok(());
            }
            let actions = engine.delete_rack(&request.confirm());
            persist_if_asked(&file, &engine, &actions)
        }
    }
}

fn open(file: &Path) -> Result<FloorEngine, CliError> {
    let text = fs::read_to_string(file)?;
    let mut engine = FloorEngine::new();
    engine.import_layout(&text)?;
    Ok(engine)
}

fn save(file: &Path, engine: &FloorEngine) -> Result<(), CliError> {
    let text = engine.export_layout(OffsetDateTime::now_utc()).to_json_pretty()?;
    fs::write(file, text)?;
    info!(path = %file.display(), racks = engine.racks.len(), "layout saved");
    Ok(())
}

fn persist_if_asked(file: &Path, engine: &FloorEngine, actions: &[FloorAction]) -> Result<(), CliError> {
    if actions.iter().any(|a| matches!(a, Action::Persist(_))) {
        save(file, engine)?;
    }
    Ok(())
}

/// Open the attribute editor on `rack_id`, apply `attrs`, and commit.
fn edit(engine: &mut FloorEngine, rack_id: &str, attrs: RackArgs) -> Result<Vec<FloorAction>, CliError> {
    let mut form = engine.open_editor(rack_id).ok_or_else(|| CliError::UnknownRack(rack_id.to_owned()))?;
    attrs.apply_to(&mut form);
    let validated = form.validate()?;
    Ok(engine.commit_attributes(validated))
}

fn position(engine: &FloorEngine, rack_id: &str) -> Result<(i32, i32), CliError> {
    engine
        .racks
        .get(&rack_id.to_owned())
        .map(|r| (r.x, r.y))
        .ok_or_else(|| CliError::UnknownRack(rack_id.to_owned()))
}

fn summarize(engine: &FloorEngine) -> String {
    let area = engine.area();
    let grid = engine.grid_size();
    let mut out = format!(
        "store {}  area {}x{} ft  grid {}x{} cells  racks {}\n",
        engine.store_id(),
        area.length_ft(),
        area.width_ft(),
        grid.columns,
        grid.rows,
        engine.racks.len()
    );
    for rack in engine.racks.iter() {
        let (w, h) = rack.size();
        let meta = rack.meta();
        out.push_str(&format!(
            "{}  {}  at ({},{})  {}x{}  {}  {}\n",
            rack.id,
            rack.name,
            rack.x,
            rack.y,
            w,
            h,
            meta.orientation.map_or("-", Orientation::as_str),
            meta.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("-"),
        ));
    }
    out
}
