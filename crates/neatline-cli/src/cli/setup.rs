use clap::{Parser, Subcommand};
use neatline::model::{ExhibitId, ItemId, RecordId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "neatline",
    bin_name = "neatline",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Resolve and serialize map/timeline exhibit bundles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Style defaults file, checked before the user config directory
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render map and timeline payloads
    #[command(display_order = 1)]
    Render {
        /// Bundle directory
        bundle: PathBuf,

        /// Exhibit to render (all exhibits when omitted)
        exhibit: Option<ExhibitId>,
    },

    /// Show the edit form of a record
    #[command(display_order = 2)]
    Form {
        bundle: PathBuf,
        record: RecordId,
    },

    /// Show form defaults for a new record created from a catalog item
    #[command(name = "new-form", display_order = 3)]
    NewForm {
        bundle: PathBuf,
        exhibit: ExhibitId,
        item: ItemId,
    },

    /// Create an empty record
    #[command(display_order = 4)]
    Create {
        bundle: PathBuf,
        exhibit: ExhibitId,

        /// Link the record to a catalog item
        #[arg(long)]
        item: Option<ItemId>,
    },

    /// Apply an editor submission (a JSON object) to a record
    #[command(display_order = 5)]
    Update {
        bundle: PathBuf,
        record: RecordId,
        json: String,
    },

    /// Delete a record; its children lose their parent
    #[command(display_order = 6)]
    Delete {
        bundle: PathBuf,
        record: RecordId,
    },

    /// Show the effective system style defaults
    #[command(display_order = 7)]
    Defaults {
        /// Print a commented neatline.toml instead
        #[arg(long)]
        template: bool,
    },
}
