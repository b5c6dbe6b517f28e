use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medialib::MediaKind;

/// CLI for browsing and favoriting local media
#[derive(Parser)]
#[command(name = "medialib")]
#[command(about = "Keep a local list of favorite media items", long_about = None)]
pub struct Cli {
    /// Database URL (defaults to a SQLite file in the user data directory)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select a media item as the current one
    Pick {
        /// Media locator, e.g. content://media/external/images/media/12
        uri: String,
        /// Media kind; inferred from the URI when omitted
        #[arg(short, long)]
        kind: Option<MediaKind>,
    },
    /// Add the currently selected media to favorites
    Add,
    /// Show the favorites list
    List,
    /// Remove a favorite by id (asks for confirmation)
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Restore the last removed favorite, if the undo window is still open
    Undo,
    /// Export the favorites list as JSON
    Export {
        /// Write here instead of the default export file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Import favorites from a JSON file
    Import {
        /// File holding a JSON array of {id, uri, type} objects
        file: PathBuf,
    },
    /// Show collection counts
    Stats,
}
