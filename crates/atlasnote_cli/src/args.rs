use atlasnote_core::{Category, CategoryFilter, Note, NoteDraft};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "atlasnote")]
#[command(version, about = "Local notes with categories, pins and search")]
pub struct Cli {
    /// SQLite database file holding the note document
    #[arg(long, env = "ATLASNOTE_DB_PATH", global = true, value_name = "path")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "ATLASNOTE_LOG_DIR", global = true, value_name = "dir")]
    pub log_dir: Option<String>,

    /// trace, debug, info, warn or error
    #[arg(long, env = "ATLASNOTE_LOG_LEVEL", global = true, value_name = "level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note
    Add(NoteFields),

    /// Rewrite an existing note; omitted fields keep their current values
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete one note
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete every note
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List notes, pinned first then newest
    List {
        /// all, general, work or personal
        #[arg(long, short = 'c', default_value_t = CategoryFilter::All)]
        category: CategoryFilter,
        /// Case-insensitive text matched against title or content
        #[arg(long, short = 's', default_value = "")]
        search: String,
    },

    /// Show totals, pins and per-category counts
    Stats,

    /// Write the whole collection to a dated JSON file
    Export {
        /// Target directory (defaults to the current directory)
        #[arg(long, short = 'o', value_name = "dir")]
        out: Option<PathBuf>,
    },
}

impl Command {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Clear { .. } => "clear",
            Self::List { .. } => "list",
            Self::Stats => "stats",
            Self::Export { .. } => "export",
        }
    }
}

#[derive(Debug, Args)]
pub struct NoteFields {
    #[arg(long, short = 't')]
    pub title: String,

    #[arg(long, short = 'b')]
    pub content: String,

    /// general, work or personal
    #[arg(long, short = 'c', default_value_t = Category::General)]
    pub category: Category,

    #[arg(long, short = 'p')]
    pub pinned: bool,
}

impl From<NoteFields> for NoteDraft {
    fn from(fields: NoteFields) -> Self {
        NoteDraft::new(fields.title, fields.content, fields.category).pinned(fields.pinned)
    }
}

#[derive(Debug, Args)]
pub struct EditFields {
    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long, short = 'b')]
    pub content: Option<String>,

    /// general, work or personal
    #[arg(long, short = 'c')]
    pub category: Option<Category>,

    #[arg(long, short = 'p', conflicts_with = "unpinned")]
    pub pinned: bool,

    #[arg(long, short = 'u')]
    pub unpinned: bool,
}

impl EditFields {
    /// Full-replace draft with unspecified fields taken from `current`.
    pub fn into_draft(self, current: &Note) -> NoteDraft {
        let is_pinned = match (self.pinned, self.unpinned) {
            (true, _) => true,
            (_, true) => false,
            _ => current.is_pinned,
        };
        NoteDraft::new(
            self.title.unwrap_or_else(|| current.title.clone()),
            self.content.unwrap_or_else(|| current.content.clone()),
            self.category.unwrap_or(current.category),
        )
        .pinned(is_pinned)
    }
}
