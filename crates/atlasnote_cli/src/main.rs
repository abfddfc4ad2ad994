mod args;
mod config;
mod error;
mod render;

use args::{Cli, Command};
use atlasnote_core::db::open_db;
use atlasnote_core::{
    KeyValueStore, LoadOutcome, NoteId, NoteStore, NoteStoreError, SqliteKeyValueStore,
    WriteReport,
};
use chrono::Local;
use clap::Parser;
use config::Config;
use error::CliError;
use log::info;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_cli(&cli);
    config.start_logging()?;

    let conn = open_db(&config.db_path)?;
    let backend = SqliteKeyValueStore::try_new(&conn)?;
    let mut store = NoteStore::open(backend);
    match store.load_outcome() {
        LoadOutcome::Recovered { reason } => {
            eprintln!("warning: stored notes were malformed and have been ignored ({reason})");
        }
        LoadOutcome::Unreadable { reason } => {
            eprintln!("warning: stored notes could not be read; starting empty ({reason})");
        }
        LoadOutcome::Loaded { .. } | LoadOutcome::Seeded { .. } => {}
    }

    let command = cli.command;
    info!(
        "event=cli_command module=cli status=start command={}",
        command.name()
    );
    execute(&mut store, command)
}

fn execute<S: KeyValueStore>(store: &mut NoteStore<S>, command: Command) -> Result<(), CliError> {
    match command {
        Command::Add(fields) => {
            let note = warn_if_volatile(store.add_note(fields.into())?);
            println!("Created note {}", note.id);
        }
        Command::Edit { id, fields } => {
            let id = NoteId::from(id);
            let current = store
                .get(&id)
                .ok_or_else(|| NoteStoreError::NotFound(id.clone()))?;
            let draft = fields.into_draft(current);
            let note = warn_if_volatile(store.edit_note(&id, draft)?);
            println!("Updated note {}", note.id);
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this note?")? {
                println!("Cancelled.");
                return Ok(());
            }
            if warn_if_volatile(store.delete_note(&NoteId::from(id.as_str()))) {
                println!("Deleted note {id}");
            } else {
                println!("No note with id {id}");
            }
        }
        Command::Clear { yes } => {
            if !yes
                && !confirm("Are you sure you want to delete all notes? This cannot be undone.")?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = warn_if_volatile(store.clear_all());
            println!("Removed {removed} notes");
        }
        Command::List { category, search } => {
            let notes = store.query(category, &search);
            if notes.is_empty() {
                println!("No notes found");
                return Ok(());
            }
            let marker = render::marker(std::io::stdout().is_terminal());
            let now = Local::now();
            for note in notes {
                println!("{}", render::note_block(note, &search, &now, marker));
            }
        }
        Command::Stats => print!("{}", render::stats_block(&store.compute_stats())),
        Command::Export { out } => {
            let Some(artifact) = store.export_snapshot(Local::now().date_naive())? else {
                println!("No notes to export");
                return Ok(());
            };
            let dir = out.unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&dir).map_err(|source| CliError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = dir.join(&artifact.file_name);
            std::fs::write(&path, &artifact.contents).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            println!("Exported {} notes to {}", artifact.note_count, path.display());
        }
    }
    Ok(())
}

/// Unwraps a write report, warning on stderr when the change was not saved.
fn warn_if_volatile<T>(report: WriteReport<T>) -> T {
    if let Some(err) = &report.persist_error {
        eprintln!("warning: change applied but not saved: {err}");
    }
    report.value
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().map_err(CliError::Prompt)?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(CliError::Prompt)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES" | "Yes"))
}
