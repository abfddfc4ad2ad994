use atlasnote_core::db::DbError;
use atlasnote_core::{LoggingError, NoteStoreError, RepoError, SnapshotError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Store(NoteStoreError),
    Snapshot(SnapshotError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Prompt(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging: {err}"),
            Self::Db(err) => write!(f, "database: {err}"),
            Self::Repo(err) => write!(f, "storage: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "export: {err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Prompt(err) => write!(f, "failed to read confirmation: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Prompt(err) => Some(err),
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoteStoreError> for CliError {
    fn from(value: NoteStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SnapshotError> for CliError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}
