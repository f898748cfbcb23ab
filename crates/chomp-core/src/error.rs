use chrono::NaiveDate;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;
pub type ChompResult<T> = Result<T, ChompError>;

/// Failures raised by a Record Store backend.
///
/// `Duplicate` and `NoData` are expected conditions that callers branch on;
/// the remaining variants are genuine storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record for {0} already exists")]
    Duplicate(NaiveDate),
    #[error("no weight data between {start} and {end}")]
    NoData { start: NaiveDate, end: NaiveDate },
    #[error("storage failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt stored data: {0}")]
    Corrupt(String),
    #[error("stored data version {found} is newer than supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Bad form or command input. Surfaced inline, never aborts the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("form contains invalid characters, allowed characters: {allowed}")]
    InvalidCharacters { allowed: &'static str },
    #[error("form contains invalid number format, expected {expected} but got: {got}")]
    InvalidNumber { expected: &'static str, got: String },
    #[error("expected at least one value")]
    Empty,
    #[error("value must be a non-negative number, got: {0}")]
    Negative(String),
    #[error("can't fill calories, current sum {sum} is already over the target {target}")]
    OverTarget { sum: u64, target: u32 },
}

/// Failures of the import source collaborator. Any of these fails the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {message}")]
    Unreadable { path: String, message: String },
    #[error("empty file")]
    EmptyFile,
    #[error("invalid csv format, expected columns: Date Time Measurement Value")]
    InvalidLayout,
    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },
}

#[derive(Debug, Error)]
pub enum ChompError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Storage,
    Import,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Import => "import",
        }
    }
}

impl ChompError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Storage,
            Self::Import(_) => ErrorKind::Import,
        }
    }
}
