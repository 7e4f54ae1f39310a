use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Host,
    Group,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Host => write!(f, "host"),
            RecordKind::Group => write!(f, "group"),
        }
    }
}

/// Recoverable problems found while building or managing inventories.
///
/// None of these stop processing; they are collected into [`Diagnostics`]
/// and handed back together with whatever was produced.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Invalid {0} definition: expected map input")]
    Structural(RecordKind),
    #[error("Invalid {0} definition: missing 'name'")]
    MissingName(RecordKind),
    #[error("Inventory {0} is missing a name")]
    Unnamed(RecordKind),
    #[error("Error: couldn't parse value to string!")]
    NotAString,
    #[error("Couldn't parse variable {0} to string")]
    VariableNotAString(String),
    #[error("Fail to create inventory file: {0}")]
    CreateFile(#[source] io::Error),
    #[error("Fail to write inventory: {0}")]
    WriteFile(#[source] io::Error),
    #[error("Fail to read dir {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Fail to remove file {}: {source}", .path.display())]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Structural,
    MissingField,
    TypeMismatch,
    Io,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Structural => write!(f, "structural"),
            Category::MissingField => write!(f, "missing field"),
            Category::TypeMismatch => write!(f, "type mismatch"),
            Category::Io => write!(f, "io"),
        }
    }
}

impl InventoryError {
    pub fn category(&self) -> Category {
        match self {
            InventoryError::Structural(_) => Category::Structural,
            InventoryError::MissingName(_) | InventoryError::Unnamed(_) => Category::MissingField,
            InventoryError::NotAString | InventoryError::VariableNotAString(_) => {
                Category::TypeMismatch
            }
            InventoryError::CreateFile(_)
            | InventoryError::WriteFile(_)
            | InventoryError::ReadDir { .. }
            | InventoryError::RemoveFile { .. } => Category::Io,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: InventoryError,
}

impl Diagnostic {
    pub fn error(error: InventoryError) -> Self {
        Diagnostic {
            severity: Severity::Error,
            error,
        }
    }

    pub fn summary(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.error)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn push_error(&mut self, error: InventoryError) {
        self.push(Diagnostic::error(error));
    }

    pub fn append(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn summaries(&self) -> Vec<String> {
        self.entries.iter().map(Diagnostic::summary).collect()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
