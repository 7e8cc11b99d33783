use std::fmt;

/// An error that can occur when processing GEDCOM data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Returns the 1-based source line where the error occurred (if available)
    pub fn line(&self) -> Option<usize> {
        self.0.line()
    }

    pub(crate) fn malformed_line(line: usize, content: &str) -> Error {
        Error::new(ErrorKind::MalformedLine {
            line,
            content: content.to_string(),
        })
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// A line could not be decomposed into level, tag, and value
    MalformedLine { line: usize, content: String },

    /// A line's level jumped more than one step past the current nesting depth
    LevelSkip { line: usize, level: u8, depth: usize },

    /// Two top-level records declare the same pointer-id
    DuplicatePointer { id: String },

    /// A record that needs an explicit pointer-id was inserted without one
    MissingPointer { tag: String },

    /// Input bytes are not valid UTF-8
    Utf8(std::str::Utf8Error),

    /// An underlying io error while writing output
    Io(std::io::Error),

    /// An error occurred while resolving data through an accessor
    Access(AccessError),
}

impl ErrorKind {
    pub fn line(&self) -> Option<usize> {
        match *self {
            ErrorKind::MalformedLine { line, .. } => Some(line),
            ErrorKind::LevelSkip { line, .. } => Some(line),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Utf8(ref err) => Some(err),
            ErrorKind::Io(ref err) => Some(err),
            ErrorKind::Access(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::MalformedLine { line, ref content } => write!(
                f,
                "malformed gedcom line (line: {}, content: {:?})",
                line, content
            ),
            ErrorKind::LevelSkip { line, level, depth } => write!(
                f,
                "level {} skips past nesting depth {} (line: {})",
                level, depth, line
            ),
            ErrorKind::DuplicatePointer { ref id } => {
                write!(f, "duplicate pointer declaration: {}", id)
            }
            ErrorKind::MissingPointer { ref tag } => {
                write!(f, "a {} record requires an explicit pointer-id", tag)
            }
            ErrorKind::Utf8(ref err) => write!(f, "invalid utf-8 input: {}", err),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
            ErrorKind::Access(ref err) => write!(f, "access error: {}", err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

impl From<AccessError> for Error {
    fn from(error: AccessError) -> Self {
        Error::new(ErrorKind::Access(error))
    }
}

/// An accessor failure, local to a single accessor call.
///
/// Parsing succeeds even when pointers dangle or optional structure is
/// missing; the failure surfaces only when an accessor actually needs the
/// absent data, and it never corrupts the underlying tree or aborts iteration
/// over other records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    pub(crate) kind: AccessErrorKind,
}

impl AccessError {
    /// Return the underlying error kind
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    pub(crate) fn not_found(tag: &str) -> AccessError {
        AccessError {
            kind: AccessErrorKind::NotFound {
                tag: tag.to_string(),
            },
        }
    }

    pub(crate) fn unresolved(id: &str) -> AccessError {
        AccessError {
            kind: AccessErrorKind::Unresolved { id: id.to_string() },
        }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> AccessError {
        AccessError {
            kind: AccessErrorKind::OutOfRange { index, len },
        }
    }
}

/// The type of an accessor failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// A required child record is absent
    NotFound { tag: String },

    /// A pointer does not resolve to the expected record
    Unresolved { id: String },

    /// A positional slot beyond what the data provides was requested
    OutOfRange { index: usize, len: usize },
}

impl std::error::Error for AccessError {}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            AccessErrorKind::NotFound { ref tag } => write!(f, "no {} record found", tag),
            AccessErrorKind::Unresolved { ref id } => {
                write!(f, "cannot resolve pointer {:?}", id)
            }
            AccessErrorKind::OutOfRange { index, len } => {
                write!(f, "slot {} requested but only {} resolved", index, len)
            }
        }
    }
}
