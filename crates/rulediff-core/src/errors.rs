use std::fmt;
use thiserror::Error;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

/// Which collection of a source/target pair an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    /// Stable lowercase name, used in messages and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }

    /// The other side of the pair
    pub fn opposite(&self) -> Side {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A keyed collection rule found two items with the same key on one side
    DuplicateKey,
    /// A predicate collection rule found more than one counterpart for an item
    AmbiguousMatch,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::AmbiguousMatch => "ERR_AMBIGUOUS_MATCH",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional comparison context. The logging
/// macros convert every engine error into this shape before recording it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<Side>,
    first_position: Option<usize>,
    position: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            first_position: None,
            position: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the side the offending item came from
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the position of the earlier item the offending one collides with
    pub fn with_first_position(mut self, first_position: usize) -> Self {
        self.first_position = Some(first_position);
        self
    }

    /// Add the position of the offending item within its collection
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the side context, if any
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Get the position of the earlier colliding item, if any
    pub fn first_position(&self) -> Option<usize> {
        self.first_position
    }

    /// Get the item position, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(first_position) = self.first_position {
            write!(f, " (first position: {})", first_position)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while evaluating comparison rules
///
/// Every variant is fatal to the `compare` call that produced it; no partial
/// difference list is returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// Two items on one side of a keyed collection rule share a key
    ///
    /// Positions index the side's selected items; `first_position` is the
    /// earlier of the two.
    #[error(
        "Duplicate key in {side} collection: item at position {position} repeats the key of item at position {first_position}"
    )]
    DuplicateKey {
        side: Side,
        first_position: usize,
        position: usize,
    },

    /// An item matched more than one counterpart under a matching predicate
    #[error(
        "Ambiguous match: {side} item at position {position} matched {matches} items in the {} collection",
        .side.opposite()
    )]
    AmbiguousMatch {
        side: Side,
        position: usize,
        matches: usize,
    },
}

impl DiffError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DiffError::DuplicateKey { .. } => ExErrorKind::DuplicateKey,
            DiffError::AmbiguousMatch { .. } => ExErrorKind::AmbiguousMatch,
        }
    }
}

/// Conversion from DiffError to ExError
impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        let message = err.to_string();
        match err {
            DiffError::DuplicateKey {
                side,
                first_position,
                position,
            } => ExError::new(ExErrorKind::DuplicateKey)
                .with_op("keyed_collection_rule")
                .with_side(side)
                .with_first_position(first_position)
                .with_position(position)
                .with_message(message),

            DiffError::AmbiguousMatch { side, position, .. } => {
                ExError::new(ExErrorKind::AmbiguousMatch)
                    .with_op("predicate_collection_rule")
                    .with_side(side)
                    .with_position(position)
                    .with_message(message)
            }
        }
    }
}
