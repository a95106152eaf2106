//! Error types for brickdb operations.
//!
//! Every failure in the engine boundary is reported through [`Error`]. None of
//! them is expected during normal operation: they signal a programming error
//! or a drift between the schema compiled into the program and the database
//! on disk. Library code never aborts; the binary decides what an error means
//! for the process.

use std::fmt;

/// The primary error type for all brickdb operations.
#[derive(Debug)]
pub enum Error {
    /// Opening, closing or using a connection failed
    Connection(ConnectionError),
    /// Compiling or stepping a statement failed
    Query(QueryError),
    /// Binding parameter values failed
    Bind(BindError),
    /// Decoding a result row failed
    Decode(DecodeError),
    /// Converting a value to a Rust type failed
    Type(TypeError),
    /// Invalid table or column description
    Schema(SchemaError),
    /// I/O errors
    Io(std::io::Error),
    /// Serialization/deserialization errors
    Serde(String),
    /// Custom error with message
    Custom(String),
}

#[derive(Debug)]
pub struct ConnectionError {
    pub kind: ConnectionErrorKind,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// The engine could not open the database
    Open,
    /// A database was about to be created where a file already exists
    FileExists,
    /// The connection was used after `close()`
    Closed,
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    /// Component that issued the failing call, e.g. "Statement".
    pub component: &'static str,
    pub sql: String,
    /// Bound values at the time of failure, rendered for humans.
    pub bindings: Option<String>,
    /// The engine's latest error message.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Malformed SQL or unknown table/column at compile time
    Syntax,
    /// Constraint violation (NOT NULL, UNIQUE, ...)
    Constraint,
    /// Table or column not found
    NotFound,
    /// Database is busy or locked
    Busy,
    /// Permission denied or read-only database
    Permission,
    /// A statement expected to produce no rows produced one
    UnexpectedRow,
    /// Other engine error
    Database,
}

#[derive(Debug)]
pub struct BindError {
    pub kind: BindErrorKind,
    pub sql: String,
    /// Parameter or column name involved, if any.
    pub parameter: Option<String>,
    /// Values supplied by the failing call, rendered for humans.
    pub bindings: Option<String>,
    /// The engine's latest error message, when the engine refused the value.
    pub engine_message: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindErrorKind {
    /// The compiled query has no parameter with this name
    UnknownParameter,
    /// Supplied value count differs from the statement's parameter count
    ParameterCount,
    /// The same parameter was supplied more than once
    DuplicateParameter,
    /// An INSERT was missing the value for one of the table's columns
    MissingColumnValue,
    /// The engine refused the value
    Engine,
}

#[derive(Debug)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub sql: String,
    pub column: Option<String>,
    pub index: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// NULL found in a column declared NOT NULL
    UnexpectedNull,
    /// The engine reported a column the table description does not have
    UnknownColumn,
    /// The engine reported a different number of columns than described
    ColumnCountMismatch,
    /// A text column holds bytes that are not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

#[derive(Debug)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub table: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// Two columns share a name within one table
    DuplicateColumn,
    /// Column not found in a table description
    ColumnNotFound,
    /// Table has no columns
    Empty,
}

impl Error {
    /// Get the SQL that caused this error, if available.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => Some(&q.sql),
            Error::Bind(b) => Some(&b.sql),
            Error::Decode(d) => Some(&d.sql),
            _ => None,
        }
    }

    /// Is this a constraint violation reported by the engine?
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Error::Query(q) if q.kind == QueryErrorKind::Constraint)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection(e) => write!(f, "Connection error: {}", e),
            Error::Query(e) => write!(f, "Query error: {}", e),
            Error::Bind(e) => write!(f, "Bind error: {}", e),
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Type(e) => write!(f, "Type error: {}", e),
            Error::Schema(e) => write!(f, "Schema error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serde(msg) => write!(f, "Serialization error: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Connection] {}: {}", self.path, self.message)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Running query: {}", self.component, self.sql)?;
        if let Some(bindings) = &self.bindings {
            write!(f, " with bindings: {}", bindings)?;
        }
        write!(f, ". SQLite error: {}", self.message)
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Statement] {}", self.message)?;
        if let Some(parameter) = &self.parameter {
            write!(f, " (parameter '{}')", parameter)?;
        }
        write!(f, " for query: {}", self.sql)?;
        if let Some(bindings) = &self.bindings {
            write!(f, " with bindings: {}", bindings)?;
        }
        if let Some(message) = &self.engine_message {
            write!(f, ". SQLite error: {}", message)?;
        }
        Ok(())
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Statement] {}", self.message)?;
        match (&self.column, self.index) {
            (Some(column), Some(index)) => write!(f, " (column '{}' at index {})", column, index)?,
            (Some(column), None) => write!(f, " (column '{}')", column)?,
            (None, Some(index)) => write!(f, " (index {})", index)?,
            (None, None) => {}
        }
        write!(f, " for results of query: {}", self.sql)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = &self.column {
            write!(
                f,
                "expected {} for column '{}', found {}",
                self.expected, col, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table '{}': {}", self.table, self.message)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Error::Connection(err)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        Error::Bind(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

/// Result type alias for brickdb operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_display_carries_context() {
        let err = Error::Query(QueryError {
            kind: QueryErrorKind::Constraint,
            component: "Statement",
            sql: "INSERT INTO parts (name, image_url) VALUES (:name, :image_url);".to_string(),
            bindings: Some(":name = NULL, :image_url = NULL".to_string()),
            message: "NOT NULL constraint failed: parts.name".to_string(),
        });

        let text = err.to_string();
        assert!(text.contains("[Statement]"));
        assert!(text.contains("INSERT INTO parts"));
        assert!(text.contains(":name = NULL"));
        assert!(text.contains("NOT NULL constraint failed"));
        assert!(err.is_constraint_violation());
        assert_eq!(
            err.sql(),
            Some("INSERT INTO parts (name, image_url) VALUES (:name, :image_url);")
        );
    }

    #[test]
    fn decode_error_display_names_column() {
        let err = Error::Decode(DecodeError {
            kind: DecodeErrorKind::UnexpectedNull,
            sql: "SELECT * FROM colors;".to_string(),
            column: Some("rgb".to_string()),
            index: Some(1),
            message: "Found NULL while expecting non null value".to_string(),
        });

        let text = err.to_string();
        assert!(text.contains("column 'rgb' at index 1"));
        assert!(text.ends_with("SELECT * FROM colors;"));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn bind_error_display_carries_values_and_engine_text() {
        let err = Error::Bind(BindError {
            kind: BindErrorKind::Engine,
            sql: "INSERT INTO colors (name) VALUES (:name);".to_string(),
            parameter: Some(":name".to_string()),
            bindings: Some("{:name = \"Black\"}".to_string()),
            engine_message: Some("string or blob too big".to_string()),
            message: "Binding value \"Black\"".to_string(),
        });

        let text = err.to_string();
        assert!(text.contains("(parameter ':name')"), "{text}");
        assert!(text.contains("with bindings: {:name = \"Black\"}"), "{text}");
        assert!(text.ends_with(". SQLite error: string or blob too big"), "{text}");

        let bare = BindError {
            kind: BindErrorKind::ParameterCount,
            sql: "SELECT 1;".to_string(),
            parameter: None,
            bindings: None,
            engine_message: None,
            message: "Expected 0 values, got 1".to_string(),
        };
        assert_eq!(
            bare.to_string(),
            "[Statement] Expected 0 values, got 1 for query: SELECT 1;"
        );
    }

    #[test]
    fn io_error_is_source() {
        use std::error::Error as _;

        let err = Error::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert_eq!(err.sql(), None);
    }
}
