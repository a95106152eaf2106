//! Compiled statements.
//!
//! A [`Statement`] owns one native statement handle and borrows the
//! [`SqliteConnection`] it was compiled on. It moves through
//! [`StatementState`] as values are bound and rows are stepped; binding
//! again resets it so a single compiled statement can be reused for many
//! inserts.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::connection::SqliteConnection;
use crate::ffi;
use crate::types;
use brickdb_core::error::{
    BindError, BindErrorKind, DecodeError, DecodeErrorKind, QueryError, QueryErrorKind,
};
use brickdb_core::{Column, ColumnInfo, ColumnType, Error, Result, Row, Table, Value};
use brickdb_query::{CreateTableQuery, InsertQuery, SelectAllQuery};
use std::collections::{HashMap, HashSet};
use std::ffi::{CString, c_int};
use std::ptr::{self, NonNull};
use std::sync::Arc;

/// Where a statement is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementState {
    /// Compiled, nothing bound yet
    Compiled,
    /// Values bound, not yet stepped
    Bound,
    /// At least one row has been returned
    Stepping,
    /// The engine reported that there are no more rows
    Exhausted,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Row,
    Done,
}

/// A compiled SQL statement.
pub struct Statement<'conn> {
    conn: &'conn SqliteConnection,
    stmt: NonNull<ffi::sqlite3_stmt>,
    sql: String,
    state: StatementState,
    /// Values bound by the latest `bind`, by parameter name.
    bindings: Vec<(String, Value)>,
}

impl<'conn> Statement<'conn> {
    pub(crate) fn compile(conn: &'conn SqliteConnection, sql: &str) -> Result<Self> {
        let db = conn.handle()?;
        let c_sql = CString::new(sql).map_err(|_| {
            Error::Query(QueryError {
                kind: QueryErrorKind::Syntax,
                component: "Statement",
                sql: sql.to_string(),
                bindings: None,
                message: "SQL contains null byte".to_string(),
            })
        })?;

        let mut stmt: *mut ffi::sqlite3_stmt = ptr::null_mut();
        // SAFETY: db is valid; we pass valid pointers and check the result
        let rc = unsafe { ffi::sqlite3_prepare_v2(db, c_sql.as_ptr(), -1, &mut stmt, ptr::null_mut()) };

        if rc != ffi::SQLITE_OK {
            if !stmt.is_null() {
                // SAFETY: stmt was returned by prepare and is not used again
                unsafe { ffi::sqlite3_finalize(stmt) };
            }
            return Err(conn.query_error("Statement", sql, None));
        }

        // Whitespace or comment-only SQL compiles to no statement at all.
        let Some(stmt) = NonNull::new(stmt) else {
            return Err(Error::Query(QueryError {
                kind: QueryErrorKind::Syntax,
                component: "Statement",
                sql: sql.to_string(),
                bindings: None,
                message: "SQL contains no statement".to_string(),
            }));
        };

        tracing::debug!(sql, "Compiled statement");

        Ok(Self {
            conn,
            stmt,
            sql: sql.to_string(),
            state: StatementState::Compiled,
            bindings: Vec::new(),
        })
    }

    /// The SQL this statement was compiled from.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn state(&self) -> StatementState {
        self.state
    }

    pub fn connection(&self) -> &'conn SqliteConnection {
        self.conn
    }

    /// Number of parameters in the compiled SQL.
    pub fn parameter_count(&self) -> usize {
        // SAFETY: stmt is valid for the lifetime of self
        let count = unsafe { ffi::sqlite3_bind_parameter_count(self.stmt.as_ptr()) };
        usize::try_from(count).unwrap_or(0)
    }

    /// Names of the parameters in the compiled SQL, in index order.
    pub fn parameter_names(&self) -> Vec<String> {
        (1..=self.parameter_count())
            .filter_map(|i| {
                // SAFETY: stmt is valid and i is within 1..=parameter_count
                unsafe { types::parameter_name(self.stmt.as_ptr(), i as c_int) }
            })
            .collect()
    }

    /// Values bound by the latest `bind`.
    pub fn bound_values(&self) -> &[(String, Value)] {
        &self.bindings
    }

    /// Rewind the statement so it can be stepped again. Bound values are kept.
    pub fn reset(&mut self) {
        // The return code repeats the error of the last failed step, which
        // has already been reported.
        // SAFETY: stmt is valid
        unsafe { ffi::sqlite3_reset(self.stmt.as_ptr()) };
        self.state = if self.bindings.is_empty() {
            StatementState::Compiled
        } else {
            StatementState::Bound
        };
    }

    /// Bind values to named parameters, replacing any earlier bindings.
    ///
    /// Names include their prefix, e.g. `:rgb`, and may each appear only
    /// once. With strict bindings on the connection, the number of values
    /// must equal the parameter count.
    pub fn bind<I, P>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (P, Value)>,
        P: AsRef<str>,
    {
        let values: Vec<(String, Value)> = values
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_string(), value))
            .collect();

        // SAFETY: stmt is valid
        unsafe {
            ffi::sqlite3_reset(self.stmt.as_ptr());
            ffi::sqlite3_clear_bindings(self.stmt.as_ptr());
        }
        self.bindings.clear();
        self.state = StatementState::Compiled;

        let expected = self.parameter_count();
        if self.conn.strict_bindings() && values.len() != expected {
            return Err(self.bind_error(
                BindErrorKind::ParameterCount,
                None,
                format!("Expected {} values, got {}", expected, values.len()),
                &values,
            ));
        }

        let mut seen = HashSet::with_capacity(values.len());
        for (name, _) in &values {
            if !seen.insert(name.as_str()) {
                return Err(self.bind_error(
                    BindErrorKind::DuplicateParameter,
                    Some(name.clone()),
                    "Parameter supplied more than once".to_string(),
                    &values,
                ));
            }
        }

        for (name, value) in &values {
            let index = self.parameter_index(name, &values)?;
            tracing::trace!(parameter = %name, value = %value, "Binding");

            // SAFETY: stmt is valid and index was resolved by the engine
            let rc = unsafe { types::bind_value(self.stmt.as_ptr(), index, value) };
            if rc != ffi::SQLITE_OK {
                return Err(self.bind_error(
                    BindErrorKind::Engine,
                    Some(name.clone()),
                    format!("Binding value {}: {}", value, ffi::error_string(rc)),
                    &values,
                ));
            }
        }

        self.bindings = values;
        self.state = StatementState::Bound;
        Ok(())
    }

    /// Run a statement that produces no rows, to completion.
    ///
    /// A returned row is reported as [`QueryErrorKind::UnexpectedRow`].
    pub fn run(&mut self) -> Result<()> {
        if self.state == StatementState::Exhausted {
            self.reset();
        }
        match self.step()? {
            Step::Done => Ok(()),
            Step::Row => {
                let err = Error::Query(QueryError {
                    kind: QueryErrorKind::UnexpectedRow,
                    component: "Statement",
                    sql: self.sql.clone(),
                    bindings: self.render_bindings(),
                    message: "Statement returned a row where none was expected".to_string(),
                });
                self.reset();
                Err(err)
            }
        }
    }

    /// Bind values and run to completion.
    pub fn run_with<I, P>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (P, Value)>,
        P: AsRef<str>,
    {
        self.bind(values)?;
        self.run()
    }

    /// Step through every result row, decoding each one against `table`.
    ///
    /// Result columns are matched to the table's columns by name, so their
    /// order may differ. A column count mismatch, an unknown column name or a
    /// NULL in a NOT NULL column is an error.
    pub fn read_all_rows(&mut self, table: &Table) -> Result<Vec<Row>> {
        if matches!(
            self.state,
            StatementState::Stepping | StatementState::Exhausted
        ) {
            self.reset();
        }

        let mapping = self.column_mapping(table)?;
        let info = Arc::new(ColumnInfo::for_table(table));
        let mut rows = Vec::new();

        while self.step()? == Step::Row {
            let mut values = vec![Value::Null; table.columns().len()];
            for (index, &target) in mapping.iter().enumerate() {
                let column = &table.columns()[target];
                values[target] = self.read_column(index, column)?;
            }
            rows.push(Row::with_columns(Arc::clone(&info), values));
        }

        tracing::trace!(sql = %self.sql, rows = rows.len(), "Read rows");
        Ok(rows)
    }

    fn step(&mut self) -> Result<Step> {
        // SAFETY: stmt is valid
        let rc = unsafe { ffi::sqlite3_step(self.stmt.as_ptr()) };
        match rc {
            ffi::SQLITE_ROW => {
                self.state = StatementState::Stepping;
                Ok(Step::Row)
            }
            ffi::SQLITE_DONE => {
                self.state = StatementState::Exhausted;
                Ok(Step::Done)
            }
            _ => {
                tracing::trace!(sql = %self.sql, code = rc, "Step failed");
                Err(self
                    .conn
                    .query_error("Statement", &self.sql, self.render_bindings()))
            }
        }
    }

    /// For each result column, the index of the table column it fills.
    fn column_mapping(&self, table: &Table) -> Result<Vec<usize>> {
        // SAFETY: stmt is valid; column metadata is available once compiled
        let count = unsafe { ffi::sqlite3_column_count(self.stmt.as_ptr()) };
        let count = usize::try_from(count).unwrap_or(0);

        if count != table.columns().len() {
            return Err(self.decode_error(
                DecodeErrorKind::ColumnCountMismatch,
                None,
                None,
                format!(
                    "Expected {} columns for table {}, got {}",
                    table.columns().len(),
                    table.name(),
                    count
                ),
            ));
        }

        let mut mapping = Vec::with_capacity(count);
        let mut seen = vec![false; count];
        for index in 0..count {
            // SAFETY: stmt is valid and index < column count
            let name = unsafe { types::column_name(self.stmt.as_ptr(), index as c_int) }
                .unwrap_or_default();
            let target = match table.index_of(&name) {
                Some(target) if !seen[target] => target,
                _ => {
                    return Err(self.decode_error(
                        DecodeErrorKind::UnknownColumn,
                        Some(name),
                        Some(index),
                        format!("Unexpected column in table {}", table.name()),
                    ));
                }
            };
            seen[target] = true;
            mapping.push(target);
        }
        Ok(mapping)
    }

    fn read_column(&self, index: usize, column: &Column) -> Result<Value> {
        let value = match column.column_type() {
            ColumnType::Bool => self.read_bool(index).map(Value::Bool),
            ColumnType::Char(_) => self.read_text(index, column)?.map(Value::Text),
        };
        match value {
            Some(value) => Ok(value),
            None if column.is_nullable() => Ok(Value::Null),
            None => Err(self.decode_error(
                DecodeErrorKind::UnexpectedNull,
                Some(column.name().to_string()),
                Some(index),
                "NULL in NOT NULL column".to_string(),
            )),
        }
    }

    fn read_bool(&self, index: usize) -> Option<bool> {
        // SAFETY: stmt is valid, positioned on a row, and index < column count
        unsafe { types::read_bool(self.stmt.as_ptr(), index as c_int) }
    }

    fn read_text(&self, index: usize, column: &Column) -> Result<Option<String>> {
        // SAFETY: stmt is valid, positioned on a row, and index < column count
        unsafe { types::read_text(self.stmt.as_ptr(), index as c_int) }.map_err(|e| {
            self.decode_error(
                DecodeErrorKind::InvalidUtf8,
                Some(column.name().to_string()),
                Some(index),
                format!("Text is not valid UTF-8: {}", e),
            )
        })
    }

    fn parameter_index(&self, name: &str, values: &[(String, Value)]) -> Result<c_int> {
        let unknown = || {
            self.bind_error(
                BindErrorKind::UnknownParameter,
                Some(name.to_string()),
                "Unknown parameter".to_string(),
                values,
            )
        };
        let c_name = CString::new(name).map_err(|_| unknown())?;
        // SAFETY: stmt is valid and c_name is NUL-terminated
        let index = unsafe { ffi::sqlite3_bind_parameter_index(self.stmt.as_ptr(), c_name.as_ptr()) };
        if index == 0 { Err(unknown()) } else { Ok(index) }
    }

    fn render_bindings(&self) -> Option<String> {
        render_values(&self.bindings)
    }

    fn bind_error(
        &self,
        kind: BindErrorKind,
        parameter: Option<String>,
        message: String,
        values: &[(String, Value)],
    ) -> Error {
        let engine_message = if kind == BindErrorKind::Engine {
            self.conn.error_message()
        } else {
            None
        };
        Error::Bind(BindError {
            kind,
            sql: self.sql.clone(),
            parameter,
            bindings: render_values(values),
            engine_message,
            message,
        })
    }

    fn decode_error(
        &self,
        kind: DecodeErrorKind,
        column: Option<String>,
        index: Option<usize>,
        message: String,
    ) -> Error {
        Error::Decode(DecodeError {
            kind,
            sql: self.sql.clone(),
            column,
            index,
            message,
        })
    }
}

/// Render named values as `{:a = "x", :b = NULL}`, or `None` when empty.
fn render_values<N: AsRef<str>>(values: &[(N, Value)]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let rendered: Vec<String> = values
        .iter()
        .map(|(name, value)| format!("{} = {}", name.as_ref(), value))
        .collect();
    Some(format!("{{{}}}", rendered.join(", ")))
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        // SAFETY: stmt is valid and finalized exactly once, here
        unsafe {
            ffi::sqlite3_finalize(self.stmt.as_ptr());
        }
    }
}

impl std::fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql)
            .field("state", &self.state)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// A compiled `CREATE TABLE` statement.
#[derive(Debug)]
pub struct CreateTableStatement<'conn> {
    statement: Statement<'conn>,
}

impl<'conn> CreateTableStatement<'conn> {
    pub fn new(conn: &'conn SqliteConnection, table: &Table) -> Result<Self> {
        let sql = CreateTableQuery::new(table).build();
        Ok(Self {
            statement: conn.compile(&sql)?,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.statement.run()?;
        tracing::debug!(sql = %self.statement.sql(), "Created table");
        Ok(())
    }
}

/// A compiled INSERT statement, reusable for any number of rows.
#[derive(Debug)]
pub struct InsertStatement<'conn> {
    statement: Statement<'conn>,
    query: InsertQuery,
}

impl<'conn> InsertStatement<'conn> {
    pub fn new(conn: &'conn SqliteConnection, table: &Table) -> Result<Self> {
        let query = InsertQuery::new(table);
        let statement = conn.compile(&query.build())?;
        Ok(Self { statement, query })
    }

    pub fn query(&self) -> &InsertQuery {
        &self.query
    }

    pub fn table(&self) -> &Table {
        self.query.table()
    }

    pub fn statement(&self) -> &Statement<'conn> {
        &self.statement
    }

    /// Insert one row. Every column of the table needs a value; use
    /// [`Value::Null`] for an absent value in a nullable column.
    pub fn insert<'c, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'c Column, Value)>,
    {
        let supplied: Vec<(&str, Value)> = values
            .into_iter()
            .map(|(column, value)| (column.name(), value))
            .collect();
        let rendered = render_values(&supplied);
        let column_error = |kind, column: &str, message: String| {
            Error::Bind(BindError {
                kind,
                sql: self.statement.sql().to_string(),
                parameter: Some(column.to_string()),
                bindings: rendered.clone(),
                engine_message: None,
                message,
            })
        };

        let mut by_name: HashMap<&str, Value> = HashMap::with_capacity(supplied.len());
        for (name, value) in supplied.iter().cloned() {
            if by_name.insert(name, value).is_some() {
                return Err(column_error(
                    BindErrorKind::DuplicateParameter,
                    name,
                    "Column supplied more than once".to_string(),
                ));
            }
        }

        let mut bindings = Vec::with_capacity(self.table().columns().len());
        for (column, parameter) in self.query.parameters() {
            let Some(value) = by_name.remove(column.name()) else {
                return Err(column_error(
                    BindErrorKind::MissingColumnValue,
                    column.name(),
                    format!("No value for column of table {}", self.table().name()),
                ));
            };
            bindings.push((parameter.name().to_string(), value));
        }

        if let Some(extra) = by_name.keys().next() {
            return Err(column_error(
                BindErrorKind::UnknownParameter,
                extra,
                format!("Table {} has no such column", self.table().name()),
            ));
        }

        self.statement.run_with(bindings)
    }
}

/// A compiled `SELECT *` statement for one table.
#[derive(Debug)]
pub struct SelectStatement<'conn> {
    statement: Statement<'conn>,
    table: Table,
}

impl<'conn> SelectStatement<'conn> {
    pub fn new(conn: &'conn SqliteConnection, table: &Table) -> Result<Self> {
        let sql = SelectAllQuery::new(table).build();
        Ok(Self {
            statement: conn.compile(&sql)?,
            table: table.clone(),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Read every row of the table. Calling this again re-runs the query.
    pub fn read_all_rows(&mut self) -> Result<Vec<Row>> {
        self.statement.read_all_rows(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::SqliteConfig;

    fn parts_table() -> Table {
        Table::new(
            "parts",
            vec![
                Column::not_null("name", ColumnType::Char(255)),
                Column::nullable("image_url", ColumnType::Char(255)),
            ],
        )
        .unwrap()
    }

    fn setup() -> (SqliteConnection, Table) {
        let conn = SqliteConnection::open_memory().unwrap();
        let table = parts_table();
        conn.create_table(&table).unwrap();
        (conn, table)
    }

    #[test]
    fn test_parameter_introspection() {
        let (conn, table) = setup();
        let insert = conn.prepare_insert(&table).unwrap();
        let stmt = insert.statement();
        assert_eq!(stmt.parameter_count(), 2);
        assert_eq!(stmt.parameter_names(), vec![":name", ":image_url"]);
        assert_eq!(stmt.state(), StatementState::Compiled);
        assert_eq!(
            stmt.sql(),
            "INSERT INTO parts (name, image_url) VALUES (:name, :image_url);"
        );
    }

    #[test]
    fn test_bind_and_run_updates_state() {
        let (conn, _table) = setup();
        let mut stmt = conn
            .compile("INSERT INTO parts (name, image_url) VALUES (:name, :image_url);")
            .unwrap();

        stmt.bind([(":name", Value::from("brick")), (":image_url", Value::Null)])
            .unwrap();
        assert_eq!(stmt.state(), StatementState::Bound);
        assert_eq!(stmt.bound_values().len(), 2);

        stmt.run().unwrap();
        assert_eq!(stmt.state(), StatementState::Exhausted);

        // Rebinding rewinds the statement for another row.
        stmt.run_with([(":name", Value::from("plate")), (":image_url", Value::from("u"))])
            .unwrap();
        assert_eq!(conn.changes().unwrap(), 1);
    }

    #[test]
    fn test_bind_unknown_parameter() {
        let (conn, _table) = setup();
        let mut stmt = conn
            .compile("INSERT INTO parts (name, image_url) VALUES (:name, :image_url);")
            .unwrap();

        let err = stmt
            .bind([(":name", Value::from("x")), (":color", Value::Null)])
            .unwrap_err();
        match err {
            Error::Bind(e) => {
                assert_eq!(e.kind, BindErrorKind::UnknownParameter);
                assert_eq!(e.parameter.as_deref(), Some(":color"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bind_count_strict_and_lenient() {
        let (conn, _table) = setup();
        let sql = "INSERT INTO parts (name, image_url) VALUES (:name, :image_url);";

        let mut stmt = conn.compile(sql).unwrap();
        let err = stmt.bind([(":name", Value::from("x"))]).unwrap_err();
        assert!(matches!(
            err,
            Error::Bind(BindError {
                kind: BindErrorKind::ParameterCount,
                ..
            })
        ));

        let lenient =
            SqliteConnection::open(&SqliteConfig::memory().strict_bindings(false)).unwrap();
        lenient.create_table(&parts_table()).unwrap();
        let mut stmt = lenient.compile(sql).unwrap();
        // Unbound parameters are NULL.
        stmt.run_with([(":name", Value::from("x"))]).unwrap();
        let rows = lenient.read_all_rows(&parts_table()).unwrap();
        assert_eq!(rows[0].get_by_name("image_url"), Some(&Value::Null));
    }

    #[test]
    fn test_insert_and_read_nullable() {
        let (conn, table) = setup();
        let name = &table.columns()[0];
        let url = &table.columns()[1];

        let mut insert = conn.prepare_insert(&table).unwrap();
        insert
            .insert([(name, Value::from("part")), (url, Value::from("http://x/y.png"))])
            .unwrap();
        insert.insert([(name, Value::from("part")), (url, Value::Null)]).unwrap();

        let mut select = conn.prepare_select(&table).unwrap();
        let rows = select.read_all_rows().unwrap();
        assert_eq!(rows.len(), 2);

        let mut urls: Vec<Option<String>> = rows
            .iter()
            .map(|row| row.get_column::<Option<String>>(url).unwrap())
            .collect();
        urls.sort();
        assert_eq!(urls, vec![None, Some("http://x/y.png".to_string())]);

        // Reading again re-runs the query from the start.
        assert_eq!(select.read_all_rows().unwrap().len(), 2);
    }

    #[test]
    fn test_insert_missing_and_extra_column() {
        let (conn, table) = setup();
        let mut insert = conn.prepare_insert(&table).unwrap();

        let err = insert
            .insert([(&table.columns()[0], Value::from("x"))])
            .unwrap_err();
        match err {
            Error::Bind(e) => {
                assert_eq!(e.kind, BindErrorKind::MissingColumnValue);
                assert_eq!(e.parameter.as_deref(), Some("image_url"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let stray = Column::not_null("color", ColumnType::Char(6));
        let err = insert
            .insert([
                (&table.columns()[0], Value::from("x")),
                (&table.columns()[1], Value::Null),
                (&stray, Value::from("AAAAAA")),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Bind(BindError {
                kind: BindErrorKind::UnknownParameter,
                ..
            })
        ));
    }

    #[test]
    fn test_run_rejects_rows() {
        let (conn, _table) = setup();
        let mut stmt = conn.compile("SELECT 1;").unwrap();
        let err = stmt.run().unwrap_err();
        assert!(matches!(
            err,
            Error::Query(QueryError {
                kind: QueryErrorKind::UnexpectedRow,
                ..
            })
        ));
    }

    #[test]
    fn test_constraint_error_carries_bindings() {
        let (conn, table) = setup();
        let mut insert = conn.prepare_insert(&table).unwrap();
        let err = insert
            .insert([
                (&table.columns()[0], Value::Null),
                (&table.columns()[1], Value::from("u")),
            ])
            .unwrap_err();
        assert!(err.is_constraint_violation());
        let Error::Query(query_error) = &err else {
            panic!("unexpected error: {err}");
        };
        let message = query_error.to_string();
        assert!(message.starts_with("[Statement] Running query: INSERT INTO parts"), "{message}");
        assert!(err.to_string().starts_with("Query error: [Statement]"));
        assert!(message.contains(":image_url = \"u\""), "{message}");
        assert!(message.contains("NOT NULL"), "{message}");
    }

    #[test]
    fn test_schema_mismatch_detected() {
        let (conn, _table) = setup();

        // Fewer columns than the database table has.
        let narrow = Table::new(
            "parts",
            vec![Column::not_null("name", ColumnType::Char(255))],
        )
        .unwrap();
        let err = conn.read_all_rows(&narrow).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError {
                kind: DecodeErrorKind::ColumnCountMismatch,
                ..
            })
        ));

        // Same count, different name.
        let renamed = Table::new(
            "parts",
            vec![
                Column::not_null("name", ColumnType::Char(255)),
                Column::nullable("picture", ColumnType::Char(255)),
            ],
        )
        .unwrap();
        let err = conn.read_all_rows(&renamed).unwrap_err();
        match err {
            Error::Decode(e) => {
                assert_eq!(e.kind, DecodeErrorKind::UnknownColumn);
                assert_eq!(e.column.as_deref(), Some("image_url"));
                assert_eq!(e.index, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_in_not_null_column_rejected_on_read() {
        let conn = SqliteConnection::open_memory().unwrap();
        // The database table allows NULL, the description does not.
        conn.run("CREATE TABLE flags (name CHAR(10) NOT NULL, on_off BOOL NULL);")
            .unwrap();
        conn.run("INSERT INTO flags (name, on_off) VALUES ('a', NULL);")
            .unwrap();

        let table = Table::new(
            "flags",
            vec![
                Column::not_null("name", ColumnType::Char(10)),
                Column::not_null("on_off", ColumnType::Bool),
            ],
        )
        .unwrap();
        let err = conn.read_all_rows(&table).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError {
                kind: DecodeErrorKind::UnexpectedNull,
                ..
            })
        ));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let (conn, table) = setup();
        conn.run("INSERT INTO parts (name, image_url) VALUES ('brick', 'u');")
            .unwrap();

        // Same columns, reversed order in the description.
        let reversed = Table::new(
            "parts",
            vec![table.columns()[1].clone(), table.columns()[0].clone()],
        )
        .unwrap();
        let rows = conn.read_all_rows(&reversed).unwrap();
        assert_eq!(rows[0].get(0), Some(&Value::from("u")));
        assert_eq!(rows[0].get(1), Some(&Value::from("brick")));
    }

    #[test]
    fn test_bind_rejects_repeated_parameter() {
        let (conn, table) = setup();
        let mut stmt = conn
            .compile("INSERT INTO parts (name, image_url) VALUES (:name, :image_url);")
            .unwrap();

        // Right count, but :image_url would silently stay NULL.
        let err = stmt
            .run_with([(":name", Value::from("a")), (":name", Value::from("b"))])
            .unwrap_err();
        match &err {
            Error::Bind(e) => {
                assert_eq!(e.kind, BindErrorKind::DuplicateParameter);
                assert_eq!(e.parameter.as_deref(), Some(":name"));
                assert!(e.bindings.as_deref().unwrap().contains(":name = \"b\""));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(conn.read_all_rows(&table).unwrap().is_empty());

        let mut insert = conn.prepare_insert(&table).unwrap();
        let err = insert
            .insert([
                (&table.columns()[0], Value::from("a")),
                (&table.columns()[0], Value::from("b")),
                (&table.columns()[1], Value::Null),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Bind(BindError {
                kind: BindErrorKind::DuplicateParameter,
                ..
            })
        ));
    }

    #[test]
    fn test_bind_error_reports_supplied_values() {
        let (conn, table) = setup();
        let mut insert = conn.prepare_insert(&table).unwrap();
        let err = insert
            .insert([(&table.columns()[0], Value::from("brick"))])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("with bindings: {name = \"brick\"}"), "{message}");
    }

    #[test]
    fn test_invalid_utf8_text_is_an_error() {
        let (conn, table) = setup();
        conn.run("INSERT INTO parts (name, image_url) VALUES (CAST(X'C328' AS TEXT), NULL);")
            .unwrap();

        let err = conn.read_all_rows(&table).unwrap_err();
        match err {
            Error::Decode(e) => {
                assert_eq!(e.kind, DecodeErrorKind::InvalidUtf8);
                assert_eq!(e.column.as_deref(), Some("name"));
                assert_eq!(e.index, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compile_empty_sql() {
        let conn = SqliteConnection::open_memory().unwrap();
        assert!(conn.compile("   ").is_err());
    }
}
