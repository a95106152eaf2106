//! CREATE TABLE query builder.

use crate::SqlQuery;
use brickdb_core::Table;

/// Builder for `CREATE TABLE <name> (<columns>);` queries.
#[derive(Debug, Clone, Copy)]
pub struct CreateTableQuery<'a> {
    table: &'a Table,
}

impl<'a> CreateTableQuery<'a> {
    /// Create a new CREATE TABLE builder for a table description.
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Build the CREATE TABLE SQL.
    ///
    /// Columns appear in declaration order.
    pub fn build(&self) -> String {
        let column_defs: Vec<String> = self.table.columns().iter().map(|c| c.to_sql()).collect();

        let mut sql = String::from("CREATE TABLE ");
        sql.push_str(self.table.name());
        sql.push_str(" (");
        sql.push_str(&column_defs.join(", "));
        sql.push_str(");");
        sql
    }
}

impl SqlQuery for CreateTableQuery<'_> {
    fn to_sql(&self) -> String {
        self.build()
    }
}
