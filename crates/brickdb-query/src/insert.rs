//! INSERT query builder.

use crate::SqlQuery;
use brickdb_core::{Column, Table};
use std::fmt;

/// A named parameter in a compiled query, e.g. `:rgb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    name: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The parameter that stands for a column's value.
    pub fn for_column(column: &Column) -> Self {
        Self::new(format!(":{}", column.name()))
    }

    /// The parameter name including its `:` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for `INSERT INTO <table> (<columns>) VALUES (<parameters>);`.
///
/// Each column of the table is bound to its own named parameter. The mapping
/// is fixed at construction and stays valid for as long as the query (and the
/// statement compiled from it) lives.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    table: Table,
    /// One parameter per column, aligned with `table.columns()`.
    parameters: Vec<QueryParameter>,
}

impl InsertQuery {
    /// Create a new INSERT builder for a table description.
    pub fn new(table: &Table) -> Self {
        let parameters = table
            .columns()
            .iter()
            .map(QueryParameter::for_column)
            .collect();
        Self {
            table: table.clone(),
            parameters,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Iterate over (column, parameter) pairs in column order.
    pub fn parameters(&self) -> impl Iterator<Item = (&Column, &QueryParameter)> {
        self.table.columns().iter().zip(self.parameters.iter())
    }

    /// The parameter bound to the named column.
    pub fn parameter_for(&self, column_name: &str) -> Option<&QueryParameter> {
        self.table
            .index_of(column_name)
            .map(|index| &self.parameters[index])
    }

    /// Build the INSERT SQL.
    pub fn build(&self) -> String {
        let columns: Vec<&str> = self.table.column_names().collect();
        let placeholders: Vec<&str> = self.parameters.iter().map(QueryParameter::name).collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table.name(),
            columns.join(", "),
            placeholders.join(", ")
        )
    }
}

impl SqlQuery for InsertQuery {
    fn to_sql(&self) -> String {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickdb_core::ColumnType;

    fn colors() -> Table {
        Table::new(
            "colors",
            vec![
                Column::not_null("name", ColumnType::Char(255)),
                Column::not_null("rgb", ColumnType::Char(6)),
                Column::not_null("transparent", ColumnType::Bool),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_insert_sql() {
        let query = InsertQuery::new(&colors());
        assert_eq!(
            query.build(),
            "INSERT INTO colors (name, rgb, transparent) VALUES (:name, :rgb, :transparent);"
        );
    }

    #[test]
    fn test_parameter_mapping() {
        let query = InsertQuery::new(&colors());

        assert_eq!(query.parameter_for("rgb").map(QueryParameter::name), Some(":rgb"));
        assert!(query.parameter_for("image_url").is_none());

        let pairs: Vec<_> = query
            .parameters()
            .map(|(column, parameter)| (column.name(), parameter.name()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("name", ":name"),
                ("rgb", ":rgb"),
                ("transparent", ":transparent")
            ]
        );
    }

    #[test]
    fn test_parameters_are_distinct() {
        let query = InsertQuery::new(&colors());
        let mut names: Vec<_> = query.parameters().map(|(_, p)| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
