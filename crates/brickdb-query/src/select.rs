//! SELECT query builder.

use crate::SqlQuery;
use brickdb_core::Table;

/// Builder for `SELECT * FROM <table>;`.
///
/// Rows come back in no particular order.
#[derive(Debug, Clone, Copy)]
pub struct SelectAllQuery<'a> {
    table: &'a Table,
}

impl<'a> SelectAllQuery<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn build(&self) -> String {
        format!("SELECT * FROM {};", self.table.name())
    }
}

impl SqlQuery for SelectAllQuery<'_> {
    fn to_sql(&self) -> String {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickdb_core::{Column, ColumnType};

    #[test]
    fn test_select_all() {
        let table = Table::new("parts", vec![Column::not_null("name", ColumnType::Char(255))])
            .unwrap();
        assert_eq!(SelectAllQuery::new(&table).build(), "SELECT * FROM parts;");
    }
}
