use crate::{
    error::Result,
    sql::{
        engine::Transaction,
        executor::{Executor, ResultSet},
        parser::ast::Statement,
        schema::Table,
        types::Row,
    },
};

mod planner;

pub use planner::Planner;

/// Execution plan node, operands already split into lists
#[derive(Debug, PartialEq)]
pub enum Node {
    CreateTable {
        schema: Table,
    },
    Insert {
        table_name: String,
        row: Row,
    },
    Select {
        table_name: String,
        columns: Vec<String>,
        filter: Option<Filter>,
    },
    Delete {
        table_name: String,
        filter: Option<Filter>,
    },
}

/// Equality filter from a where clause
///
/// An absent value matches rows where the column is missing or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Option<String>,
}

impl Filter {
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == self.value.as_deref()
    }
}

/// Execution plan
#[derive(Debug, PartialEq)]
pub struct Plan(pub Node);

impl Plan {
    /// Builds a plan with the default (permissive) planner
    pub fn build(stmt: Statement) -> Result<Self> {
        Planner::new().build(stmt)
    }

    pub fn execute<T: Transaction + 'static>(self, txn: &mut T) -> Result<ResultSet> {
        <dyn Executor<T>>::build(self.0).execute(txn)
    }
}
