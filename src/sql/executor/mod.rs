use crate::{
    error::Result,
    sql::{
        engine::Transaction,
        executor::{
            mutation::{Delete, Insert},
            query::Select,
            schema::CreateTable,
        },
        plan::Node,
        types::Row,
    },
};

mod mutation;
mod query;
mod schema;

/// SQL executor trait
pub trait Executor<T: Transaction> {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet>;
}

/// Builds an executor from a plan node
impl<T: Transaction + 'static> dyn Executor<T> {
    pub fn build(node: Node) -> Box<dyn Executor<T>> {
        match node {
            Node::CreateTable { schema } => CreateTable::new(schema),
            Node::Insert { table_name, row } => Insert::new(table_name, row),
            Node::Select {
                table_name,
                columns,
                filter,
            } => Select::new(table_name, columns, filter),
            Node::Delete { table_name, filter } => Delete::new(table_name, filter),
        }
    }
}

/// Execution result set
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    CreateTable { table_name: String },
    Insert { count: usize },
    Select { rows: Vec<Row> },
    Delete { count: usize },
}

impl ResultSet {
    /// Rows of a select, None for every other statement
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            ResultSet::Select { rows } => Some(rows),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            ResultSet::Select { rows } => Some(rows),
            _ => None,
        }
    }
}
