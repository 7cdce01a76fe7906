use crate::{
    error::Result,
    sql::{engine::Transaction, executor::ResultSet, plan::Filter, types::Row},
};

use super::Executor;

/// INSERT executor
pub struct Insert {
    table_name: String,
    row: Row,
}

impl Insert {
    pub fn new(table_name: String, row: Row) -> Box<Self> {
        Box::new(Self { table_name, row })
    }
}

impl<T: Transaction> Executor<T> for Insert {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let Insert { table_name, row } = *self;
        txn.create_row(&table_name, row)?;
        Ok(ResultSet::Insert { count: 1 })
    }
}

/// DELETE executor
pub struct Delete {
    table_name: String,
    filter: Option<Filter>,
}

impl Delete {
    pub fn new(table_name: String, filter: Option<Filter>) -> Box<Self> {
        Box::new(Self { table_name, filter })
    }
}

impl<T: Transaction> Executor<T> for Delete {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        // no filter empties the table, the schema stays
        let count = txn.delete_rows(&self.table_name, self.filter.as_ref())?;
        Ok(ResultSet::Delete { count })
    }
}
