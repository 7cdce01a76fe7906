use crate::{
    error::Result,
    sql::{engine::Transaction, executor::ResultSet, plan::Filter},
};

use super::Executor;

/// SELECT executor
///
/// With a filter the matching rows come back whole and the column list is
/// not applied; without one every row is projected to the column list.
pub struct Select {
    table_name: String,
    columns: Vec<String>,
    filter: Option<Filter>,
}

impl Select {
    pub fn new(table_name: String, columns: Vec<String>, filter: Option<Filter>) -> Box<Self> {
        Box::new(Self {
            table_name,
            columns,
            filter,
        })
    }
}

impl<T: Transaction> Executor<T> for Select {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let rows = txn.scan_table(&self.table_name, self.filter.as_ref())?;
        let rows = match self.filter {
            Some(_) => rows,
            None => rows.iter().map(|r| r.project(&self.columns)).collect(),
        };
        Ok(ResultSet::Select { rows })
    }
}
