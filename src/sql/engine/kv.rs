use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{plan::Filter, schema::Table, types::Row},
    storage::engine::Engine as StorageEngine,
};

use super::{Engine, Transaction};

/// Key-value store backed SQL engine
pub struct KVEngine<E: StorageEngine> {
    kv: Arc<Mutex<E>>,
}

impl<E: StorageEngine> Clone for KVEngine<E> {
    fn clone(&self) -> Self {
        Self {
            kv: self.kv.clone(),
        }
    }
}

impl<E: StorageEngine> KVEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            kv: Arc::new(Mutex::new(engine)),
        }
    }
}

impl<E: StorageEngine> Engine for KVEngine<E> {
    type Transaction = KVTransaction<E>;

    fn begin(&self) -> Result<Self::Transaction> {
        Ok(KVTransaction::new(self.kv.clone()))
    }
}

/// Table operations over the shared key-value store
///
/// Each operation takes the store lock once for its whole duration.
pub struct KVTransaction<E: StorageEngine> {
    kv: Arc<Mutex<E>>,
}

impl<E: StorageEngine> KVTransaction<E> {
    pub fn new(kv: Arc<Mutex<E>>) -> Self {
        Self { kv }
    }
}

/// Reads a table schema through an already held lock
fn load_table<E: StorageEngine>(kv: &E, table_name: &str) -> Result<Option<Table>> {
    let key = Key::Table(table_name.to_string()).encode()?;
    Ok(kv
        .get(&key)?
        .map(|v| bincode::deserialize(&v))
        .transpose()?)
}

fn ensure_table<E: StorageEngine>(kv: &E, table_name: &str) -> Result<()> {
    match load_table(kv, table_name)? {
        Some(_) => Ok(()),
        None => Err(Error::UnknownTable(table_name.to_string())),
    }
}

/// Every (key, row) of a table, in insertion order
fn load_rows<E: StorageEngine>(kv: &E, table_name: &str) -> Result<Vec<(Vec<u8>, Row)>> {
    let prefix = KeyPrefix::Row(table_name.to_string()).encode()?;
    kv.scan_prefix(&prefix)?
        .into_iter()
        .map(|(k, v)| -> Result<(Vec<u8>, Row)> { Ok((k, bincode::deserialize(&v)?)) })
        .collect()
}

impl<E: StorageEngine> Transaction for KVTransaction<E> {
    fn create_table(&mut self, table: Table) -> Result<()> {
        let mut kv = self.kv.lock()?;
        // a replaced table starts over with no rows
        for (key, _) in load_rows(&*kv, &table.name)? {
            kv.delete(&key)?;
        }
        kv.set(
            Key::Table(table.name.clone()).encode()?,
            bincode::serialize(&table)?,
        )?;
        kv.set(
            Key::NextRow(table.name.clone()).encode()?,
            bincode::serialize(&0u64)?,
        )?;
        debug!(table = %table.name, columns = table.columns.len(), "table created");
        Ok(())
    }

    fn get_table(&self, table_name: &str) -> Result<Option<Table>> {
        load_table(&*self.kv.lock()?, table_name)
    }

    fn create_row(&mut self, table_name: &str, row: Row) -> Result<()> {
        let mut kv = self.kv.lock()?;
        ensure_table(&*kv, table_name)?;

        let seq_key = Key::NextRow(table_name.to_string()).encode()?;
        let seq: u64 = match kv.get(&seq_key)? {
            Some(v) => bincode::deserialize(&v)?,
            None => 0,
        };
        // big-endian so key order is insertion order
        let key = Key::Row(table_name.to_string(), seq.to_be_bytes()).encode()?;
        kv.set(key, bincode::serialize(&row)?)?;
        kv.set(seq_key, bincode::serialize(&(seq + 1))?)?;
        debug!(table = table_name, seq, "row inserted");
        Ok(())
    }

    fn scan_table(&self, table_name: &str, filter: Option<&Filter>) -> Result<Vec<Row>> {
        let kv = self.kv.lock()?;
        ensure_table(&*kv, table_name)?;
        Ok(load_rows(&*kv, table_name)?
            .into_iter()
            .map(|(_, row)| row)
            .filter(|row| filter.is_none_or(|f| f.matches(row)))
            .collect())
    }

    fn delete_rows(&mut self, table_name: &str, filter: Option<&Filter>) -> Result<usize> {
        let mut kv = self.kv.lock()?;
        ensure_table(&*kv, table_name)?;
        let mut count = 0;
        for (key, row) in load_rows(&*kv, table_name)? {
            if filter.is_none_or(|f| f.matches(&row)) {
                kv.delete(&key)?;
                count += 1;
            }
        }
        debug!(table = table_name, count, "rows deleted");
        Ok(count)
    }

    fn list_tables(&self) -> Result<Vec<Table>> {
        let prefix = KeyPrefix::Table.encode()?;
        let mut tables = self
            .kv
            .lock()?
            .scan_prefix(&prefix)?
            .into_iter()
            .map(|(_, v)| bincode::deserialize::<Table>(&v))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tables)
    }
}

/// Key types for KV storage operations
#[derive(Debug, Serialize, Deserialize)]
enum Key {
    /// Table schema
    Table(String),
    /// One row: table name + big-endian insertion sequence
    Row(String, [u8; 8]),
    /// Sequence number the table's next row gets
    NextRow(String),
}

/// Key prefix types for prefix scanning
///
/// bincode writes an enum as [variant_index][variant_data...], so variants
/// must stay in the same order as `Key`. A fixed-size array is written
/// without a length, which keeps `Row(name)` a byte prefix of `Key::Row`.
#[derive(Debug, Serialize, Deserialize)]
enum KeyPrefix {
    Table,
    Row(String),
}

impl Key {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }
}

impl KeyPrefix {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }
}
