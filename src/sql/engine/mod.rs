use std::sync::{Arc, Mutex};

use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    sql::{
        executor::ResultSet,
        parser::Parser,
        plan::{Filter, Planner},
        schema::{Table, TableData},
        types::Row,
    },
};

mod kv;

pub use kv::{KVEngine, KVTransaction};

/// SQL engine trait
pub trait Engine: Clone + Send + Sync + 'static {
    type Transaction: Transaction + 'static;

    fn begin(&self) -> Result<Self::Transaction>;

    fn session(&self) -> Result<Session<Self>> {
        self.session_with(Config::default())
    }

    fn session_with(&self, config: Config) -> Result<Session<Self>> {
        Ok(Session::new(self.clone(), config))
    }
}

/// Table operations a statement runs against
///
/// Every operation but `create_table` and `list_tables` requires the table
/// to exist and fails with `Error::UnknownTable` otherwise.
pub trait Transaction {
    /// Stores a fresh table with no rows, replacing any table of the same name
    fn create_table(&mut self, table: Table) -> Result<()>;
    fn get_table(&self, table_name: &str) -> Result<Option<Table>>;
    /// Appends a row after every row already in the table
    fn create_row(&mut self, table_name: &str, row: Row) -> Result<()>;
    /// Returns the rows matching `filter` (all rows if None) in insertion order
    fn scan_table(&self, table_name: &str, filter: Option<&Filter>) -> Result<Vec<Row>>;
    /// Removes the rows matching `filter` (all rows if None), returns how many
    fn delete_rows(&mut self, table_name: &str, filter: Option<&Filter>) -> Result<usize>;
    /// Every table schema, ordered by name
    fn list_tables(&self) -> Result<Vec<Table>>;

    /// Returns table info, returns error if table doesn't exist
    fn must_get_table(&self, table_name: &str) -> Result<Table> {
        self.get_table(table_name)?
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))
    }
}

/// Execution session, the entry point for statements
///
/// Cloning a session is cheap and every clone works on the same tables.
/// Statements given to `execute`, `submit` and `execute_all` may be in
/// flight together: their latencies elapse concurrently, but they run one
/// at a time in the order they were handed over. `run` skips that queue;
/// see `Config::exclusive` for how it interleaves.
pub struct Session<E: Engine> {
    engine: E,
    config: Config,
    gate: Arc<Mutex<()>>,
    /// Completion signal of the most recently queued statement
    tail: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
}

/// A statement's place in the session queue
///
/// `previous` resolves once the statement queued before it has finished;
/// dropping `done` releases the statement queued after it.
struct Turn {
    previous: Option<oneshot::Receiver<()>>,
    done: oneshot::Sender<()>,
}

impl Turn {
    async fn wait(&mut self) {
        if let Some(previous) = self.previous.take() {
            // an error only means the earlier statement is gone
            let _ = previous.await;
        }
    }
}

impl<E: Engine> Clone for Session<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            config: self.config.clone(),
            gate: self.gate.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E, config: Config) -> Self {
        Self {
            engine,
            config,
            gate: Arc::new(Mutex::new(())),
            tail: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Executes a statement after the configured latency
    ///
    /// The statement takes its place in the queue when first polled.
    pub async fn execute(&self, sql: &str) -> Result<ResultSet> {
        let turn = self.enqueue()?;
        self.execute_in_turn(sql, turn).await
    }

    /// Takes the next place in the queue
    fn enqueue(&self) -> Result<Turn> {
        let (done, next) = oneshot::channel();
        let previous = self.tail.lock()?.replace(next);
        Ok(Turn { previous, done })
    }

    async fn execute_in_turn(&self, sql: &str, mut turn: Turn) -> Result<ResultSet> {
        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        turn.wait().await;
        let result = self.run(sql);
        drop(turn.done);
        result
    }

    /// Executes a statement right away on the calling thread
    pub fn run(&self, sql: &str) -> Result<ResultSet> {
        let Some(stmt) = Parser::new(sql).parse() else {
            warn!(statement = sql, "no statement shape matched");
            return Err(Error::Syntax(sql.to_string()));
        };
        debug!(kind = %stmt.kind(), table = stmt.table_name(), "executing statement");

        let plan = Planner::new().strict(self.config.strict).build(stmt)?;
        let _guard = if self.config.exclusive {
            Some(self.gate.lock()?)
        } else {
            None
        };
        let mut txn = self.engine.begin()?;
        plan.execute(&mut txn)
            .inspect_err(|err| warn!(statement = sql, %err, "statement failed"))
    }

    /// Schedules a statement as its own task
    ///
    /// The queue place is taken before this returns, so statements run in
    /// the order `submit` was called. Must be called from within a tokio
    /// runtime.
    pub fn submit(&self, sql: impl Into<String>) -> JoinHandle<Result<ResultSet>> {
        let session = self.clone();
        let sql = sql.into();
        let turn = self.enqueue();
        tokio::spawn(async move { session.execute_in_turn(&sql, turn?).await })
    }

    /// Submits every statement at once and waits for all of them
    ///
    /// Statements run, and results come back, in submission order. If any
    /// statement fails, the first failure in submission order is returned
    /// once all have finished.
    pub async fn execute_all<I, S>(&self, statements: I) -> Result<Vec<ResultSet>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handles = statements
            .into_iter()
            .map(|sql| self.submit(sql))
            .collect::<Vec<_>>();

        let mut results = Vec::with_capacity(handles.len());
        let mut failure = None;
        for handle in handles {
            match handle.await? {
                Ok(result) => results.push(result),
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(results),
        }
    }

    /// Dumps every table with its rows, ordered by table name
    pub fn tables(&self) -> Result<Vec<TableData>> {
        let _guard = self.gate.lock()?;
        let txn = self.engine.begin()?;
        txn.list_tables()?
            .into_iter()
            .map(|schema| {
                let rows = txn.scan_table(&schema.name, None)?;
                Ok(TableData { schema, rows })
            })
            .collect()
    }
}
