//! minidb - a tiny in-process table store
//!
//! Statements come in one of four shapes:
//! - `create table <name> (<col> <type>, ...)`
//! - `insert into <name> (<col>, ...) values (<val>, ...)`
//! - `select <col>, ... from <name> [where <col> = <val>]`
//! - `delete from <name> [where <col> = <val>]`
//!
//! Values are kept as raw text and nothing survives the process.
//!
//! ```no_run
//! use minidb::{KVEngine, MemoryEngine, Engine};
//!
//! # async fn demo() -> minidb::error::Result<()> {
//! let session = KVEngine::new(MemoryEngine::new()).session()?;
//! session.execute("create table author (id number, name string)").await?;
//! session.execute("insert into author (id, name) values (1, Ann)").await?;
//! let rows = session.execute("select name from author").await?.into_rows();
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod sql;
pub mod storage;

pub use config::Config;
pub use sql::engine::{Engine, KVEngine, Session};
pub use sql::executor::ResultSet;
pub use storage::memory::MemoryEngine;
