//! Statement processing
//!
//! This module provides:
//! - `parser`: matches a statement against the four command shapes
//! - `types`: stored rows
//! - `schema`: table and column definitions
//! - `plan`: splits captured operands into plan nodes
//! - `executor`: runs create, insert, select and delete
//! - `engine`: table storage and the execution session

pub mod engine;
pub mod executor;
pub mod parser;
pub mod plan;
pub mod schema;
pub mod types;
