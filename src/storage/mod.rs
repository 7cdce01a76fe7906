//! Byte-level storage the table engine is built on

pub mod engine;
pub mod memory;
