//! Sudosort core library.
//!
//! Parses a sudoers file into aliases, rules and passthrough lines, then
//! renders it in a deterministic, sorted form that diffs and merges well.
//!
//! High-level modules:
//! - `lines`: Continuation collapsing and leading comment header split.
//! - `parse`: Line classification, alias and rule parsing.
//! - `models`: Rules, alias tables, the document model and parse errors.
//! - `format`: Canonical serializer and the file-level run.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers.
//! - `logger`: Stderr backend for the `log` facade.
//! - `error`: Errors that end a run.
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod lines;
pub mod logger;
pub mod models;
pub mod output;
pub mod parse;
