//! Error types for bridge operations.
//!
//! Two kinds reach the caller: the external call failed, or its output could
//! not be decoded. Neither is retried.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by every bridge operation.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The interpreter could not run the script to a zero exit.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Query output was not a JSON array of flat string records.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure crossing the process boundary.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// Interpreter binary missing or not executable.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// Interpreter exited with a failure status.
    #[error("Script failed (exit {}): {stderr}", exit_label(.code))]
    Failed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Trimmed standard error reported by the interpreter.
        stderr: String,
    },

    /// Interpreter was killed after exceeding the configured bound.
    #[error("Timeout exceeded: interpreter still running after {0:?}")]
    TimedOut(Duration),

    /// Waiting on the child or draining its pipes failed.
    #[error("IO error while running interpreter: {0}")]
    Io(#[from] io::Error),
}

/// Failure turning query output into records.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Output is not JSON at all.
    #[error("Output wasn't valid JSON: {source} (raw: {raw:?})")]
    InvalidJson {
        /// Parser error.
        #[source]
        source: serde_json::Error,
        /// Leading slice of the offending output.
        raw: String,
    },

    /// Top-level value is not an array.
    #[error("Expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),

    /// An array element is not an object.
    #[error("Record {index} is not an object (found {found})")]
    NotAnObject {
        /// Position in the array.
        index: usize,
        /// JSON type actually found.
        found: &'static str,
    },

    /// A field value is not a string.
    #[error("Record {index} field {field:?} is not a string (found {found})")]
    NonStringField {
        /// Position in the array.
        index: usize,
        /// Offending key.
        field: String,
        /// JSON type actually found.
        found: &'static str,
    },

    /// Flat record does not fit the requested record type.
    #[error("Record {index} does not match {record}: {source}")]
    Shape {
        /// Position in the array.
        index: usize,
        /// Target record type name.
        record: &'static str,
        /// Conversion error.
        #[source]
        source: serde_json::Error,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
