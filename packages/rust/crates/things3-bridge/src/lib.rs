//! things3-bridge - Automation bridge for the Things3 to-do app
//!
//! Reads and mutates Things3 data through its native scripting interface:
//! - Script rendering with out-of-band arguments (no interpolated input)
//! - Out-of-process execution via `osascript`, with an optional time bound
//! - Structured decoding of query output into typed records
//! - Two error kinds: execution and decode
//!
//! ```rust,ignore
//! use things3_bridge::ThingsBridge;
//!
//! let bridge = ThingsBridge::new();
//! for task in bridge.get_inbox_tasks()? {
//!     println!("{} [{}]", task.title, task.tags);
//! }
//! bridge.assign_project("Buy milk", "Groceries")?;
//! ```

mod bridge;
mod decode;
mod error;
mod executor;
mod records;
pub mod script;

pub use bridge::ThingsBridge;
pub use decode::{decode_flat_records, decode_records};
pub use error::{BridgeError, DecodeError, ExecutionError, Result};
pub use executor::{BridgeConfig, OsaScriptExecutor, ScriptExecutor};
pub use records::{
    AreaRecord, FlatRecord, ProjectRecord, SelectedTodoRecord, TAG_SEPARATOR, TaskRecord,
};
pub use script::{Script, quote_literal};
