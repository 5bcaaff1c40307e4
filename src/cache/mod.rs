//! Cache Module
//!
//! The instrumented key-value façade and replay of its recorded calls.

mod facade;
mod replay;


// Re-export public types
pub use facade::{Cache, StoreValue};
pub use replay::{replay, Replay};
