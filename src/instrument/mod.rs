//! Instrumentation Module
//!
//! Stackable wrappers that attach store-backed bookkeeping to any operation
//! without changing how it is called.
//!
//! # Wrappers
//! - `CountCalls`: increments `<name>` before every call
//! - `CallHistory`: appends rendered arguments to `<name>:inputs` and rendered
//!   results to `<name>:outputs`
//!
//! Wrappers compose innermost-first: `op.count_calls(store.clone()).call_history(store)`
//! records history around a counted call, which is the order `Cache::store` uses.

mod args;
mod count;
mod func;
mod history;
mod registry;

use async_trait::async_trait;

use crate::error::Result;
use crate::kv::SharedStore;

pub use args::CallArgs;
pub use count::CountCalls;
pub use func::FnOperation;
pub use history::CallHistory;
pub use registry::{OperationName, OperationRegistry};

// == Operation Trait ==
/// A named, value-producing operation.
#[async_trait]
pub trait Operation: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Qualified name; the root of every key derived for this operation.
    fn name(&self) -> &str;

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Builder Extension ==
/// Builder methods wrapping an operation in the instrumentation layers.
pub trait OperationExt: Operation + Sized {
    /// Counts every call under the operation's name.
    fn count_calls(self, store: SharedStore) -> CountCalls<Self> {
        CountCalls::new(self, store)
    }

    /// Records the rendered arguments and result of every call.
    fn call_history(self, store: SharedStore) -> CallHistory<Self> {
        CallHistory::new(self, store)
    }
}

impl<O: Operation> OperationExt for O {}
