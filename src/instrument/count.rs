//! Invocation-counting wrapper.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::Operation;
use crate::keys;
use crate::kv::SharedStore;

/// Increments the counter at `<name>` before each call, then delegates.
///
/// The increment and the inner call are separate steps: a call that fails
/// after the increment stays counted.
pub struct CountCalls<O> {
    inner: O,
    store: SharedStore,
}

impl<O> CountCalls<O> {
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O: Operation> Operation for CountCalls<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke(&self, input: O::Input) -> Result<O::Output> {
        let calls = self.store.incr(&keys::counter_key(self.name())).await?;
        debug!("{} call #{}", self.name(), calls);
        self.inner.invoke(input).await
    }
}
