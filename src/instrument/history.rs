//! Call-history wrapper.

use std::fmt::Display;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{CallArgs, Operation};
use crate::keys;
use crate::kv::SharedStore;

/// Appends the rendered arguments to `<name>:inputs`, calls the inner
/// operation, appends the rendered result to `<name>:outputs`.
///
/// The wrapped operation's result comes back as its rendered text. When the
/// inner call fails no output is appended and the input entry stays unpaired.
pub struct CallHistory<O> {
    inner: O,
    store: SharedStore,
}

impl<O> CallHistory<O> {
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O> Operation for CallHistory<O>
where
    O: Operation,
    O::Input: CallArgs,
    O::Output: Display,
{
    type Input = O::Input;
    type Output = String;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke(&self, input: O::Input) -> Result<String> {
        let name = self.name();
        let rendered_input = input.render();
        self.store
            .rpush(&keys::inputs_key(name), rendered_input.as_bytes())
            .await?;

        let output = self.inner.invoke(input).await?.to_string();
        let recorded = self
            .store
            .rpush(&keys::outputs_key(name), output.as_bytes())
            .await?;

        debug!("{}(*{}) -> {} [entry {}]", name, rendered_input, output, recorded);
        Ok(output)
    }
}
