//! Operations built from async closures.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::error::Result;
use crate::instrument::{Operation, OperationName};

/// Adapts an async function `I -> Result<O>` into a named `Operation`.
pub struct FnOperation<F, I, O> {
    name: OperationName,
    func: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> FnOperation<F, I, O> {
    pub fn new<Fut>(name: OperationName, func: F) -> Self
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<O>>,
    {
        Self {
            name,
            func,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, I, O> Operation for FnOperation<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O>> + Send,
    I: Send + 'static,
    O: Send + 'static,
{
    type Input = I;
    type Output = O;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn invoke(&self, input: I) -> Result<O> {
        (self.func)(input).await
    }
}
