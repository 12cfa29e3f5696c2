// matchday/src/pipeline/context.rs

//! Shared working data for a pipeline run and the boxed handler type that
//! operates on it.

use crate::pipeline::control::PipelineControl;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Shared ownership plus interior mutability over a pipeline's data.
///
/// Guards returned by [`read`](Self::read) and [`write`](Self::write) are
/// blocking `parking_lot` guards and must be dropped before any `.await`.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Copies a value out of the context under a short-lived read lock.
  pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&self.0.read())
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

/// A registered step handler.
///
/// Receives a clone of the run's `ContextData` and resolves to either a control
/// signal or the pipeline's error type.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;
