// matchday/src/pipeline/hooks.rs

//! Registration of `on` and `after` handlers.

use crate::error::PipelineError;
use crate::pipeline::context::{ContextData, Handler};
use crate::pipeline::control::PipelineControl;
use crate::pipeline::definition::Pipeline;
use std::future::Future;
use tracing::{event, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn wrap<F, HandlerErr>(
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Handler<TData, Err>
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    })
  }

  /// Registers the main handler(s) of a step. Handlers run in registration order.
  pub fn on_root<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Result<(), PipelineError>
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    self.on.entry(step_name.to_string()).or_default().push(Self::wrap(handler_fn));
    event!(Level::TRACE, %step_name, "on handler registered.");
    Ok(())
  }

  /// Registers a handler that runs after every `on` handler of the step succeeded.
  pub fn after_root<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Result<(), PipelineError>
  where
    F: Future<Output = Result<PipelineControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    self.after.entry(step_name.to_string()).or_default().push(Self::wrap(handler_fn));
    event!(Level::TRACE, %step_name, "after handler registered.");
    Ok(())
  }
}
