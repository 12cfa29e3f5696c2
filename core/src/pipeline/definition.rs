// matchday/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` type and its structural edits.

use crate::error::PipelineError;
use crate::pipeline::context::Handler;
use crate::pipeline::step::{SkipCondition, StepDef};
use std::collections::HashMap;

/// An ordered list of named steps with async handlers attached to them.
///
/// `Err` is the error type handlers return. It must absorb `PipelineError`
/// so that engine failures (a required step without handlers) surface through
/// the same channel as handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Builds a pipeline from `(name, optional, skip_if)` triples, in order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_if)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, step_name: &str) -> Result<usize, PipelineError> {
    self
      .steps
      .iter()
      .position(|s| s.name == step_name)
      .ok_or_else(|| PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      })
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    self.position(step_name).map(|_| ())
  }

  fn ensure_step_not_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      return Err(PipelineError::DuplicateStep {
        step_name: step_name.to_string(),
      });
    }
    Ok(())
  }

  pub fn insert_after_step(
    &mut self,
    existing_step_name: &str,
    new_step_name: impl Into<String>,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) -> Result<(), PipelineError> {
    let idx = self.position(existing_step_name)?;
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name)?;
    self.steps.insert(idx + 1, StepDef { name, optional, skip_if });
    Ok(())
  }

  /// Removes a step and every handler attached to it. Unknown names are a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Ok(idx) = self.position(step_name) {
      self.steps.remove(idx);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> Result<(), PipelineError> {
    let idx = self.position(step_name)?;
    self.steps[idx].optional = optional;
    Ok(())
  }
}
