// matchday/src/pipeline/control.rs

//! Flow-control signals and the report produced by a pipeline run.

/// Returned by a handler to continue or halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt immediately. Remaining handlers and steps are not executed.
  Stop,
}

/// How a run ended when no required step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  Completed,
  Stopped,
}

/// A failure inside an optional step. Recorded, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFailure {
  pub step: String,
  pub message: String,
}

/// Outcome of a run: how it ended plus every best-effort step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
  pub result: PipelineResult,
  pub soft_failures: Vec<SoftFailure>,
}

impl PipelineReport {
  pub(crate) fn new() -> Self {
    Self {
      result: PipelineResult::Completed,
      soft_failures: Vec::new(),
    }
  }

  pub fn is_completed(&self) -> bool {
    self.result == PipelineResult::Completed
  }

  /// The recorded failure for `step`, if that optional step failed.
  pub fn failure_for(&self, step: &str) -> Option<&SoftFailure> {
    self.soft_failures.iter().find(|f| f.step == step)
  }
}
