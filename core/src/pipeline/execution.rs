// matchday/src/pipeline/execution.rs

//! `Pipeline::run`: walks the steps in order and executes their handlers.

use crate::error::PipelineError;
use crate::pipeline::context::{ContextData, Handler};
use crate::pipeline::control::{PipelineControl, PipelineReport, PipelineResult, SoftFailure};
use crate::pipeline::definition::Pipeline;
use crate::pipeline::step::StepDef;
use tracing::{event, info_span, instrument, Instrument, Level};

/// What happened to a single phase (`on` or `after`) of a step.
enum PhaseOutcome {
  Continue,
  Stop,
  /// An optional step failed; the rest of the step is abandoned.
  SoftFailed,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx_data`.
  ///
  /// Errors from required steps end the run and are returned. Errors from
  /// optional steps are logged, recorded in the report, and the run moves on
  /// to the next step.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineReport, Err> {
    let mut report = PipelineReport::new();

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(ctx_data.clone()) {
          event!(Level::DEBUG, step = step_name, "Step skipped by its skip condition.");
          continue;
        }
      }

      let on_handlers = self.on.get(step_name).filter(|v| !v.is_empty());
      let after_handlers = self.after.get(step_name).filter(|v| !v.is_empty());

      if on_handlers.is_none() && after_handlers.is_none() {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Required step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let span = info_span!("pipeline_step", step = step_name, step_index = step_idx, optional = step_def.optional);

      let mut outcome = PhaseOutcome::Continue;
      for (phase, handlers) in [("on", on_handlers), ("after", after_handlers)] {
        let Some(handlers) = handlers else { continue };
        outcome = self
          .run_phase(step_def, phase, handlers, &ctx_data, &mut report)
          .instrument(span.clone())
          .await?;
        if !matches!(outcome, PhaseOutcome::Continue) {
          break;
        }
      }

      if let PhaseOutcome::Stop = outcome {
        event!(Level::INFO, step = step_name, "Pipeline stopped by a handler.");
        report.result = PipelineResult::Stopped;
        return Ok(report);
      }
    }

    event!(
      Level::DEBUG,
      soft_failures = report.soft_failures.len(),
      "Pipeline execution completed."
    );
    Ok(report)
  }

  async fn run_phase(
    &self,
    step_def: &StepDef<TData>,
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
    report: &mut PipelineReport,
  ) -> Result<PhaseOutcome, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      match handler_fn(ctx_data.clone()).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return Ok(PhaseOutcome::Stop),
        Err(e) if step_def.optional => {
          event!(Level::WARN, phase, handler_index = handler_idx, error = %e, "Optional step failed; continuing.");
          report.soft_failures.push(SoftFailure {
            step: step_def.name.clone(),
            message: e.to_string(),
          });
          return Ok(PhaseOutcome::SoftFailed);
        }
        Err(e) => {
          event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Continue)
  }
}
