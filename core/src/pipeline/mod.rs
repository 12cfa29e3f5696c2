// matchday/src/pipeline/mod.rs

//! A small async step-pipeline engine.

pub mod context;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context::{ContextData, Handler};
pub use control::{PipelineControl, PipelineReport, PipelineResult, SoftFailure};
pub use definition::Pipeline;
pub use step::{SkipCondition, StepDef};
