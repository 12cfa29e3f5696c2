// tests/registry_tests.rs
mod common;

use common::*;
use matchday::{ContextData, Pipeline, PipelineError, Registry};

#[derive(Debug, Default)]
struct OtherContext;

fn counting_pipeline() -> Pipeline<TestContext, TestError> {
  let mut p = Pipeline::new(&[("count", false, None)]);
  p.on_root("count", create_simple_handler("count", "+")).unwrap();
  p
}

#[tokio::test]
async fn test_registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = Registry::<TestError>::new();
  registry.register_pipeline(counting_pipeline());
  assert!(registry.is_registered::<TestContext>());

  let ctx = ContextData::new(TestContext::default());
  let report = registry.run(ctx.clone()).await.unwrap();
  assert!(report.is_completed());
  assert_eq!(ctx.read().counter, 1);
}

#[tokio::test]
async fn test_registry_reports_unregistered_context() {
  setup_tracing();
  let registry = Registry::<TestError>::new();
  registry.register_pipeline(counting_pipeline());

  let err = registry.run(ContextData::new(OtherContext)).await.unwrap_err();
  match err {
    TestError::Engine(PipelineError::NotRegistered { type_name }) => assert!(type_name.contains("OtherContext")),
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn test_registering_again_replaces_pipeline() {
  setup_tracing();
  let registry = Registry::<TestError>::new();
  registry.register_pipeline(counting_pipeline());

  let mut replacement = Pipeline::<TestContext, TestError>::new(&[("twice", false, None)]);
  replacement.on_root("twice", create_simple_handler("t1", "a")).unwrap();
  replacement.on_root("twice", create_simple_handler("t2", "b")).unwrap();
  registry.register_pipeline(replacement);

  let ctx = ContextData::new(TestContext::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().message, "ab");
}
