use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matchday::pipeline::Handler;
use matchday::sanitize::sanitize_html;
use matchday::{
  generate_ics, CalendarOptions, Club, Collaborators, ContextData, Fixture, LogMailer, MemoryStore, NotifySettings,
  Pipeline, PipelineControl, PipelineError, SkipCondition,
};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

type BenchError = PipelineError;

fn create_sync_increment_handler(iterations: u64) -> Handler<BenchContext, BenchError> {
  Box::new(move |ctx: ContextData<BenchContext>| {
    Box::pin(async move {
      let mut data = ctx.write();
      for _ in 0..iterations {
        data.counter = data.counter.wrapping_add(1);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

fn bench_engine_sync_handlers(c: &mut Criterion) {
  let mut group = c.benchmark_group("EngineSyncHandlers");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 10] {
    let names: Vec<String> = (0..num_steps).map(|i| format!("step_{i}")).collect();
    let step_defs: Vec<(&str, bool, Option<SkipCondition<BenchContext>>)> =
      names.iter().map(|n| (n.as_str(), false, None)).collect();

    let mut pipeline = Pipeline::<BenchContext, BenchError>::new(&step_defs);
    for name in &names {
      pipeline.on_root(name, create_sync_increment_handler(10)).unwrap();
    }
    let pipeline = Arc::new(pipeline);

    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || ContextData::new(BenchContext::default()),
        |ctx| {
          let p = pipeline.clone();
          async move { p.run(ctx).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_booking_flow(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let fixture = Fixture {
    id: "m1".to_string(),
    home_team: "Thimphu City".to_string(),
    away_team: "Paro FC".to_string(),
    competition: None,
    date: Utc::now() + Duration::days(7),
    venue: None,
    has_tickets: true,
    ticket_availability: Some(i64::from(u32::MAX)),
  };
  let store = Arc::new(MemoryStore::with_fixtures([fixture]));
  let settings = NotifySettings {
    from: "tickets@club.test".to_string(),
    admin_email: "admin@club.test".to_string(),
    club_name: "Thimphu City FC".to_string(),
    site_url: "https://club.test".to_string(),
  };
  let club = Arc::new(Club::new(Collaborators::new(store, settings).with_mailer(Arc::new(LogMailer))).unwrap());

  c.bench_function("booking_flow_memory_store", |b| {
    b.to_async(&rt).iter(|| {
      let club = club.clone();
      async move {
        club
          .place_booking(json!({ "matchId": "m1", "name": "Pema", "email": "pema@example.com", "quantity": 1 }))
          .await
          .unwrap()
      }
    });
  });
}

fn bench_ics_generation(c: &mut Criterion) {
  let options = CalendarOptions {
    club_name: "Thimphu City FC".to_string(),
    calendar_name: "Fixtures".to_string(),
    domain: "club.test".to_string(),
  };
  let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 30, 0).unwrap();
  let fixtures: Vec<Fixture> = (0..38)
    .map(|i| Fixture {
      id: format!("m{i}"),
      home_team: "Thimphu City".to_string(),
      away_team: format!("Opponent {i}"),
      competition: Some("Bhutan Premier League".to_string()),
      date: start + Duration::days(7 * i),
      venue: Some("Changlimithang Stadium, Thimphu".to_string()),
      has_tickets: i % 2 == 0,
      ticket_availability: Some(500),
    })
    .collect();

  c.bench_function("ics_season_38_fixtures", |b| {
    b.iter(|| criterion::black_box(generate_ics(&fixtures, &options, start)))
  });
}

fn bench_sanitize(c: &mut Criterion) {
  let input = "<p>Hello <b>there</b></p><script>alert(1)</script> & welcome to \"the\" match's page".repeat(8);
  c.bench_function("sanitize_html", |b| b.iter(|| criterion::black_box(sanitize_html(&input))));
}

criterion_group!(
  benches,
  bench_engine_sync_handlers,
  bench_booking_flow,
  bench_ics_generation,
  bench_sanitize
);
criterion_main!(benches);
