// matchday_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use matchday_server::config::AppConfig;
use matchday_server::{build_state, web};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting matchday server...");

  let app_config = AppConfig::from_env().context("loading configuration")?;
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let app_state = build_state(app_config)?;

  tracing::info!("Binding server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("binding {}", server_address))?
  .run()
  .await
  .context("server terminated")
}
