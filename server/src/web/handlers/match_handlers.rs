// matchday_server/src/web/handlers/match_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

pub const DEFAULT_UPCOMING_LIMIT: usize = 10;
pub const MAX_UPCOMING_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
  pub limit: Option<usize>,
}

#[instrument(name = "handler::upcoming_matches", skip(app_state))]
pub async fn upcoming_matches_handler(
  app_state: web::Data<AppState>,
  query: web::Query<UpcomingQuery>,
) -> Result<HttpResponse, AppError> {
  let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT).min(MAX_UPCOMING_LIMIT);
  let matches = app_state.club.upcoming_fixtures(limit).await?;
  Ok(HttpResponse::Ok().json(json!({ "matches": matches })))
}
