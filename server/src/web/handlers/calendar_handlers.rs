// matchday_server/src/web/handlers/calendar_handlers.rs

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
const SEASON_CALENDAR_LIMIT: usize = 100;

fn ics_response(filename: String, ics: String) -> HttpResponse {
  HttpResponse::Ok()
    .content_type(ICS_CONTENT_TYPE)
    .insert_header(ContentDisposition {
      disposition: DispositionType::Attachment,
      parameters: vec![DispositionParam::Filename(filename)],
    })
    .body(ics)
}

fn file_stem(id: &str) -> String {
  id.chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
    .collect()
}

#[instrument(name = "handler::fixtures_calendar", skip(app_state))]
pub async fn fixtures_calendar_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let ics = app_state
    .club
    .fixtures_calendar(&app_state.calendar_options(), SEASON_CALENDAR_LIMIT)
    .await?;
  Ok(ics_response("fixtures.ics".to_string(), ics))
}

#[instrument(name = "handler::match_calendar", skip(app_state))]
pub async fn match_calendar_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let ics = app_state.club.fixture_calendar(&id, &app_state.calendar_options()).await?;
  Ok(ics_response(format!("match-{}.ics", file_stem(&id)), ics))
}

#[instrument(name = "handler::match_calendar_links", skip(app_state))]
pub async fn match_calendar_links_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let links = app_state.club.fixture_links(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(links))
}
