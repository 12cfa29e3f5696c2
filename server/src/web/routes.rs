// matchday_server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{booking_handlers, calendar_handlers, checkout_handlers, match_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .route("/bookings", web::post().to(booking_handlers::create_booking_handler))
      .route("/checkout", web::post().to(checkout_handlers::checkout_handler))
      .route("/calendar.ics", web::get().to(calendar_handlers::fixtures_calendar_handler))
      .service(
        web::scope("/matches")
          .route("/upcoming", web::get().to(match_handlers::upcoming_matches_handler))
          .route("/{id}/calendar.ics", web::get().to(calendar_handlers::match_calendar_handler))
          .route(
            "/{id}/calendar-links",
            web::get().to(calendar_handlers::match_calendar_links_handler),
          ),
      ),
  );
}
