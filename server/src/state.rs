// matchday_server/src/state.rs

use crate::config::AppConfig;
use matchday::{CalendarOptions, Club};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub club: Arc<Club>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn calendar_options(&self) -> CalendarOptions {
    CalendarOptions {
      club_name: self.config.club_name.clone(),
      calendar_name: format!("{} Fixtures", self.config.club_name),
      domain: self.config.site_host(),
    }
  }
}
