// matchday_server/src/lib.rs

//! HTTP front end for the `matchday` booking and checkout pipelines.

pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::services::{ResendMailer, SanityStore};
use crate::state::AppState;
use anyhow::Context;
use matchday::{Club, Collaborators, ContentStore, LogMailer, Mailer, MemoryStore, NotifySettings};
use std::sync::Arc;

fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
  match config.store_backend {
    StoreBackend::Sanity => {
      let sanity = config.sanity.as_ref().context("Sanity settings missing")?;
      if sanity.api_token.is_none() {
        tracing::warn!("SANITY_API_TOKEN is not set; bookings will fail until it is configured.");
      }
      Ok(Arc::new(SanityStore::new(sanity, config.http_timeout)?))
    }
    StoreBackend::Memory => {
      let store = match &config.seed_fixtures {
        Some(path) => {
          let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
          MemoryStore::from_json(&raw).with_context(|| format!("parsing fixtures in {}", path.display()))?
        }
        None => MemoryStore::new(),
      };
      tracing::info!("Using the in-memory content store.");
      Ok(Arc::new(store))
    }
  }
}

fn build_mailer(config: &AppConfig) -> anyhow::Result<Arc<dyn Mailer>> {
  match &config.resend_api_key {
    Some(key) => Ok(Arc::new(ResendMailer::new(key.clone(), config.http_timeout)?)),
    None => {
      tracing::warn!("RESEND_API_KEY is not set; emails will be logged, not sent.");
      Ok(Arc::new(LogMailer))
    }
  }
}

/// Wires the configured store and mailer into a [`Club`] and wraps it for actix.
pub fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
  let notify = NotifySettings {
    from: config.email_from.clone(),
    admin_email: config.admin_email.clone(),
    club_name: config.club_name.clone(),
    site_url: config.site_url.clone(),
  };
  let collaborators = Collaborators::new(build_store(&config)?, notify)
    .with_mailer(build_mailer(&config)?)
    .with_shipping_fee(config.shipping_fee);
  let club = Club::new(collaborators).context("registering pipelines")?;

  Ok(AppState {
    club: Arc::new(club),
    config: Arc::new(config),
  })
}
