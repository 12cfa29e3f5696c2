// matchday_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Sanity,
  Memory,
}

#[derive(Debug, Clone)]
pub struct SanityConfig {
  pub project_id: String,
  pub dataset: String,
  pub api_version: String,
  /// Without it the store is read-only and bookings fail with a configuration error.
  pub api_token: Option<String>,
  /// Overrides `https://<project>.api.sanity.io`; used by tests.
  pub api_base: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub site_url: String,
  pub club_name: String,
  pub store_backend: StoreBackend,
  pub sanity: Option<SanityConfig>,
  pub resend_api_key: Option<String>,
  pub email_from: String,
  pub admin_email: String,
  pub shipping_fee: Decimal,
  pub http_timeout: Duration,
  pub seed_fixtures: Option<PathBuf>,
}

// Keeps tokens out of logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("site_url", &self.site_url)
      .field("club_name", &self.club_name)
      .field("store_backend", &self.store_backend)
      .field("sanity_project", &self.sanity.as_ref().map(|s| &s.project_id))
      .field("sanity_write_token", &self.sanity.as_ref().map(|s| s.api_token.is_some()))
      .field("resend_configured", &self.resend_api_key.is_some())
      .field("email_from", &self.email_from)
      .field("admin_email", &self.admin_email)
      .field("shipping_fee", &self.shipping_fee)
      .field("http_timeout", &self.http_timeout)
      .field("seed_fixtures", &self.seed_fixtures)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let require = |name: &str| {
      get_env(name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let site_url = get_env("SITE_URL").unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));
    let club_name = get_env("CLUB_NAME").unwrap_or_else(|| "Football Club".to_string());

    let store_backend = match get_env("CONTENT_STORE").as_deref() {
      None | Some("sanity") => StoreBackend::Sanity,
      Some("memory") => StoreBackend::Memory,
      Some(other) => return Err(AppError::Config(format!("Invalid CONTENT_STORE '{}': expected sanity or memory", other))),
    };

    let sanity = match store_backend {
      StoreBackend::Sanity => Some(SanityConfig {
        project_id: require("SANITY_PROJECT_ID")?,
        dataset: get_env("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
        api_version: get_env("SANITY_API_VERSION").unwrap_or_else(|| "2024-01-01".to_string()),
        api_token: get_env("SANITY_API_TOKEN"),
        api_base: get_env("SANITY_API_BASE"),
      }),
      StoreBackend::Memory => None,
    };

    let host = url_host(&site_url);
    let email_from = get_env("EMAIL_FROM").unwrap_or_else(|| format!("{} <noreply@{}>", club_name, host));
    let admin_email = get_env("ADMIN_EMAIL").unwrap_or_else(|| format!("admin@{}", host));

    let shipping_fee = match get_env("SHIPPING_FEE") {
      Some(raw) => Decimal::from_str(&raw).map_err(|e| AppError::Config(format!("Invalid SHIPPING_FEE: {}", e)))?,
      None => Decimal::from(matchday::collaborators::DEFAULT_SHIPPING_FEE),
    };
    if shipping_fee.is_sign_negative() {
      return Err(AppError::Config("SHIPPING_FEE must not be negative".to_string()));
    }

    let http_timeout = get_env("HTTP_TIMEOUT_SECS")
      .unwrap_or_else(|| "10".to_string())
      .parse::<u64>()
      .map(Duration::from_secs)
      .map_err(|e| AppError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?;

    let config = Self {
      server_host,
      server_port,
      site_url,
      club_name,
      store_backend,
      sanity,
      resend_api_key: get_env("RESEND_API_KEY"),
      email_from,
      admin_email,
      shipping_fee,
      http_timeout,
      seed_fixtures: get_env("SEED_FIXTURES").map(PathBuf::from),
    };

    tracing::info!(config = ?config, "Application configuration loaded.");
    Ok(config)
  }

  /// Host part of the site URL, used for calendar UIDs and default addresses.
  pub fn site_host(&self) -> String {
    url_host(&self.site_url)
  }
}

fn url_host(url: &str) -> String {
  let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
  let host = without_scheme.split(['/', ':']).next().unwrap_or_default();
  if host.is_empty() {
    "localhost".to_string()
  } else {
    host.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|name| map.get(name).cloned())
  }

  #[test]
  fn memory_backend_needs_no_sanity_settings() {
    let config = config_from(&[("CONTENT_STORE", "memory"), ("SITE_URL", "https://club.test/home")]).unwrap();
    assert_eq!(config.store_backend, StoreBackend::Memory);
    assert!(config.sanity.is_none());
    assert_eq!(config.shipping_fee, Decimal::from(150));
    assert_eq!(config.http_timeout, Duration::from_secs(10));
    assert_eq!(config.site_host(), "club.test");
    assert_eq!(config.admin_email, "admin@club.test");
  }

  #[test]
  fn sanity_backend_requires_project_id() {
    let err = config_from(&[]).unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("SANITY_PROJECT_ID")));
  }

  #[test]
  fn sanity_token_is_optional() {
    let config = config_from(&[("SANITY_PROJECT_ID", "abc123"), ("SANITY_API_TOKEN", "  ")]).unwrap();
    let sanity = config.sanity.unwrap();
    assert_eq!(sanity.dataset, "production");
    assert!(sanity.api_token.is_none());
  }

  #[test]
  fn rejects_bad_numbers() {
    assert!(config_from(&[("CONTENT_STORE", "memory"), ("SERVER_PORT", "eighty")]).is_err());
    assert!(config_from(&[("CONTENT_STORE", "memory"), ("SHIPPING_FEE", "-1")]).is_err());
    assert!(config_from(&[("CONTENT_STORE", "cms")]).is_err());
  }
}
