// matchday_server/src/services/sanity.rs

//! Content store backed by the Sanity HTTP API (GROQ queries + mutations).

use crate::config::SanityConfig;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use matchday::{Booking, ContentStore, Fixture, Reservation, StoreError, StoredDocument};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Revision conflicts tolerated by one reservation before giving up.
pub const MAX_RESERVE_ATTEMPTS: usize = 3;

const FIXTURE_PROJECTION: &str =
  "{_id, homeTeam, awayTeam, competition, date, venue, hasTickets, ticketAvailability}";

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
  result: T,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
  #[serde(default)]
  results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
  id: String,
}

/// The fields a reservation needs, plus the revision it is conditioned on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventorySnapshot {
  #[serde(rename = "_rev")]
  rev: String,
  #[serde(default)]
  has_tickets: bool,
  #[serde(default)]
  ticket_availability: Option<i64>,
}

impl InventorySnapshot {
  fn availability(&self) -> u32 {
    u32::try_from(self.ticket_availability.unwrap_or(0).max(0)).unwrap_or(u32::MAX)
  }
}

#[derive(Clone)]
pub struct SanityStore {
  client: Client,
  base_url: String,
  dataset: String,
  token: Option<String>,
}

impl std::fmt::Debug for SanityStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SanityStore")
      .field("base_url", &self.base_url)
      .field("dataset", &self.dataset)
      .field("writable", &self.token.is_some())
      .finish()
  }
}

impl SanityStore {
  pub fn new(config: &SanityConfig, timeout: Duration) -> Result<Self, StoreError> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| StoreError::Transport(e.to_string()))?;
    let host = config
      .api_base
      .clone()
      .unwrap_or_else(|| format!("https://{}.api.sanity.io", config.project_id));

    Ok(Self {
      client,
      base_url: format!("{}/v{}", host.trim_end_matches('/'), config.api_version.trim_start_matches('v')),
      dataset: config.dataset.clone(),
      token: config.api_token.clone(),
    })
  }

  fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  async fn query<T: DeserializeOwned>(&self, groq: &str, params: &[(&str, Value)]) -> Result<T, StoreError> {
    let mut query: Vec<(String, String)> = vec![("query".to_string(), groq.to_string())];
    for (name, value) in params {
      query.push((format!("${}", name), value.to_string()));
    }

    let request = self
      .client
      .get(format!("{}/data/query/{}", self.base_url, self.dataset))
      .query(&query);
    let response = self
      .authorized(request)
      .send()
      .await
      .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(StoreError::Api {
        status: status.as_u16(),
        message,
      });
    }
    let body: QueryResponse<T> = response.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(body.result)
  }

  /// Sends one transaction. A 409 comes back as `Ok(None)` so callers can retry.
  async fn mutate(&self, mutations: Value) -> Result<Option<MutateResponse>, StoreError> {
    let token = self.token.as_deref().ok_or(StoreError::MissingWriteToken)?;
    let response = self
      .client
      .post(format!("{}/data/mutate/{}", self.base_url, self.dataset))
      .query(&[("returnIds", "true"), ("visibility", "sync")])
      .bearer_auth(token)
      .json(&json!({ "mutations": mutations }))
      .send()
      .await
      .map_err(|e| StoreError::Transport(e.to_string()))?;

    match response.status() {
      StatusCode::CONFLICT => Ok(None),
      status if status.is_success() => response
        .json::<MutateResponse>()
        .await
        .map(Some)
        .map_err(|e| StoreError::Decode(e.to_string())),
      status => {
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
          status: status.as_u16(),
          message,
        })
      }
    }
  }

  async fn inventory(&self, match_id: &str) -> Result<Option<InventorySnapshot>, StoreError> {
    self
      .query(
        r#"*[_type == "match" && _id == $id][0]{_rev, hasTickets, ticketAvailability}"#,
        &[("id", json!(match_id))],
      )
      .await
  }
}

#[async_trait]
impl ContentStore for SanityStore {
  fn ensure_writable(&self) -> Result<(), StoreError> {
    match self.token {
      Some(_) => Ok(()),
      None => Err(StoreError::MissingWriteToken),
    }
  }

  #[instrument(skip(self))]
  async fn fetch_fixture(&self, id: &str) -> Result<Option<Fixture>, StoreError> {
    let groq = format!(r#"*[_type == "match" && _id == $id][0]{}"#, FIXTURE_PROJECTION);
    self.query(&groq, &[("id", json!(id))]).await
  }

  #[instrument(skip(self))]
  async fn upcoming_fixtures(&self, from: DateTime<Utc>, limit: usize) -> Result<Vec<Fixture>, StoreError> {
    if limit == 0 {
      return Ok(Vec::new());
    }
    let groq = format!(
      r#"*[_type == "match" && dateTime(date) >= dateTime($from)] | order(date asc) [0...{}]{}"#,
      limit, FIXTURE_PROJECTION
    );
    let fixtures: Option<Vec<Fixture>> = self
      .query(&groq, &[("from", json!(from.to_rfc3339_opts(SecondsFormat::Secs, true)))])
      .await?;
    Ok(fixtures.unwrap_or_default())
  }

  #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
  async fn create_booking(&self, booking: &Booking) -> Result<StoredDocument, StoreError> {
    let document = json!({
      "_type": "booking",
      "bookingId": booking.id,
      "match": { "_type": "reference", "_ref": booking.match_id },
      "name": booking.name,
      "email": booking.email,
      "quantity": booking.quantity,
      "status": booking.status.as_str(),
      "createdAt": booking.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    let response = self
      .mutate(json!([{ "create": document }]))
      .await?
      .ok_or_else(|| StoreError::Api {
        status: StatusCode::CONFLICT.as_u16(),
        message: "booking create conflicted".to_string(),
      })?;
    let document_id = response
      .results
      .into_iter()
      .next()
      .map(|r| r.id)
      .ok_or_else(|| StoreError::Decode("mutation returned no document id".to_string()))?;
    Ok(StoredDocument { document_id })
  }

  /// Read the revision, then patch guarded by `ifRevisionID`. Another writer
  /// in between makes Sanity answer 409 and the cycle starts again.
  #[instrument(skip(self))]
  async fn reserve_tickets(&self, match_id: &str, quantity: u32) -> Result<Reservation, StoreError> {
    self.ensure_writable()?;

    for attempt in 1..=MAX_RESERVE_ATTEMPTS {
      let Some(snapshot) = self.inventory(match_id).await? else {
        return Ok(Reservation::MatchMissing);
      };
      if !snapshot.has_tickets {
        return Ok(Reservation::TicketingClosed);
      }
      let available = snapshot.availability();
      if available < quantity {
        return Ok(Reservation::Insufficient { available });
      }
      let remaining = available - quantity;

      let patch = json!([{
        "patch": {
          "id": match_id,
          "ifRevisionID": snapshot.rev,
          "set": { "ticketAvailability": remaining }
        }
      }]);
      if self.mutate(patch).await?.is_some() {
        debug!(attempt, remaining, "Availability decremented.");
        return Ok(Reservation::Reserved { remaining });
      }
      warn!(attempt, "Availability changed concurrently; retrying.");
    }

    Err(StoreError::Contention(match_id.to_string()))
  }

  #[instrument(skip(self))]
  async fn release_tickets(&self, match_id: &str, quantity: u32) -> Result<(), StoreError> {
    let patch = json!([{ "patch": { "id": match_id, "inc": { "ticketAvailability": quantity } } }]);
    self
      .mutate(patch)
      .await?
      .map(|_| ())
      .ok_or_else(|| StoreError::Contention(match_id.to_string()))
  }
}
