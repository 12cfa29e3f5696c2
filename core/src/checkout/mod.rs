// matchday/src/checkout/mod.rs

//! Cash-on-delivery shop checkout. Orders are priced and emailed; nothing is
//! written to the content store.

mod pipeline;

pub use pipeline::register_checkout_pipeline;

use crate::collaborators::Collaborators;
use crate::error::{ServiceError, ServiceResult};
use crate::models::Order;
use crate::notify::NotificationReport;
use crate::pipeline::ContextData;
use crate::registry::Registry;
use crate::validation::CheckoutRequest;
use serde_json::Value;
use tracing::{info, instrument};

pub mod steps {
  pub const VALIDATE_REQUEST: &str = "validate_request";
  pub const PRICE_ORDER: &str = "price_order";
  pub const NOTIFY_CUSTOMER: &str = "notify_customer";
  pub const NOTIFY_ADMIN: &str = "notify_admin";
}

#[derive(Debug)]
pub struct CheckoutCtxData {
  pub collaborators: Collaborators,
  pub payload: Value,
  pub request: Option<CheckoutRequest>,
  pub order: Option<Order>,
  pub notifications: NotificationReport,
}

impl CheckoutCtxData {
  pub fn new(collaborators: Collaborators, payload: Value) -> Self {
    Self {
      collaborators,
      payload,
      request: None,
      order: None,
      notifications: NotificationReport::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderOutcome {
  pub order: Order,
  pub notifications: NotificationReport,
}

pub const ORDER_PLACED_MESSAGE: &str =
  "Order placed successfully. You will receive a confirmation email shortly and pay on delivery.";

#[instrument(name = "checkout::place", skip_all)]
pub async fn place_order(
  registry: &Registry<ServiceError>,
  collaborators: &Collaborators,
  payload: Value,
) -> ServiceResult<OrderOutcome> {
  let ctx = ContextData::new(CheckoutCtxData::new(collaborators.clone(), payload));
  let report = registry.run(ctx.clone()).await?;

  if !report.is_completed() {
    return Err(ServiceError::Internal("checkout pipeline stopped early".to_string()));
  }

  let mut data = ctx.write();
  let Some(order) = data.order.take() else {
    return Err(ServiceError::Internal("checkout pipeline finished without an order".to_string()));
  };

  info!(order_id = %order.id, total = %order.total, currency = %order.currency, "Order placed.");

  Ok(OrderOutcome {
    order,
    notifications: std::mem::take(&mut data.notifications),
  })
}
