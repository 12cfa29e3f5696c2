// matchday/src/checkout/pipeline.rs

use crate::checkout::{steps, CheckoutCtxData};
use crate::error::{PipelineError, ServiceError, ServiceResult};
use crate::ids::new_order_id;
use crate::models::{Order, OrderLine};
use crate::notify::{templates, DeliveryStatus};
use crate::pipeline::{ContextData, Pipeline, PipelineControl};
use crate::registry::Registry;
use crate::validation::validate_checkout;
use chrono::Utc;
use tracing::{info, warn};

type Ctx = ContextData<CheckoutCtxData>;

pub fn register_checkout_pipeline(registry: &Registry<ServiceError>) -> Result<(), PipelineError> {
  let mut p = Pipeline::<CheckoutCtxData, ServiceError>::new(&[
    (steps::VALIDATE_REQUEST, false, None),
    (steps::PRICE_ORDER, false, None),
    (steps::NOTIFY_CUSTOMER, true, None),
    (steps::NOTIFY_ADMIN, true, None),
  ]);

  p.on_root(steps::VALIDATE_REQUEST, |ctx: Ctx| async move {
    let parsed = ctx.with(|d| validate_checkout(&d.payload));
    match parsed {
      Ok(request) => {
        ctx.write().request = Some(request);
        Ok(PipelineControl::Continue)
      }
      Err(errors) => {
        info!(fields = errors.len(), "Checkout request failed validation.");
        Err(ServiceError::Validation(errors))
      }
    }
  })?;

  p.on_root(steps::PRICE_ORDER, |ctx: Ctx| async move {
    let (request, shipping_fee) = ctx.with(|d| (d.request.clone(), d.collaborators.shipping_fee));
    let request = request.ok_or_else(|| ServiceError::Internal("checkout request missing from context".to_string()))?;

    let total = request
      .subtotal
      .checked_add(shipping_fee)
      .ok_or_else(|| ServiceError::Rule("Order total is too large".to_string()))?;

    let order = Order {
      id: new_order_id(),
      items: request.items.iter().map(OrderLine::from).collect(),
      total,
      subtotal: request.subtotal,
      shipping_fee,
      currency: request.currency,
      customer: request.customer,
      created_at: Utc::now(),
    };

    let lines_total = order.lines_total();
    if lines_total != order.subtotal {
      warn!(
        order_id = %order.id,
        submitted = %order.subtotal,
        computed = %lines_total,
        "Submitted subtotal differs from the cart lines; using the submitted value."
      );
    }

    info!(order_id = %order.id, items = order.item_count(), total = %order.total, "Order priced.");
    ctx.write().order = Some(order);
    Ok::<_, ServiceError>(PipelineControl::Continue)
  })?;

  p.on_root(steps::NOTIFY_CUSTOMER, |ctx: Ctx| async move {
    let (collab, order) = ctx.with(|d| (d.collaborators.clone(), d.order.clone()));
    let order = order.ok_or_else(|| ServiceError::Internal("nothing to notify about".to_string()))?;

    let message = templates::order_confirmation(&collab.notify, &order);
    let result = collab.mailer.send(&message).await;
    ctx.write().notifications.customer = DeliveryStatus::from_send(&result, collab.mailer.delivers());
    result?;
    Ok::<_, ServiceError>(PipelineControl::Continue)
  })?;

  p.on_root(steps::NOTIFY_ADMIN, |ctx: Ctx| async move {
    let (collab, order) = ctx.with(|d| (d.collaborators.clone(), d.order.clone()));
    let order = order.ok_or_else(|| ServiceError::Internal("nothing to notify about".to_string()))?;

    let message = templates::order_admin_alert(&collab.notify, &order);
    let result = collab.mailer.send(&message).await;
    ctx.write().notifications.admin = DeliveryStatus::from_send(&result, collab.mailer.delivers());
    result?;
    Ok::<_, ServiceError>(PipelineControl::Continue)
  })?;

  registry.register_pipeline(p);
  info!("Checkout pipeline registered.");
  Ok(())
}

