// tests/checkout_tests.rs
mod common;

use common::*;
use matchday::{Club, Collaborators, DeliveryStatus, MemoryStore, ServiceError};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use serial_test::serial;
use std::sync::Arc;

fn customer() -> Value {
  json!({
    "name": "Karma Wangchuk",
    "email": "karma@example.com",
    "phone": "+975 17 123 456",
    "address": "Norzin Lam 12",
    "city": "Thimphu"
  })
}

fn jersey(quantity: u32) -> Value {
  json!({
    "productId": "jersey-home",
    "name": "Home Jersey",
    "size": "M",
    "quantity": quantity,
    "price": 600,
    "salePrice": 500,
    "currency": "BTN"
  })
}

fn checkout_body(items: Vec<Value>, subtotal: i64) -> Value {
  json!({ "customer": customer(), "items": items, "subtotal": subtotal, "currency": "BTN" })
}

fn club_with(mailer: Arc<RecordingMailer>) -> matchday::Club {
  build_club(Arc::new(MemoryStore::new()), mailer)
}

#[tokio::test]
#[serial]
async fn test_checkout_adds_shipping_to_subtotal() {
  setup_tracing();
  let mailer = Arc::new(RecordingMailer::default());
  let club = club_with(mailer.clone());

  let outcome = club.place_order(checkout_body(vec![jersey(2)], 1000)).await.unwrap();

  assert_eq!(outcome.order.subtotal, Decimal::from(1000));
  assert_eq!(outcome.order.shipping_fee, Decimal::from(150));
  assert_eq!(outcome.order.total, Decimal::from(1150));
  assert!(Regex::new(r"^ORD-[0-9A-Z]+-[0-9A-Z]{4}$").unwrap().is_match(&outcome.order.id));

  let customer_mail = mailer.message_to("karma@example.com").unwrap();
  assert!(customer_mail.html.contains("1150"));
  let admin_mail = mailer.message_to("admin@club.test").unwrap();
  assert!(admin_mail.html.contains("1150"));
  assert!(matches!(outcome.notifications.customer, DeliveryStatus::Sent { .. }));
}

#[tokio::test]
#[serial]
async fn test_total_ignores_item_count() {
  setup_tracing();
  let club = club_with(Arc::new(RecordingMailer::default()));

  let outcome = club
    .place_order(checkout_body(vec![jersey(1), jersey(1), jersey(3)], 1000))
    .await
    .unwrap();
  assert_eq!(outcome.order.total, Decimal::from(1150));
  assert_eq!(outcome.order.item_count(), 5);
}

#[tokio::test]
#[serial]
async fn test_checkout_applies_defaults() {
  setup_tracing();
  let club = club_with(Arc::new(RecordingMailer::default()));

  let outcome = club.place_order(checkout_body(vec![jersey(1)], 500)).await.unwrap();
  let c = &outcome.order.customer;
  assert_eq!(c.country, "Bhutan");
  assert_eq!(c.state, "");
  assert_eq!(c.zip, "");
  assert_eq!(c.notes, "");
  assert_eq!(outcome.order.items[0].unit_price, Decimal::from(500));
}

#[tokio::test]
#[serial]
async fn test_empty_cart_is_rejected() {
  setup_tracing();
  let club = club_with(Arc::new(RecordingMailer::default()));

  let err = club.place_order(checkout_body(vec![], 0)).await.unwrap_err();
  let ServiceError::Validation(errors) = err else {
    panic!("expected validation error");
  };
  assert!(errors.iter().any(|e| e.field == "items" && e.message == "Cart is empty"));
}

#[tokio::test]
#[serial]
async fn test_more_than_fifty_items_is_rejected() {
  setup_tracing();
  let club = club_with(Arc::new(RecordingMailer::default()));

  let items = (0..51).map(|_| jersey(1)).collect();
  let err = club.place_order(checkout_body(items, 25500)).await.unwrap_err();
  let ServiceError::Validation(errors) = err else {
    panic!("expected validation error");
  };
  assert!(errors.iter().any(|e| e.field == "items"));
}

#[tokio::test]
#[serial]
async fn test_item_errors_carry_their_index() {
  setup_tracing();
  let club = club_with(Arc::new(RecordingMailer::default()));

  let mut bad = jersey(1);
  bad["price"] = json!(-5);
  bad["currency"] = json!("NU");
  let err = club.place_order(checkout_body(vec![jersey(1), bad], 500)).await.unwrap_err();
  let ServiceError::Validation(errors) = err else {
    panic!("expected validation error");
  };
  let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
  assert!(fields.contains(&"items.1.price"), "{fields:?}");
  assert!(fields.contains(&"items.1.currency"), "{fields:?}");
}

#[tokio::test]
#[serial]
async fn test_customer_markup_is_stripped_from_order_emails() {
  setup_tracing();
  let mailer = Arc::new(RecordingMailer::default());
  let club = club_with(mailer.clone());

  let mut body = checkout_body(vec![jersey(1)], 500);
  body["customer"]["name"] = json!("<script>alert(1)</script>Karma");
  body["customer"]["notes"] = json!("<img src=x onerror=alert(2)>leave at gate");
  club.place_order(body).await.unwrap();

  let messages = mailer.messages();
  assert_eq!(messages.len(), 2);
  for message in messages {
    assert!(!message.html.contains("<script"));
    assert!(!message.html.contains("<img"));
    assert!(!message.html.contains("alert("));
  }
  assert!(mailer.message_to("admin@club.test").unwrap().html.contains("leave at gate"));
}

#[tokio::test]
#[serial]
async fn test_email_failure_does_not_fail_checkout() {
  setup_tracing();
  let club = build_club(Arc::new(MemoryStore::new()), Arc::new(FailingMailer));

  let outcome = club.place_order(checkout_body(vec![jersey(2)], 1000)).await.unwrap();
  assert!(outcome.notifications.customer.is_failed());
  assert!(outcome.notifications.admin.is_failed());
  assert_eq!(outcome.order.total, Decimal::from(1150));
}

#[tokio::test]
#[serial]
async fn test_huge_prices_are_rejected_as_field_errors() {
  setup_tracing();
  let mailer = Arc::new(RecordingMailer::default());
  let club = club_with(mailer.clone());

  let mut item = jersey(2);
  item["price"] = json!(7.9e28);
  item.as_object_mut().unwrap().remove("salePrice");
  let err = club.place_order(checkout_body(vec![item], 1000)).await.unwrap_err();
  let ServiceError::Validation(errors) = err else {
    panic!("expected validation error");
  };
  assert!(errors.iter().any(|e| e.field == "items.0.price"), "{errors:?}");
  assert!(mailer.messages().is_empty());
}

#[tokio::test]
#[serial]
async fn test_total_overflow_is_a_rule_error() {
  setup_tracing();
  let collaborators = Collaborators::new(Arc::new(MemoryStore::new()), notify_settings())
    .with_mailer(Arc::new(RecordingMailer::default()))
    .with_shipping_fee(Decimal::MAX);
  let club = Club::new(collaborators).unwrap();

  let err = club.place_order(checkout_body(vec![jersey(2)], 1000)).await.unwrap_err();
  assert!(matches!(err, ServiceError::Rule(ref m) if m == "Order total is too large"), "{err:?}");
}
