// matchday/src/validation.rs

//! Request validation for the booking and checkout payloads.
//!
//! Payloads arrive as loose JSON. Every field is checked and every problem is
//! collected, so a client gets the full list of failing fields in one response.

use crate::models::{CartItem, Customer};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_TICKETS_PER_BOOKING: u64 = 100;
pub const MAX_CART_ITEMS: usize = 50;
pub const MAX_ITEM_QUANTITY: u64 = 100;
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_ID_LEN: usize = 200;
/// Upper bound for any submitted money amount; keeps line and order totals
/// well inside `Decimal` range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
pub const DEFAULT_COUNTRY: &str = "Bhutan";

static EMAIL_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[^\s@<>]+@[^\s@<>]+\.[^\s@<>]+$").expect("email pattern compiles"));

/// One failing field. `field` is a dotted path such as `items.2.price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

/// A booking request that passed validation. Strings are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
  pub match_id: String,
  pub name: String,
  pub email: String,
  pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
  pub customer: Customer,
  pub items: Vec<CartItem>,
  pub subtotal: Decimal,
  pub currency: String,
}

/// Collects errors while reading fields out of a JSON object.
struct Fields<'a> {
  obj: Option<&'a Map<String, Value>>,
  prefix: String,
  errors: &'a mut Vec<FieldError>,
}

impl<'a> Fields<'a> {
  fn new(value: Option<&'a Value>, prefix: &str, errors: &'a mut Vec<FieldError>) -> Self {
    let obj = value.and_then(Value::as_object);
    if obj.is_none() {
      let field = if prefix.is_empty() { "body".to_string() } else { prefix.to_string() };
      errors.push(FieldError {
        field,
        message: "Expected an object".to_string(),
      });
    }
    Self {
      obj,
      prefix: prefix.to_string(),
      errors,
    }
  }

  fn path(&self, key: &str) -> String {
    if self.prefix.is_empty() {
      key.to_string()
    } else {
      format!("{}.{}", self.prefix, key)
    }
  }

  fn fail(&mut self, key: &str, message: impl Into<String>) {
    let field = self.path(key);
    self.errors.push(FieldError {
      field,
      message: message.into(),
    });
  }

  fn get(&self, key: &str) -> Option<&'a Value> {
    self.obj.and_then(|o| o.get(key)).filter(|v| !v.is_null())
  }

  /// Trimmed string with a length in `min..=max` characters.
  fn string(&mut self, key: &str, min: usize, max: usize) -> Option<String> {
    if self.obj.is_none() {
      return None;
    }
    match self.get(key) {
      None => {
        self.fail(key, "Required");
        None
      }
      Some(Value::String(s)) => {
        let trimmed = s.trim();
        let len = trimmed.chars().count();
        if len < min {
          self.fail(key, if min == 1 { "Required".to_string() } else { format!("Must be at least {} characters", min) });
          None
        } else if len > max {
          self.fail(key, format!("Must be at most {} characters", max));
          None
        } else {
          Some(trimmed.to_string())
        }
      }
      Some(_) => {
        self.fail(key, "Expected a string");
        None
      }
    }
  }

  /// Absent or null yields `Some(default)`; present values follow `string`.
  fn optional_string(&mut self, key: &str, max: usize, default: &str) -> Option<String> {
    match self.get(key) {
      None => Some(default.to_string()),
      Some(Value::String(s)) if s.trim().is_empty() => Some(default.to_string()),
      Some(_) => self.string(key, 0, max),
    }
  }

  fn optional_nonempty(&mut self, key: &str, max: usize) -> Option<Option<String>> {
    match self.get(key) {
      None => Some(None),
      Some(Value::String(s)) if s.trim().is_empty() => Some(None),
      Some(_) => self.string(key, 1, max).map(Some),
    }
  }

  fn email(&mut self, key: &str) -> Option<String> {
    let email = self.string(key, 1, MAX_EMAIL_LEN)?;
    if EMAIL_RE.is_match(&email) {
      Some(email)
    } else {
      self.fail(key, "Invalid email address");
      None
    }
  }

  /// Whole number in `min..=max`. `2.0` counts as whole; `2.5` does not.
  fn integer(&mut self, key: &str, min: u64, max: u64) -> Option<u32> {
    if self.obj.is_none() {
      return None;
    }
    let Some(value) = self.get(key) else {
      self.fail(key, "Required");
      return None;
    };
    let Some(number) = value.as_f64() else {
      self.fail(key, "Expected a number");
      return None;
    };
    if number.fract() != 0.0 {
      self.fail(key, "Must be a whole number");
      return None;
    }
    if number < min as f64 {
      self.fail(key, format!("Must be at least {}", min));
      return None;
    }
    if number > max as f64 {
      self.fail(key, format!("Must be at most {}", max));
      return None;
    }
    match u32::try_from(number as u64) {
      Ok(n) => Some(n),
      Err(_) => {
        self.fail(key, "Out of range");
        None
      }
    }
  }

  fn decimal(&mut self, key: &str, positive: bool) -> Option<Decimal> {
    if self.obj.is_none() {
      return None;
    }
    let Some(value) = self.get(key) else {
      self.fail(key, "Required");
      return None;
    };
    let parsed = match value {
      Value::Number(n) => {
        let text = n.to_string();
        Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)).ok()
      }
      _ => None,
    };
    let Some(amount) = parsed else {
      self.fail(key, "Expected a number");
      return None;
    };
    if positive && amount <= Decimal::ZERO {
      self.fail(key, "Must be greater than 0");
      None
    } else if amount < Decimal::ZERO {
      self.fail(key, "Must not be negative");
      None
    } else if amount > Decimal::from(MAX_AMOUNT) {
      self.fail(key, format!("Must be at most {}", MAX_AMOUNT));
      None
    } else {
      Some(amount)
    }
  }

  fn optional_decimal(&mut self, key: &str) -> Option<Option<Decimal>> {
    match self.get(key) {
      None => Some(None),
      Some(_) => self.decimal(key, true).map(Some),
    }
  }

  fn currency(&mut self, key: &str) -> Option<String> {
    let code = self.string(key, 1, 3)?;
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
      Some(code.to_ascii_uppercase())
    } else {
      self.fail(key, "Must be a 3-letter currency code");
      None
    }
  }
}

pub fn validate_booking(body: &Value) -> Result<BookingRequest, Vec<FieldError>> {
  let mut errors = Vec::new();
  let mut fields = Fields::new(Some(body), "", &mut errors);

  let match_id = fields.string("matchId", 1, MAX_ID_LEN);
  let name = fields.string("name", 1, MAX_NAME_LEN);
  let email = fields.email("email");
  let quantity = fields.integer("quantity", 1, MAX_TICKETS_PER_BOOKING);

  match (match_id, name, email, quantity) {
    (Some(match_id), Some(name), Some(email), Some(quantity)) if errors.is_empty() => Ok(BookingRequest {
      match_id,
      name,
      email,
      quantity,
    }),
    _ => Err(errors),
  }
}

fn validate_customer(value: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<Customer> {
  let mut fields = Fields::new(value, "customer", errors);

  let name = fields.string("name", 1, MAX_NAME_LEN);
  let email = fields.email("email");
  let phone = fields.string("phone", 1, 30);
  let address = fields.string("address", 1, 200);
  let city = fields.string("city", 1, 100);
  let state = fields.optional_string("state", 100, "");
  let zip = fields.optional_string("zip", 20, "");
  let country = fields.optional_string("country", 100, DEFAULT_COUNTRY);
  let notes = fields.optional_string("notes", MAX_NOTES_LEN, "");

  Some(Customer {
    name: name?,
    email: email?,
    phone: phone?,
    address: address?,
    city: city?,
    state: state?,
    zip: zip?,
    country: country?,
    notes: notes?,
  })
}

fn validate_item(value: &Value, index: usize, errors: &mut Vec<FieldError>) -> Option<CartItem> {
  let prefix = format!("items.{}", index);
  let mut fields = Fields::new(Some(value), &prefix, errors);

  let product_id = fields.string("productId", 1, MAX_ID_LEN);
  let name = fields.string("name", 1, 200);
  let size = fields.optional_nonempty("size", 20);
  let quantity = fields.integer("quantity", 1, MAX_ITEM_QUANTITY);
  let price = fields.decimal("price", true);
  let sale_price = fields.optional_decimal("salePrice");
  let currency = fields.currency("currency");

  Some(CartItem {
    product_id: product_id?,
    name: name?,
    size: size?,
    quantity: quantity?,
    price: price?,
    sale_price: sale_price?,
    currency: currency?,
  })
}

pub fn validate_checkout(body: &Value) -> Result<CheckoutRequest, Vec<FieldError>> {
  let mut errors = Vec::new();

  if !body.is_object() {
    return Err(vec![FieldError {
      field: "body".to_string(),
      message: "Expected an object".to_string(),
    }]);
  }

  let customer = validate_customer(body.get("customer"), &mut errors);

  let items = match body.get("items") {
    Some(Value::Array(raw_items)) if raw_items.is_empty() => {
      errors.push(FieldError {
        field: "items".to_string(),
        message: "Cart is empty".to_string(),
      });
      None
    }
    Some(Value::Array(raw_items)) if raw_items.len() > MAX_CART_ITEMS => {
      errors.push(FieldError {
        field: "items".to_string(),
        message: format!("At most {} items per order", MAX_CART_ITEMS),
      });
      None
    }
    Some(Value::Array(raw_items)) => raw_items
      .iter()
      .enumerate()
      .map(|(i, raw)| validate_item(raw, i, &mut errors))
      .collect::<Vec<_>>()
      .into_iter()
      .collect::<Option<Vec<_>>>(),
    Some(_) => {
      errors.push(FieldError {
        field: "items".to_string(),
        message: "Expected an array".to_string(),
      });
      None
    }
    None => {
      errors.push(FieldError {
        field: "items".to_string(),
        message: "Required".to_string(),
      });
      None
    }
  };

  let mut top = Fields::new(Some(body), "", &mut errors);
  let subtotal = top.decimal("subtotal", false);
  let currency = top.currency("currency");

  match (customer, items, subtotal, currency) {
    (Some(customer), Some(items), Some(subtotal), Some(currency)) if errors.is_empty() => Ok(CheckoutRequest {
      customer,
      items,
      subtotal,
      currency,
    }),
    _ => Err(errors),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn fields_of(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
  }

  #[test]
  fn accepts_a_well_formed_booking_and_trims_strings() {
    let req = validate_booking(&json!({
      "matchId": "m1", "name": "  Pema Lhamo ", "email": "pema@example.com", "quantity": 2
    }))
    .unwrap();
    assert_eq!(req.name, "Pema Lhamo");
    assert_eq!(req.quantity, 2);
  }

  #[test]
  fn reports_every_failing_booking_field() {
    let errors = validate_booking(&json!({
      "matchId": "", "name": "x".repeat(101), "email": "not-an-email", "quantity": 0
    }))
    .unwrap_err();
    assert_eq!(fields_of(&errors), vec!["matchId", "name", "email", "quantity"]);
  }

  #[test]
  fn quantity_must_be_a_whole_number_within_bounds() {
    let base = |q: Value| json!({"matchId": "m1", "name": "A", "email": "a@b.co", "quantity": q});
    assert!(validate_booking(&base(json!(2.0))).is_ok());
    assert!(validate_booking(&base(json!(2.5))).is_err());
    assert!(validate_booking(&base(json!(101))).is_err());
    assert!(validate_booking(&base(json!(-1))).is_err());
    assert!(validate_booking(&base(json!("2"))).is_err());
  }

  #[test]
  fn non_object_body_is_rejected() {
    let errors = validate_booking(&json!([1, 2])).unwrap_err();
    assert_eq!(fields_of(&errors), vec!["body"]);
  }

  fn checkout_body(items: Value) -> Value {
    json!({
      "customer": {
        "name": "Sonam", "email": "sonam@example.com", "phone": "+975 17 000000",
        "address": "Norzin Lam", "city": "Thimphu"
      },
      "items": items,
      "subtotal": 1000,
      "currency": "BTN"
    })
  }

  fn item() -> Value {
    json!({"productId": "jersey-home", "name": "Home Jersey", "size": "M", "quantity": 1, "price": 1000, "currency": "BTN"})
  }

  #[test]
  fn checkout_applies_optional_defaults() {
    let req = validate_checkout(&checkout_body(json!([item()]))).unwrap();
    assert_eq!(req.customer.country, DEFAULT_COUNTRY);
    assert_eq!(req.customer.notes, "");
    assert_eq!(req.items[0].size.as_deref(), Some("M"));
    assert_eq!(req.subtotal, Decimal::from(1000));
  }

  #[test]
  fn checkout_rejects_empty_and_oversized_carts() {
    let errors = validate_checkout(&checkout_body(json!([]))).unwrap_err();
    assert_eq!(fields_of(&errors), vec!["items"]);

    let many: Vec<Value> = (0..51).map(|_| item()).collect();
    let errors = validate_checkout(&checkout_body(Value::Array(many))).unwrap_err();
    assert_eq!(fields_of(&errors), vec!["items"]);
  }

  #[test]
  fn checkout_reports_nested_item_paths() {
    let mut bad = item();
    bad["price"] = json!(0);
    bad["currency"] = json!("NU");
    let errors = validate_checkout(&checkout_body(json!([item(), bad]))).unwrap_err();
    assert_eq!(fields_of(&errors), vec!["items.1.price", "items.1.currency"]);
  }

  #[test]
  fn checkout_rejects_amounts_beyond_the_money_bound() {
    let mut huge = item();
    huge["quantity"] = json!(2);
    huge["price"] = json!(7.9e28);
    huge["salePrice"] = json!(1e13);
    let mut body = checkout_body(json!([huge]));
    body["subtotal"] = json!(1.58e29);
    let errors = validate_checkout(&body).unwrap_err();
    assert_eq!(fields_of(&errors), vec!["items.0.price", "items.0.salePrice", "subtotal"]);

    let mut edge = item();
    edge["price"] = json!(MAX_AMOUNT);
    assert!(validate_checkout(&checkout_body(json!([edge]))).is_ok());
  }

  #[test]
  fn checkout_requires_customer_contact_fields() {
    let mut body = checkout_body(json!([item()]));
    body["customer"] = json!({"name": "Sonam"});
    let errors = validate_checkout(&body).unwrap_err();
    assert_eq!(
      fields_of(&errors),
      vec!["customer.email", "customer.phone", "customer.address", "customer.city"]
    );
  }
}
