// matchday/src/ids.rs

//! Human-typable references handed to customers: `TKT-<time>-<rand>` for
//! bookings and `ORD-<time>-<rand>` for orders. Independent of any store id.

use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

pub const BOOKING_PREFIX: &str = "TKT";
pub const ORDER_PREFIX: &str = "ORD";

fn to_base36(mut n: u64) -> String {
  if n == 0 {
    return "0".to_string();
  }
  let mut digits = Vec::new();
  while n > 0 {
    digits.push(BASE36[(n % 36) as usize]);
    n /= 36;
  }
  digits.reverse();
  String::from_utf8_lossy(&digits).into_owned()
}

fn random_suffix(rng: &mut impl Rng) -> String {
  (0..SUFFIX_LEN)
    .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
    .collect()
}

/// `<prefix>-<base36 epoch millis>-<4 random base36 chars>`.
pub fn reference_at(prefix: &str, now: DateTime<Utc>, rng: &mut impl Rng) -> String {
  let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
  format!("{}-{}-{}", prefix, to_base36(millis), random_suffix(rng))
}

pub fn new_booking_id() -> String {
  reference_at(BOOKING_PREFIX, Utc::now(), &mut rand::thread_rng())
}

pub fn new_order_id() -> String {
  reference_at(ORDER_PREFIX, Utc::now(), &mut rand::thread_rng())
}
