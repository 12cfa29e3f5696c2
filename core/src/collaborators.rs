// matchday/src/collaborators.rs

use crate::notify::{LogMailer, Mailer, NotifySettings};
use crate::store::ContentStore;
use rust_decimal::Decimal;
use std::sync::Arc;

pub const DEFAULT_SHIPPING_FEE: i64 = 150;

/// Everything a pipeline handler talks to outside the process. Built once at
/// startup and cloned into each request's context data.
#[derive(Clone)]
pub struct Collaborators {
  pub store: Arc<dyn ContentStore>,
  pub mailer: Arc<dyn Mailer>,
  pub notify: NotifySettings,
  pub shipping_fee: Decimal,
}

impl Collaborators {
  pub fn new(store: Arc<dyn ContentStore>, notify: NotifySettings) -> Self {
    Self {
      store,
      mailer: Arc::new(LogMailer),
      notify,
      shipping_fee: Decimal::from(DEFAULT_SHIPPING_FEE),
    }
  }

  pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
    self.mailer = mailer;
    self
  }

  pub fn with_shipping_fee(mut self, fee: Decimal) -> Self {
    self.shipping_fee = fee;
    self
  }
}

impl std::fmt::Debug for Collaborators {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Collaborators")
      .field("mail_delivery", &self.mailer.delivers())
      .field("notify", &self.notify)
      .field("shipping_fee", &self.shipping_fee)
      .finish_non_exhaustive()
  }
}
