// matchday/src/lib.rs

//! Matchday: ticket booking, shop checkout and fixture calendars for a
//! football club website.
//!
//! Booking and checkout each run as a pipeline of named async steps on a small
//! engine ([`Pipeline`], [`Registry`]):
//!  - required steps end the request on failure,
//!  - optional steps (email notifications) record a [`SoftFailure`] and let the
//!    request succeed,
//!  - all I/O goes through the [`ContentStore`] and [`Mailer`] traits held in
//!    [`Collaborators`].

pub mod booking;
pub mod calendar;
pub mod checkout;
pub mod club;
pub mod collaborators;
pub mod error;
pub mod ids;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod registry;
pub mod sanitize;
pub mod store;
pub mod validation;

pub use crate::booking::{BookingOutcome, InventoryUpdate};
pub use crate::calendar::{calendar_links, generate_ics, CalendarLinks, CalendarOptions};
pub use crate::checkout::OrderOutcome;
pub use crate::club::Club;
pub use crate::collaborators::Collaborators;
pub use crate::error::{PipelineError, ServiceError, ServiceResult};
pub use crate::models::{Booking, BookingStatus, CartItem, Customer, Fixture, Order, OrderLine};
pub use crate::notify::{DeliveryStatus, EmailMessage, LogMailer, MailError, Mailer, NotificationReport, NotifySettings};
pub use crate::pipeline::{
  ContextData, Pipeline, PipelineControl, PipelineReport, PipelineResult, SkipCondition, SoftFailure, StepDef,
};
pub use crate::registry::Registry;
pub use crate::store::{ContentStore, MemoryStore, Reservation, StoreError, StoredDocument};
pub use crate::validation::FieldError;
