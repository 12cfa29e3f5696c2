// matchday_server/src/services/mod.rs

//! HTTP adapters for the external collaborators.

pub mod resend;
pub mod sanity;

pub use resend::ResendMailer;
pub use sanity::SanityStore;
