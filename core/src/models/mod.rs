// matchday/src/models/mod.rs

//! Typed records exchanged with the content store and the HTTP layer.

pub mod booking;
pub mod cart_item;
pub mod fixture;
pub mod order;

pub use booking::{Booking, BookingStatus};
pub use cart_item::CartItem;
pub use fixture::Fixture;
pub use order::{Customer, Order, OrderLine};
