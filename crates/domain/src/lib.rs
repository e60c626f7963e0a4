//! # salonbook-domain
//!
//! Pure domain model for the salonbook booking system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//!   and date normalization
//! - Define **Barbers** (staff customers book with)
//! - Define **Offerings** (the service menu: haircut, shave, …)
//! - Define **Bookings** and their status lifecycle
//! - Define the **booking reference**, the six-symbol code customers quote
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod reference;
pub mod time;

pub mod barber;
pub mod booking;
pub mod offering;
