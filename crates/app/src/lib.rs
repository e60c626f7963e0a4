//! # salonbook-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BarberRepository`, `OfferingRepository`: CRUD
//!   - `BookingRepository`: CRUD plus lookups by reference and barber
//!   - `ReferenceNamespace` / `CandidateSource`: the two capabilities the
//!     reference allocator is built from
//! - Allocate **booking references** (`ReferenceAllocator`)
//! - Define **driving/inbound ports** as use-case structs:
//!   - `BarberService`, `OfferingService`: register, list, get, update, delete
//!   - `BookingService`: create (allocating a reference), look up, change status
//!
//! ## Dependency rule
//! Depends on `salonbook-domain` only (plus `rand` for candidate draws).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod reference_allocator;
pub mod services;
