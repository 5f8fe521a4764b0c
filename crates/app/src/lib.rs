//! # devices-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement
//!   (driven/outbound port): `DeviceRepository`
//! - Define the **driving/inbound** use-case service: `DeviceService` —
//!   create, get, list, update, delete
//! - Enforce the lifecycle rules from `devices-domain` before anything is
//!   written, so that a refused change never reaches the store
//!
//! ## Dependency rule
//! Depends on `devices-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
