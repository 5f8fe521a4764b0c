//! # devices-domain
//!
//! Pure domain model for the devices management API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Device** record and its tri-state lifecycle
//!   (`Available`, `InUse`, `Inactive`)
//! - Define **partial updates** ([`device::DeviceChanges`])
//! - Contain the **lifecycle rules** that decide whether an update or a
//!   delete is allowed given the current state of a device
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod lifecycle;
