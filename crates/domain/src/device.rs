//! Device — a managed piece of equipment with a name, a brand and a
//! lifecycle state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceHubError, ValidationError};
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// Lifecycle state of a [`Device`].
///
/// There is no ordering between states; any state may be replaced by any
/// other one. Only [`InUse`](Self::InUse) has an effect on what else may
/// change (see [`crate::lifecycle`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    Available,
    InUse,
    Inactive,
}

impl DeviceState {
    /// All states, in declaration order.
    pub const ALL: [Self; 3] = [Self::Available, Self::InUse, Self::Inactive];

    /// Whether name and brand are currently frozen.
    #[must_use]
    pub fn is_in_use(self) -> bool {
        matches!(self, Self::InUse)
    }

    /// Canonical token, as stored and serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "InUse",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = ValidationError;

    /// Parse a state token, ignoring ASCII case (`inuse`, `InUse`, `INUSE`…).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidState(s.to_string()))
    }
}

/// A managed device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
    pub created_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] when `name` or `brand` is blank.
    pub fn validate(&self) -> Result<(), DeviceHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.brand.trim().is_empty() {
            return Err(ValidationError::EmptyBrand.into());
        }
        Ok(())
    }

    /// Whether this device's brand equals `brand`, ignoring case.
    #[must_use]
    pub fn has_brand(&self, brand: &str) -> bool {
        brand_key(&self.brand) == brand_key(brand)
    }
}

/// Case-folded brand used for lookups, so that `Škoda`, `ŠKODA` and `škoda`
/// compare equal.
#[must_use]
pub fn brand_key(brand: &str) -> String {
    brand.to_lowercase()
}

/// Step-by-step builder for [`Device`].
///
/// `id` and `created_at` are generated when not provided, `state` defaults
/// to [`DeviceState::Available`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    brand: Option<String>,
    state: Option<DeviceState>,
    created_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if `name` or `brand` is missing
    /// or blank.
    pub fn build(self) -> Result<Device, DeviceHubError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            state: self.state.unwrap_or(DeviceState::Available),
            created_at: self.created_at.unwrap_or_else(now),
        };
        device.validate()?;
        Ok(device)
    }
}

/// A partial update: `None` leaves the field untouched.
///
/// `Some(String::new())` is a present value and is applied as such; the
/// resulting device will then fail [`Device::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<DeviceState>,
}

impl DeviceChanges {
    /// Whether the request carries no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.brand.is_none() && self.state.is_none()
    }

    /// Write the present fields onto `device`.
    ///
    /// `id` and `created_at` are never modified.
    pub fn apply_to(self, device: &mut Device) {
        if let Some(name) = self.name {
            device.name = name;
        }
        if let Some(brand) = self.brand {
            device.brand = brand;
        }
        if let Some(state) = self.state {
            device.state = state;
        }
    }
}
