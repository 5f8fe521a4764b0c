//! Lifecycle rules — what may change on a device given its current state.
//!
//! While a device is [`InUse`](crate::device::DeviceState::InUse) its name and brand are
//! frozen and it cannot be deleted. The state itself may always be changed.
//! These functions only inspect their arguments; applying and persisting the
//! change is the caller's job.

use crate::device::{Device, DeviceChanges};

/// A change that the current lifecycle state forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("Name cannot be updated while device is in use.")]
    NameLocked,

    #[error("Brand cannot be updated while device is in use.")]
    BrandLocked,

    #[error("In-use devices cannot be deleted.")]
    InUseUndeletable,
}

impl RuleViolation {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NameLocked => "name-locked",
            Self::BrandLocked => "brand-locked",
            Self::InUseUndeletable => "in-use-undeletable",
        }
    }
}

/// Check whether `changes` may be applied to `current`.
///
/// Writing the value a field already holds is always allowed.
///
/// # Errors
///
/// Returns [`RuleViolation::NameLocked`] or [`RuleViolation::BrandLocked`]
/// when `current` is in use and the change would alter its name or brand.
/// Name is checked first.
pub fn validate_update(current: &Device, changes: &DeviceChanges) -> Result<(), RuleViolation> {
    if !current.state.is_in_use() {
        return Ok(());
    }
    if changes
        .name
        .as_deref()
        .is_some_and(|name| name != current.name)
    {
        return Err(RuleViolation::NameLocked);
    }
    if changes
        .brand
        .as_deref()
        .is_some_and(|brand| brand != current.brand)
    {
        return Err(RuleViolation::BrandLocked);
    }
    Ok(())
}

/// Check whether `current` may be removed.
///
/// # Errors
///
/// Returns [`RuleViolation::InUseUndeletable`] when `current` is in use.
pub fn validate_delete(current: &Device) -> Result<(), RuleViolation> {
    if current.state.is_in_use() {
        return Err(RuleViolation::InUseUndeletable);
    }
    Ok(())
}
