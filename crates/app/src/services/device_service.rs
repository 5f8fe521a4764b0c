//! Device service — use-cases for managing devices.

use devices_domain::device::{Device, DeviceChanges, DeviceState};
use devices_domain::error::{DeviceHubError, NotFoundError};
use devices_domain::id::DeviceId;
use devices_domain::lifecycle::{self, RuleViolation};

use crate::ports::DeviceRepository;

/// Data supplied by a caller to register a device.
///
/// `state` is the raw token received from the outside world; it is parsed
/// case-insensitively by [`DeviceService::create_device`].
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub name: String,
    pub brand: String,
    pub state: String,
}

/// Partial update supplied by a caller. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

impl DevicePatch {
    fn into_changes(self) -> Result<DeviceChanges, DeviceHubError> {
        let state = self
            .state
            .as_deref()
            .map(str::parse::<DeviceState>)
            .transpose()?;
        Ok(DeviceChanges {
            name: self.name,
            brand: self.brand,
            state,
        })
    }
}

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new device with a fresh id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if the state token is unknown
    /// or name/brand are blank, or a storage error propagated from the
    /// repository.
    #[tracing::instrument(
        skip(self, new),
        fields(device_name = %new.name, device_brand = %new.brand)
    )]
    pub async fn create_device(&self, new: NewDevice) -> Result<Device, DeviceHubError> {
        let state: DeviceState = new.state.parse()?;
        let device = Device::builder()
            .name(new.name)
            .brand(new.brand)
            .state(state)
            .build()?;
        let created = self.repo.create(device).await?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, DeviceHubError> {
        self.repo.get_all().await
    }

    /// List devices of the given brand, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices_by_brand(&self, brand: &str) -> Result<Vec<Device>, DeviceHubError> {
        self.repo.find_by_brand(brand).await
    }

    /// List devices currently in the state named by `state`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if `state` is not a known
    /// token, or a storage error propagated from the repository.
    pub async fn list_devices_by_state(&self, state: &str) -> Result<Vec<Device>, DeviceHubError> {
        let state: DeviceState = state.parse()?;
        self.repo.find_by_state(state).await
    }

    /// Apply a partial update to an existing device.
    ///
    /// Nothing is written unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::NotFound`] when no device with `id` exists,
    /// [`DeviceHubError::Validation`] for an unknown state token or a blank
    /// name/brand, [`DeviceHubError::RuleViolation`] when the device is in
    /// use and its name or brand would change, or a storage error from the
    /// repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, DeviceHubError> {
        let mut device = self.get_device(id).await?;
        let changes = patch.into_changes()?;
        if changes.is_empty() {
            tracing::debug!("empty patch, nothing to write");
            return Ok(device);
        }

        lifecycle::validate_update(&device, &changes).map_err(refused)?;

        changes.apply_to(&mut device);
        device.validate()?;
        self.repo.update(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::NotFound`] when no device with `id` exists,
    /// [`DeviceHubError::RuleViolation`] when the device is in use, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DeviceHubError> {
        let device = self.get_device(id).await?;

        lifecycle::validate_delete(&device).map_err(refused)?;

        self.repo.delete(id).await?;
        tracing::info!("device deleted");
        Ok(())
    }
}

fn refused(violation: RuleViolation) -> DeviceHubError {
    tracing::warn!(code = violation.code(), "{violation}");
    violation.into()
}
