//! Storage port — repository trait for device persistence.

use std::future::Future;

use devices_domain::device::{Device, DeviceState};
use devices_domain::error::DeviceHubError;
use devices_domain::id::DeviceId;

/// Repository for persisting and querying [`Device`]s.
///
/// The repository owns the persisted records. It performs no lifecycle
/// checks: callers run the rules in `devices_domain::lifecycle` first.
/// Lists are returned in creation order.
pub trait DeviceRepository {
    /// Insert a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceHubError>> + Send;

    /// Get all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Get all devices whose brand matches `brand`, ignoring case.
    fn find_by_brand(
        &self,
        brand: &str,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Get all devices currently in `state`.
    fn find_by_state(
        &self,
        state: DeviceState,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Replace the stored record that has the same id.
    ///
    /// Fails with [`DeviceHubError::NotFound`] when no such record exists.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send;

    /// Remove a device by its unique identifier.
    ///
    /// Fails with [`DeviceHubError::NotFound`] when no such record exists.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DeviceHubError>> + Send;
}
