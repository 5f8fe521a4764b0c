//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use devices_app::ports::DeviceRepository;
use devices_app::services::device_service::{DevicePatch, NewDevice};
use devices_domain::device::Device;
use devices_domain::error::ValidationError;
use devices_domain::id::DeviceId;
use devices_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize, ToSchema)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub brand: String,
    /// `Available`, `InUse` or `Inactive`, case-insensitive.
    #[schema(example = "Available")]
    pub state: String,
}

impl From<CreateDeviceRequest> for NewDevice {
    fn from(req: CreateDeviceRequest) -> Self {
        Self {
            name: req.name,
            brand: req.brand,
            state: req.state,
        }
    }
}

/// Request body for updating a device. Absent or `null` fields are left
/// unchanged.
#[derive(Deserialize, ToSchema)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

impl From<UpdateDeviceRequest> for DevicePatch {
    fn from(req: UpdateDeviceRequest) -> Self {
        Self {
            name: req.name,
            brand: req.brand,
            state: req.state,
        }
    }
}

/// Device as exposed over HTTP.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceResponse {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[schema(example = "InUse")]
    pub state: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id.to_string(),
            name: device.name,
            brand: device.brand,
            state: device.state.to_string(),
            created_at: device.created_at,
        }
    }
}

fn many(devices: Vec<Device>) -> Json<Vec<DeviceResponse>> {
    Json(devices.into_iter().map(DeviceResponse::from).collect())
}

fn parse_id(id: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(id).map_err(|_| ApiError::from(ValidationError::InvalidId(id.to_string())))
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<DeviceResponse>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<DeviceResponse>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    /// 201 with a `Location` header pointing at the new device.
    Created(Json<DeviceResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => {
                let location = format!("/api/devices/{}", json.id);
                (StatusCode::CREATED, [(header::LOCATION, location)], json).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
#[utoipa::path(
    get,
    path = "/api/devices",
    responses(
        (status = 200, description = "All devices in creation order", body = [DeviceResponse]),
    ),
    tag = "devices"
)]
pub async fn list<DR>(State(state): State<AppState<DR>>) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(many(devices)))
}

/// `GET /api/devices/brand/:brand`
#[utoipa::path(
    get,
    path = "/api/devices/brand/{brand}",
    params(("brand" = String, Path, description = "Brand, matched ignoring case")),
    responses(
        (status = 200, description = "Devices of the brand", body = [DeviceResponse]),
    ),
    tag = "devices"
)]
pub async fn list_by_brand<DR>(
    State(state): State<AppState<DR>>,
    Path(brand): Path<String>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices_by_brand(&brand).await?;
    Ok(ListResponse::Ok(many(devices)))
}

/// `GET /api/devices/state/:state`
#[utoipa::path(
    get,
    path = "/api/devices/state/{state}",
    params(("state" = String, Path, description = "Lifecycle state, case-insensitive")),
    responses(
        (status = 200, description = "Devices in the state", body = [DeviceResponse]),
        (status = 400, description = "Unknown state", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub async fn list_by_state<DR>(
    State(state): State<AppState<DR>>,
    Path(device_state): Path<String>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let devices = state
        .device_service
        .list_devices_by_state(&device_state)
        .await?;
    Ok(ListResponse::Ok(many(devices)))
}

/// `GET /api/devices/:id`
#[utoipa::path(
    get,
    path = "/api/devices/{id}",
    params(("id" = String, Path, description = "Device id (UUID)")),
    responses(
        (status = 200, description = "Device found", body = DeviceResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device.into())))
}

/// `POST /api/devices`
#[utoipa::path(
    post,
    path = "/api/devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device created", body = DeviceResponse,
            headers(("Location" = String, description = "URI of the new device"))),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    body: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let created = state.device_service.create_device(req.into()).await?;
    Ok(CreateResponse::Created(Json(created.into())))
}

/// `PUT /api/devices/:id`
#[utoipa::path(
    put,
    path = "/api/devices/{id}",
    params(("id" = String, Path, description = "Device id (UUID)")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Device updated", body = DeviceResponse),
        (status = 400, description = "Invalid input or rule refusal",
            body = crate::error::ErrorBody),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(req) = body?;
    let updated = state
        .device_service
        .update_device(device_id, req.into())
        .await?;
    Ok(GetResponse::Ok(Json(updated.into())))
}

/// `DELETE /api/devices/:id`
#[utoipa::path(
    delete,
    path = "/api/devices/{id}",
    params(("id" = String, Path, description = "Device id (UUID)")),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 400, description = "Bad id or in use", body = crate::error::ErrorBody),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
