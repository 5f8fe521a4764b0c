//! OpenAPI document for the devices API, served at `/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

/// Generated OpenAPI description of every `/api/devices` route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Devices API",
        version = "v1",
        description = "Device management. Devices in use keep their name and brand \
                       and cannot be deleted."
    ),
    paths(
        crate::api::devices::list,
        crate::api::devices::create,
        crate::api::devices::get,
        crate::api::devices::update,
        crate::api::devices::delete,
        crate::api::devices::list_by_brand,
        crate::api::devices::list_by_state,
    ),
    components(schemas(
        crate::api::devices::CreateDeviceRequest,
        crate::api::devices::UpdateDeviceRequest,
        crate::api::devices::DeviceResponse,
        crate::error::ErrorBody,
    )),
    tags((name = "devices", description = "Device lifecycle management"))
)]
pub struct ApiDoc;

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
