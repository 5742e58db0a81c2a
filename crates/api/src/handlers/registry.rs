use axum::extract::State;
use axum::Json;
use heroes_core::registry::ModelAdmin;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/registry
///
/// Every registered entity admin, in registration order.
pub async fn list_models(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<&'static [ModelAdmin]>>> {
    Ok(Json(DataResponse {
        data: state.registry.models(),
    }))
}
