//! HTTP route handlers.
//!
//! Thin plumbing around [`ShiftStore`]: each handler extracts the store
//! from shared state, calls one store or export operation, and maps the
//! error taxonomy onto status codes — validation failures to 422, restore
//! format failures to 400, encoder failures to 500.

use std::sync::Arc;

use chrono::Local;
use poem::http::{StatusCode, header};
use poem::web::{Data, Json, Multipart, Path, Query};
use poem::{IntoResponse, Response, handler};
use tracing::error;

use super::error::ShiftError;
use super::export::{write_csv, write_workbook};
use super::persist::parse_backup;
use super::store::ShiftStore;
use super::types::{
    CreateShiftRequest, DashboardResponse, ErrorResponse, ListShiftsQuery, RestoreResponse,
    ShiftListResponse,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(content_type: &str, filename: &str, body: impl Into<poem::Body>) -> Response {
    Response::builder()
        .content_type(content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        )
        .body(body.into())
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            errors: vec![message.into()],
        }),
    )
        .into_response()
}

/// List shifts, filtered and sorted by query parameters.
#[handler]
pub async fn list_shifts(
    Data(store): Data<&Arc<ShiftStore>>,
    Query(params): Query<ListShiftsQuery>,
) -> Json<ShiftListResponse> {
    let shifts = store.list(&params.role, params.sort_by, params.order);
    Json(ShiftListResponse {
        count: shifts.len(),
        shifts,
    })
}

/// Create a shift; 201 with the record, or 422 with the validation messages.
#[handler]
pub async fn create_shift(
    Data(store): Data<&Arc<ShiftStore>>,
    Json(request): Json<CreateShiftRequest>,
) -> Response {
    match store.add(
        &request.name,
        &request.role,
        &request.start_time,
        &request.end_time,
    ) {
        Ok(shift) => (StatusCode::CREATED, Json(shift)).into_response(),
        Err(ShiftError::Validation(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse { errors }),
        )
            .into_response(),
        Err(err) => {
            error!("Unexpected error creating shift: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Delete a shift by id; deleting an unknown id is a success.
#[handler]
pub async fn delete_shift(
    Data(store): Data<&Arc<ShiftStore>>,
    Path(id): Path<String>,
) -> StatusCode {
    store.remove(&id);
    StatusCode::NO_CONTENT
}

/// Dashboard statistics plus the distinct roles for filtering.
#[handler]
pub async fn dashboard(Data(store): Data<&Arc<ShiftStore>>) -> Json<DashboardResponse> {
    let now = Local::now().naive_local();
    Json(DashboardResponse {
        stats: store.stats(now),
        roles: store.roles(),
    })
}

/// Download the full store as `shifts.csv`.
#[handler]
pub async fn export_csv(Data(store): Data<&Arc<ShiftStore>>) -> Response {
    match write_csv(&store.all()) {
        Ok(body) => attachment("text/csv", "shifts.csv", body),
        Err(err) => {
            error!("Error exporting CSV: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Download the full store as `healthcare_shifts.xlsx`.
#[handler]
pub async fn export_xlsx(Data(store): Data<&Arc<ShiftStore>>) -> Response {
    match write_workbook(&store.all()) {
        Ok(bytes) => attachment(XLSX_CONTENT_TYPE, "healthcare_shifts.xlsx", bytes),
        Err(err) => {
            error!("Error exporting spreadsheet: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Download the full store as a JSON backup file.
#[handler]
pub async fn download_backup(Data(store): Data<&Arc<ShiftStore>>) -> Response {
    match serde_json::to_vec(&store.all()) {
        Ok(bytes) => attachment("application/json", "shifts_backup.json", bytes),
        Err(err) => {
            error!("Error creating backup: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Restore the store from an uploaded JSON backup.
///
/// Expects a multipart `file` field holding a `.json` file. The upload is
/// validated in full before the store is replaced; any format error leaves
/// the store unchanged.
#[handler]
pub async fn restore_backup(
    Data(store): Data<&Arc<ShiftStore>>,
    mut multipart: Multipart,
) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            return bad_request("No file selected");
        };
        if !file_name.ends_with(".json") {
            return bad_request("Only .json files are allowed");
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("Error reading restore upload: {err}");
                return bad_request("Could not read uploaded file");
            }
        };

        return match parse_backup(&bytes) {
            Ok(shifts) => {
                let restored = shifts.len();
                store.restore(shifts);
                Json(RestoreResponse {
                    restored,
                    message: format!("Successfully restored {restored} shifts from backup"),
                })
                .into_response()
            }
            Err(err) => bad_request(err.to_string()),
        };
    }

    bad_request("No file selected")
}
