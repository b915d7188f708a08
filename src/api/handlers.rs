//! API request handlers
//!
//! Uploads are sent as the raw `.xlsx` request body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::ConvertError;
use crate::excel::{ExtractOptions, SheetSelector, TemplateExporter};
use crate::pipeline::Pipeline;
use crate::types::OutputRecord;

use super::server::AppState;

/// File name offered for the converted download
pub const CSV_FILE_NAME: &str = "converted_data.csv";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "AR Reformat API Server".to_string(),
        version: state.version.clone(),
        description: "Convert receivables listings (.xlsx) to debtor import CSV".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new(
                "POST",
                "/api/v1/convert",
                "Convert an uploaded .xlsx body to CSV (optional ?sheet=NAME)",
            ),
            EndpointInfo::new(
                "POST",
                "/api/v1/preview",
                "Convert an uploaded .xlsx body and return the rows as JSON",
            ),
            EndpointInfo::new(
                "GET",
                "/api/v1/template",
                "Download an empty workbook in the accepted layout",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "convert".to_string(),
            "preview".to_string(),
            "template".to_string(),
        ],
    }))
}

/// Query parameters shared by the upload endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ConvertParams {
    /// Worksheet to read; the first sheet when absent
    pub sheet: Option<String>,
}

impl ConvertParams {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            sheet: SheetSelector::from_name(self.sheet.clone()),
        }
    }
}

/// Preview response
#[derive(Serialize, Default)]
pub struct PreviewResponse {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub record_count: usize,
    pub records: Vec<OutputRecord>,
}

/// POST /api/v1/convert - Upload → CSV download
pub async fn convert(Query(params): Query<ConvertParams>, body: Bytes) -> Response {
    let pipeline = Pipeline::new(params.extract_options());

    match pipeline.convert_to_csv(&body) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/v1/preview - Upload → converted rows as JSON
pub async fn preview(Query(params): Query<ConvertParams>, body: Bytes) -> Response {
    let pipeline = Pipeline::new(params.extract_options());

    match pipeline.run(&body) {
        Ok(conversion) => Json(ApiResponse::ok(PreviewResponse {
            rows_read: conversion.rows_read,
            rows_dropped: conversion.rows_dropped,
            record_count: conversion.records.len(),
            records: conversion.records,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/template - Empty listing workbook
pub async fn template() -> Response {
    match TemplateExporter::new().to_buffer() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"receivables_template.xlsx\"".to_string(),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Layout problems are the uploader's to fix (422); anything else is ours (500)
fn error_response(err: ConvertError) -> Response {
    let status = if err.is_parse() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(%status, error = %err, "conversion failed");

    let body: ApiResponse<()> = ApiResponse::err(format!("Error processing file: {}", err));
    (status, Json(body)).into_response()
}
