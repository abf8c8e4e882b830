//! Photo endpoints: analyze, history, detail, delete.

#[cfg(test)]
#[path = "photo_test.rs"]
mod photo_test;

use reqwest::multipart::{Form, Part};

use super::error::ApiError;
use super::http::{ApiRequest, HttpClient};
use super::types::{HistoryQuery, PhotoAnalysis, PhotoPage, PhotoUpload};

const ANALYZE_PATH: &str = "/photo/analyze";
const HISTORY_PATH: &str = "/photo/history";

fn photo_path(photo_id: i64) -> String {
    format!("/photo/{photo_id}")
}

fn upload_form(upload: PhotoUpload) -> Result<Form, ApiError> {
    let PhotoUpload { file_name, mime_type, bytes, model } = upload;
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&mime_type)
        .map_err(|e| ApiError::Encode(format!("invalid mime type '{mime_type}': {e}")))?;
    let form = Form::new().part("file", part);
    Ok(match model {
        Some(model) => form.text("model", model.as_str()),
        None => form,
    })
}

/// Upload an image for analysis via multipart `POST /photo/analyze`.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] for an unusable MIME type, otherwise the
/// transport or server error after the client's hooks ran.
pub async fn analyze_photo(http: &HttpClient, upload: PhotoUpload) -> Result<PhotoAnalysis, ApiError> {
    http.send(ApiRequest::post(ANALYZE_PATH).multipart(upload_form(upload)?)).await
}

/// Fetch one page of history via `GET /photo/history?page=&page_size=`.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn get_history(http: &HttpClient, query: HistoryQuery) -> Result<PhotoPage, ApiError> {
    let request = ApiRequest::get(HISTORY_PATH)
        .query("page", query.page)
        .query("page_size", query.page_size);
    http.send(request).await
}

/// Fetch one analysis via `GET /photo/{id}`.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn get_photo_detail(http: &HttpClient, photo_id: i64) -> Result<PhotoAnalysis, ApiError> {
    http.send(ApiRequest::get(photo_path(photo_id))).await
}

/// Delete one analysis via `DELETE /photo/{id}`.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn delete_photo(http: &HttpClient, photo_id: i64) -> Result<(), ApiError> {
    http.send(ApiRequest::delete(photo_path(photo_id))).await
}
