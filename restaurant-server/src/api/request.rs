//! Restaurant write payloads
//!
//! Two accepted shapes, both normalized into one [`UpdateRequest`]:
//!
//! - `multipart/form-data`: text field `data` (JSON), file fields `logo` and
//!   `images` (repeatable, `images[]` also accepted)
//! - `application/json`: `{ "data": { ... } }` or `{ "data": "<json string>" }`

use axum::extract::{FromRequest, Multipart, Request};
use axum::Json;
use bytes::Bytes;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::RestaurantUpdate;

use crate::core::ServerState;
use crate::services::{MediaAttachment, UpdateRequest};

/// Gallery files accepted per request
pub const MAX_IMAGES_PER_REQUEST: usize = 10;

/// Body extractor for create / update routes
#[derive(Debug)]
pub struct RestaurantForm(pub UpdateRequest);

impl FromRequest<ServerState> for RestaurantForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &ServerState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::invalid_request(format!("Multipart error: {}", e.body_text()))
            })?;
            let request = parse_multipart(multipart).await?;
            return Ok(Self(request));
        }

        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.body_text()))?;
        let data = match body {
            Value::Object(mut map) => parse_data_field(map.remove("data").unwrap_or(Value::Null))?,
            _ => {
                return Err(AppError::with_message(
                    ErrorCode::InvalidFormat,
                    "Request body must be a JSON object",
                ));
            }
        };

        Ok(Self(UpdateRequest {
            data,
            ..Default::default()
        }))
    }
}

/// Normalize the `data` member: an object, a JSON-encoded string, or nothing
pub fn parse_data_field(value: Value) -> Result<RestaurantUpdate, AppError> {
    let invalid = |e: serde_json::Error| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid data field: {e}"))
            .with_detail("field", "data")
    };

    match value {
        Value::Null => Ok(RestaurantUpdate::default()),
        Value::String(s) if s.trim().is_empty() => Ok(RestaurantUpdate::default()),
        Value::String(s) => serde_json::from_str(&s).map_err(invalid),
        obj @ Value::Object(_) => serde_json::from_value(obj).map_err(invalid),
        _ => Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "data must be an object or a JSON string",
        )
        .with_detail("field", "data")),
    }
}

/// Collect `data` and file fields; file contents are checked by the service
async fn parse_multipart(mut multipart: Multipart) -> Result<UpdateRequest, AppError> {
    let mut request = UpdateRequest::default();
    let mut data: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "data" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Read error: {e}")))?;
                data = Some(text);
            }
            "logo" | "images" | "images[]" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Read error: {e}")))?;
                let attachment = MediaAttachment {
                    file_name,
                    content_type,
                    data: bytes,
                };

                if name == "logo" {
                    if request.logo.is_some() {
                        return Err(AppError::invalid_request("Only one logo file is allowed"));
                    }
                    request.logo = Some(attachment);
                } else {
                    if request.images.len() >= MAX_IMAGES_PER_REQUEST {
                        return Err(AppError::invalid_request(format!(
                            "At most {MAX_IMAGES_PER_REQUEST} images per request"
                        )));
                    }
                    request.images.push(attachment);
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    request.data = parse_data_field(data.map(Value::String).unwrap_or(Value::Null))?;
    Ok(request)
}
