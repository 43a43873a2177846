//! Middleware for logging requests and responses.

use axum::{
    extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response,
};
use serde_json::Value;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level. Passwords in JSON
/// request bodies are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;

    if parts.method == axum::http::Method::POST
        && parts
            .headers
            .get(CONTENT_TYPE)
            .is_some_and(|content_type| {
                content_type
                    .to_str()
                    .is_ok_and(|value| value.starts_with("application/json"))
            })
    {
        let display_text = redact_password(&body_text, "password");
        log_request(&parts, &display_text);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

fn redact_password(body_text: &str, field_name: &str) -> String {
    let Ok(mut body) = serde_json::from_str::<Value>(body_text) else {
        return body_text.to_string();
    };

    if let Some(field) = body.get_mut(field_name) {
        *field = Value::String("********".to_string());
    }

    body.to_string()
}

async fn extract_parts_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Take at most `limit` bytes from the start of `body` without splitting a
/// multi-byte UTF-8 character.
fn truncate_on_char_boundary(body: &str, mut limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    while !body.is_char_boundary(limit) {
        limit -= 1;
    }

    &body[..limit]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let truncated_body = truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT);
        tracing::info!("Received request: {parts:#?}\nbody: {truncated_body:}...");
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let truncated_body = truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT);
        tracing::info!("Sending response: {parts:#?}\nbody: {truncated_body:}...");
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}
