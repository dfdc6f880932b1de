//! Alert headers
//!
//! Successful writes tell the client what happened through a translatable
//! alert key plus a parameter: `X-App-Alert: {app}.city.created` and
//! `X-App-Params: 7`. Failures use `X-App-Error`, set by
//! [`AppError`](crate::shared::error::AppError).

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::shared::error::PARAMS_HEADER;

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-app-alert");

fn alert(app_name: &str, entity_name: &str, action: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(&format!("{}.{}.{}", app_name, entity_name, action)) {
        headers.insert(ALERT_HEADER, v);
    }
    if let Ok(v) = HeaderValue::from_str(param) {
        headers.insert(PARAMS_HEADER, v);
    }
    headers
}

pub fn entity_created(app_name: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(app_name, entity_name, "created", param)
}

pub fn entity_updated(app_name: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(app_name, entity_name, "updated", param)
}
