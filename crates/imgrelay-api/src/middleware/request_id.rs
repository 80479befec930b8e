use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID extension type
///
/// `id` is always generated server side and doubles as the request's unique
/// token (it names the scratch file). An inbound `X-Request-ID` is only
/// logged next to it for correlation.
#[derive(Clone, Debug)]
pub struct RequestId {
    pub id: Uuid,
}

/// Request ID middleware
/// Generates a unique request ID for each request and includes it in:
/// - Response headers (X-Request-ID)
/// - Request extensions (for handlers and logging)
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let upstream = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.chars().take(128).collect::<String>());

    let request_id = RequestId { id: Uuid::new_v4() };

    if let Some(upstream) = upstream {
        tracing::debug!(
            request_id = %request_id.id,
            upstream_request_id = %upstream,
            "Correlated inbound request ID"
        );
    }

    let header_value = HeaderValue::from_str(&request_id.id.to_string()).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
