//! Body and query extractors for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>` and `QueryParams<T>` like
//! `axum::extract::Query<T>`, but a malformed request is answered with the
//! service's own `{"error": "..."}` envelope. Field validation is left to
//! the service so it can choose between first-message and all-message
//! reporting.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiEnvelope;

/// JSON request body.
pub struct JsonBody<T>(pub T);

/// Query-string parameters.
pub struct QueryParams<T>(pub T);

/// Error type for extraction failures.
pub enum RequestRejection {
    /// JSON parsing failed.
    Json(JsonRejection),
    /// Query string parsing failed.
    Query(QueryRejection),
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Json(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::Query(rejection) => format!("Invalid query: {}", rejection.body_text()),
        };
        (StatusCode::BAD_REQUEST, Json(ApiEnvelope::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(RequestRejection::Json)?;

        Ok(JsonBody(value))
    }
}

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(RequestRejection::Query)?;

        Ok(QueryParams(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestBody {
        #[allow(dead_code)]
        name: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TestQuery {
        page_index: Option<u64>,
    }

    async fn body_handler(JsonBody(_body): JsonBody<TestBody>) -> &'static str {
        "ok"
    }

    async fn query_handler(QueryParams(query): QueryParams<TestQuery>) -> String {
        query.page_index.unwrap_or_default().to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/body", post(body_handler))
            .route("/query", get(query_handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn json_of(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let req = Request::builder()
            .method("POST")
            .uri("/body")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Alice"}"#))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400_with_error_envelope() {
        let req = Request::builder()
            .method("POST")
            .uri("/body")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_of(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn query_is_parsed_camel_case() {
        let req = Request::builder()
            .uri("/query?pageIndex=3")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"3");
    }

    #[tokio::test]
    async fn malformed_query_returns_400() {
        let req = Request::builder()
            .uri("/query?pageIndex=abc")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_of(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
    }
}
