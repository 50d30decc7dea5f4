//! JSON body extraction with the API's error shape

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::AppError;

/// `Json<T>` whose rejections render as `{error, details}` instead of plain text
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Greeting {
        message: String,
    }

    async fn echo(JsonBody(body): JsonBody<Greeting>) -> String {
        body.message
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/echo", post(echo));
        let mut request = axum::http::Request::builder().method("POST").uri("/echo");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let (status, body) = send(Some("application/json"), r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hi");
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_json_400() {
        let (status, body) = send(Some("application/json"), r#"{"message":42}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bad request");
        assert!(json["details"].as_str().unwrap().contains("message"));
    }

    #[tokio::test]
    async fn malformed_or_untyped_bodies_are_json_errors() {
        let (status, body) = send(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bad request");

        let (status, body) = send(None, r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bad request");
    }
}
