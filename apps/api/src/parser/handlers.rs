//! Axum route handlers for the parser API.

use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::parser::{parse_resume, ParsedResume};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub content: String,
    /// Externally polished text. When present it is parsed instead of `content`
    /// and its achievement lines replace the first experience's highlights.
    #[serde(default)]
    pub polished_content: Option<String>,
}

/// POST /api/v1/resume/parse
///
/// Always returns a fully populated document; blank input yields placeholders.
pub async fn handle_parse(
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    let polished = request
        .polished_content
        .filter(|text| !text.trim().is_empty());

    info!(
        "Parsing résumé ({} chars, polished={})",
        request.content.chars().count(),
        polished.is_some()
    );

    // Large pastes are CPU-bound regex work; keep them off the async workers.
    let resume = tokio::task::spawn_blocking(move || match polished {
        Some(polished) => parse_resume(&polished).with_polished_highlights(&polished),
        None => parse_resume(&request.content),
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))?;

    Ok(Json(resume))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new().route("/api/v1/resume/parse", post(handle_parse))
    }

    async fn post_json(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/resume/parse")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_parse_endpoint_returns_document() {
        let (status, json) = post_json(serde_json::json!({
            "content": "工作经历\n字节跳动 | 高级工程师 | 2021.06 - 至今\n- 主导核心系统重构"
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["experience"][0]["company"], "字节跳动");
        assert_eq!(json["experience"][0]["highlights"][0], "主导核心系统重构");
    }

    #[tokio::test]
    async fn test_parse_endpoint_defaults_blank_input() {
        let (status, json) = post_json(serde_json::json!({ "content": "" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "张三");
        assert_eq!(json["skills"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_parse_endpoint_prefers_polished_content() {
        let (status, json) = post_json(serde_json::json!({
            "content": "工作经历\n旧公司 | 工程师 | 2019.01 - 2020.01",
            "polished_content": "工作经历\n新公司 | 高级工程师 | 2020.02 - 至今\n- 主导交易系统重构，吞吐量提升 200%"
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["experience"][0]["company"], "新公司");
        assert_eq!(
            json["experience"][0]["highlights"][0],
            "主导交易系统重构，吞吐量提升 200%"
        );
    }

    #[tokio::test]
    async fn test_parse_endpoint_ignores_blank_polished_content() {
        let (_, json) = post_json(serde_json::json!({
            "content": "工作经历\n旧公司 | 工程师 | 2019.01 - 2020.01",
            "polished_content": "   "
        }))
        .await;
        assert_eq!(json["experience"][0]["company"], "旧公司");
    }

    #[tokio::test]
    async fn test_parse_endpoint_rejects_missing_content() {
        let (status, _) = post_json(serde_json::json!({ "text": "x" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
