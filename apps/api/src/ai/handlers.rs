//! Axum route handlers for the résumé AI API.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream, StreamExt};
use tracing::info;

use crate::ai::industry::{industry_profile, IndustryProfile, INDUSTRIES};
use crate::ai::models::{
    AiRequest, AiResult, AiTask, JdMatchResult, PolishFullResult, PolishSentenceResult,
    RoastResult,
};
use crate::ai::prompts::{build_prompt, Prompt, ReplyFormat};
use crate::ai::stream::{decode_deltas, delta_payload, DONE_SENTINEL};
use crate::errors::AppError;
use crate::llm_client::complete_json;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate(request: &AiRequest) -> Result<(), AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if request.task == AiTask::JdMatch
        && request.jd.as_deref().map_or(true, |jd| jd.trim().is_empty())
    {
        return Err(AppError::Validation(
            "jd is required for jd_match".to_string(),
        ));
    }
    Ok(())
}

fn prepare(request: &AiRequest, reply: ReplyFormat) -> (&'static IndustryProfile, Prompt) {
    let profile = industry_profile(&request.industry);
    let opener = match request.task {
        AiTask::Roast => profile.roast_opener(&mut rand::thread_rng()),
        _ => "",
    };
    (profile, build_prompt(request, profile, opener, reply))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/industries
pub async fn handle_list_industries() -> Json<&'static [IndustryProfile]> {
    Json(&INDUSTRIES[..])
}

/// POST /api/v1/resume-ai
///
/// Runs one AI task and returns its typed JSON result.
pub async fn handle_resume_ai(
    State(state): State<AppState>,
    Json(request): Json<AiRequest>,
) -> Result<Json<AiResult>, AppError> {
    validate(&request)?;
    let (profile, prompt) = prepare(&request, ReplyFormat::Json);

    info!(
        "AI task {} for industry {} ({} chars)",
        request.task.as_str(),
        profile.id,
        request.content.chars().count()
    );

    let llm = state.llm.as_ref();
    let (system, user) = (prompt.system.as_str(), prompt.user.as_str());

    let result = match request.task {
        AiTask::Roast => AiResult::Roast(
            complete_json::<RoastResult>(llm, system, user)
                .await?
                .normalized(profile),
        ),
        AiTask::PolishFull => {
            AiResult::PolishFull(complete_json::<PolishFullResult>(llm, system, user).await?)
        }
        AiTask::PolishSentence => AiResult::PolishSentence(
            complete_json::<PolishSentenceResult>(llm, system, user).await?,
        ),
        AiTask::JdMatch => AiResult::JdMatch(
            complete_json::<JdMatchResult>(llm, system, user)
                .await?
                .normalized(),
        ),
    };

    Ok(Json(result))
}

/// POST /api/v1/resume-ai/stream
///
/// Streams a polish rewrite token by token as SSE, ending with `data: [DONE]`.
/// Upstream errors before the first byte surface as normal JSON errors.
pub async fn handle_resume_ai_stream(
    State(state): State<AppState>,
    Json(request): Json<AiRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if !request.task.is_streamable() {
        return Err(AppError::Validation(format!(
            "{} cannot be streamed",
            request.task.as_str()
        )));
    }
    validate(&request)?;
    let (profile, prompt) = prepare(&request, ReplyFormat::PlainText);

    info!(
        "Streaming AI task {} for industry {}",
        request.task.as_str(),
        profile.id
    );

    let upstream = state.llm.stream(&prompt.system, &prompt.user).await?;

    let events = decode_deltas(upstream)
        .map(|delta| Event::default().data(delta_payload(&delta)))
        .chain(stream::once(async { Event::default().data(DONE_SENTINEL) }))
        .map(Ok);

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use bytes::Bytes;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{ByteStream, ChatBackend, LlmError};
    use crate::state::tests::test_state;

    /// Replays a canned reply and records the prompts it was given.
    struct CannedBackend {
        reply: Result<String, fn() -> LlmError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl CannedBackend {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> LlmError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn reply(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(|make| make())
        }
    }

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.reply(system, user)
        }

        async fn stream(&self, system: &str, user: &str) -> Result<ByteStream, LlmError> {
            let text = self.reply(system, user)?;
            // One upstream event per character, split across two chunks.
            let body: String = text
                .chars()
                .map(|c| format!("data: {}\n\n", delta_payload(&c.to_string())))
                .chain(std::iter::once("data: [DONE]\n\n".to_string()))
                .collect();
            let mid = body.len() / 2;
            let mid = (mid..body.len())
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(body.len());
            let (a, b) = body.split_at(mid);
            let chunks = vec![
                Ok(Bytes::copy_from_slice(a.as_bytes())),
                Ok(Bytes::copy_from_slice(b.as_bytes())),
            ];
            Ok(stream::iter(chunks).boxed())
        }
    }

    fn app(backend: Arc<CannedBackend>) -> Router {
        Router::new()
            .route("/api/v1/industries", get(handle_list_industries))
            .route("/api/v1/resume-ai", post(handle_resume_ai))
            .route("/api/v1/resume-ai/stream", post(handle_resume_ai_stream))
            .with_state(test_state(backend))
    }

    async fn send(
        backend: Arc<CannedBackend>,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, String) {
        let request = match body {
            Some(body) => Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder().uri(uri).body(Body::empty()).unwrap(),
        };
        let response = app(backend).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn json(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_industries_lists_all_profiles() {
        let (status, body) = send(CannedBackend::ok(""), "/api/v1/industries", None).await;
        assert_eq!(status, StatusCode::OK);
        let list = json(&body);
        assert_eq!(list.as_array().unwrap().len(), INDUSTRIES.len());
        assert_eq!(list[0]["id"], "programmer");
    }

    #[tokio::test]
    async fn test_roast_returns_normalized_scores() {
        let backend = CannedBackend::ok(
            r#"好的：{"score": 65, "roast": "开场白……", "dimensions": {"算法基础": 70}, "ats_score": 80,
               "highlights": ["a"], "weaknesses": ["b"], "keywords_missing": ["c"]}"#,
        );
        let (status, body) = send(
            backend.clone(),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "roast", "content": "张三 简历", "industry": "programmer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let result = json(&body);
        assert_eq!(result["score"], 65.0);
        assert_eq!(result["dimensions"].as_object().unwrap().len(), 6);
        assert_eq!(result["dimensions"]["影响力"], 0.0);

        let seen = backend.seen.lock().unwrap();
        let profile = industry_profile("programmer");
        assert!(profile
            .roast_openers
            .iter()
            .any(|opener| seen[0].0.contains(opener)));
    }

    #[tokio::test]
    async fn test_unknown_industry_uses_programmer_prompt() {
        let backend = CannedBackend::ok(r#"{"result": "主导订单系统重构"}"#);
        let (status, body) = send(
            backend.clone(),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "polish_sentence", "content": "做了订单系统", "industry": "chef"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::json!({"result": "主导订单系统重构"}));
        assert!(backend.seen.lock().unwrap()[0].0.contains("技术/程序员"));
    }

    #[tokio::test]
    async fn test_jd_match_requires_jd() {
        let (status, body) = send(
            CannedBackend::ok("{}"),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "jd_match", "content": "简历", "industry": "pm", "jd": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_jd_match_result() {
        let (status, body) = send(
            CannedBackend::ok(
                r#"{"match_score": 82, "analysis": "匹配", "matched_keywords": ["Go"], "missing_keywords": ["K8s"], "suggestions": []}"#,
            ),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "jd_match", "content": "简历", "industry": "programmer", "jd": "Go 工程师"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let result = json(&body);
        assert_eq!(result["match_score"], 82.0);
        assert_eq!(result["missing_keywords"][0], "K8s");
    }

    #[tokio::test]
    async fn test_blank_content_rejected() {
        let (status, _) = send(
            CannedBackend::ok("{}"),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "polish_full", "content": "", "industry": "qa"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_bad_gateway() {
        let (status, body) = send(
            CannedBackend::ok("抱歉，我无法完成"),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "polish_full", "content": "简历", "industry": "qa"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json(&body)["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_backend_errors_map_to_status() {
        let (status, _) = send(
            CannedBackend::failing(|| LlmError::RateLimited { retries: 3 }),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "roast", "content": "简历", "industry": "hr"})),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

        let (status, _) = send(
            CannedBackend::failing(|| LlmError::QuotaExhausted),
            "/api/v1/resume-ai",
            Some(serde_json::json!({"type": "roast", "content": "简历", "industry": "hr"})),
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);

        let (status, _) = send(
            CannedBackend::failing(|| LlmError::NotConfigured),
            "/api/v1/resume-ai/stream",
            Some(serde_json::json!({"type": "polish_full", "content": "简历", "industry": "hr"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_stream_relays_deltas_and_done() {
        let backend = CannedBackend::ok("优化后");
        let (status, body) = send(
            backend.clone(),
            "/api/v1/resume-ai/stream",
            Some(serde_json::json!({"type": "polish_sentence", "content": "做了优化", "industry": "programmer", "style": "expert"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let data: Vec<&str> = body
            .lines()
            .filter_map(|l| l.strip_prefix("data:"))
            .map(str::trim_start)
            .collect();
        assert_eq!(data.len(), 4);
        let text: String = data[..3]
            .iter()
            .map(|d| json(d)["choices"][0]["delta"]["content"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(text, "优化后");
        assert_eq!(data[3], DONE_SENTINEL);

        // Streamed prompts ask for bare text, not JSON.
        assert!(!backend.seen.lock().unwrap()[0].0.contains("\"result\""));
    }

    #[tokio::test]
    async fn test_stream_rejects_non_polish_tasks() {
        let (status, body) = send(
            CannedBackend::ok("x"),
            "/api/v1/resume-ai/stream",
            Some(serde_json::json!({"type": "roast", "content": "简历", "industry": "programmer"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json(&body)["error"]["message"]
            .as_str()
            .unwrap()
            .contains("roast"));
    }
}
