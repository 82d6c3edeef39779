//! Enhancement flow: validate → build prompt → one provider call → normalize.

use tracing::info;

use crate::enhance::error::EnhanceError;
use crate::enhance::models::{DraftRequest, DraftResponse, EnhanceRequest, EnhanceResponse, Field};
use crate::enhance::normalize::{normalize_draft, normalize_enhancement};
use crate::enhance::prompts::{build_draft_prompt, build_enhance_prompt};
use crate::llm_client::LlmClient;

/// Rewrites one résumé field through the generation backend.
///
/// The field is validated before the client is touched, so an unknown
/// field never produces network traffic.
pub async fn enhance(
    llm: &LlmClient,
    request: &EnhanceRequest,
) -> Result<EnhanceResponse, EnhanceError> {
    let field: Field = request.field.parse()?;
    let context = request.context.clone().unwrap_or_default();

    let prompt = build_enhance_prompt(
        field,
        request.content.as_deref().unwrap_or_default(),
        &context,
        request.additional_instructions.as_deref(),
    );

    let envelope = llm.generate(&prompt).await?;
    let text = normalize_enhancement(field, &envelope)?;

    info!(%field, chars = text.len(), "Field enhanced");
    Ok(EnhanceResponse { text })
}

/// Produces a summary, job description and skill list from basic profile facts.
pub async fn generate_draft(
    llm: &LlmClient,
    request: &DraftRequest,
) -> Result<DraftResponse, EnhanceError> {
    if request.full_name.trim().is_empty() || request.current_position.trim().is_empty() {
        return Err(EnhanceError::InvalidRequest(
            "fullName and currentPosition are required".to_string(),
        ));
    }

    let prompt = build_draft_prompt(request);
    let envelope = llm.generate(&prompt).await?;
    let draft = normalize_draft(&envelope)?;

    info!(skills = draft.skills.len(), "Draft generated");
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn completion(text: &str) -> serde_json::Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    fn request(field: &str, content: &str) -> EnhanceRequest {
        EnhanceRequest {
            field: field.to_string(),
            content: Some(content.to_string()),
            context: None,
            additional_instructions: None,
        }
    }

    #[tokio::test]
    async fn test_skills_scenario_keeps_first_five() {
        std::env::set_var("VITAE_TEST_SVC_KEY_SKILLS", "k");
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(PATH).body_contains("coding");
                then.status(200)
                    .json_body(completion("HTML, CSS, JavaScript, Python, C++, Go, Rust"));
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_SKILLS");

        let response = enhance(&llm, &request("skills", "coding")).await.unwrap();

        assert_eq!(response.text, "HTML, CSS, JavaScript, Python, C++");
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_field_makes_no_request() {
        std::env::set_var("VITAE_TEST_SVC_KEY_FIELD", "k");
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(completion("x"));
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_FIELD");

        let err = enhance(&llm, &request("hobbies", "chess")).await.unwrap_err();

        assert!(matches!(err, EnhanceError::InvalidField(_)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(completion("x"));
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_NEVER_SET");

        let err = enhance(&llm, &request("summary", "Engineer")).await.unwrap_err();

        assert!(matches!(err, EnhanceError::MissingCredential(_)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_upstream_503_is_upstream_error_with_status() {
        std::env::set_var("VITAE_TEST_SVC_KEY_503", "k");
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503).body("Service Unavailable");
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_503");

        let err = enhance(&llm, &request("summary", "Engineer")).await.unwrap_err();

        assert!(matches!(err, EnhanceError::UpstreamError(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_unexpected_envelope_is_malformed() {
        std::env::set_var("VITAE_TEST_SVC_KEY_SHAPE", "k");
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "promptFeedback": {} }));
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_SHAPE");

        let err = enhance(&llm, &request("experience", "Led team")).await.unwrap_err();

        assert!(matches!(err, EnhanceError::MalformedUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn test_draft_requires_name_and_position() {
        let llm = LlmClient::with_key_var("http://127.0.0.1:1", "VITAE_TEST_SVC_KEY_NEVER_SET");
        let err = generate_draft(&llm, &DraftRequest::default()).await.unwrap_err();
        assert!(matches!(err, EnhanceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_draft_round_trip() {
        std::env::set_var("VITAE_TEST_SVC_KEY_DRAFT", "k");
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("Ada");
                then.status(200).json_body(completion(
                    r#"{"summary": "Pioneer.", "description": "Wrote programs.", "skills": "Maths, Logic"}"#,
                ));
            })
            .await;
        let llm = LlmClient::with_key_var(server.base_url(), "VITAE_TEST_SVC_KEY_DRAFT");

        let draft = generate_draft(
            &llm,
            &DraftRequest {
                full_name: "Ada".to_string(),
                current_position: "Analyst".to_string(),
                ..DraftRequest::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(draft.summary, "Pioneer.");
        assert_eq!(draft.skills, vec!["Maths", "Logic"]);
    }
}
