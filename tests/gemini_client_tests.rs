//! Tests for the Gemini client against a mock HTTP server.

mod common;

#[cfg(test)]
mod gemini_client_tests {
    use super::common::{INTERSTELLAR_REPLY, candidate_reply};
    use cineinfo::{
        CineInfoError, GeminiClient, GeminiModel, MovieInfoProvider, MovieService, Settings,
        TextGenerator,
    };
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FLASH_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn base_url(mock_server: &MockServer) -> String {
        format!("{}/v1beta", mock_server.uri())
    }

    #[tokio::test]
    async fn test_request_carries_prompt_tool_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Tell me about Alien" }] }],
                "tools": [{
                    "googleSearchRetrieval": {
                        "dynamicRetrievalConfig": { "mode": "MODE_DYNAMIC", "dynamicThreshold": 0.3 }
                    }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply(&["hello"])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .model(GeminiModel::Gemini20Flash)
            .base_url(base_url(&mock_server));

        let text = client.generate("Tell me about Alien").await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_text_parts_concatenated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_reply(&[
                "```json\n{\"title\":",
                " \"Alien\"}\n```",
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .base_url(base_url(&mock_server));

        let text = client.generate("prompt").await.unwrap();
        assert_eq!(text, "```json\n{\"title\": \"Alien\"}\n```");
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(query_param("key", "bad-key"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new("bad-key")
            .unwrap()
            .base_url(base_url(&mock_server));

        match client.generate("prompt").await.unwrap_err() {
            CineInfoError::ApiError(msg) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("API key not valid"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .base_url(base_url(&mock_server));

        let err = client.generate("prompt").await.unwrap_err();
        assert_eq!(
            err,
            CineInfoError::ApiError("No completion candidates returned".to_string())
        );
    }

    #[tokio::test]
    async fn test_candidate_without_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .base_url(base_url(&mock_server));

        let err = client.generate("prompt").await.unwrap_err();
        assert_eq!(
            err,
            CineInfoError::ApiError("No text content in response".to_string())
        );
    }

    #[tokio::test]
    async fn test_movie_lookup_through_settings() {
        let mock_server = MockServer::start().await;
        let fenced = format!("```json\n{}\n```", INTERSTELLAR_REPLY);

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "settings-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(candidate_reply(&[fenced.as_str()])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mock_base = base_url(&mock_server);
        let settings = Settings::from_lookup(|key| match key {
            "GOOGLE_API_KEY" => Some("settings-key".to_string()),
            "GOOGLE_API_MODEL" => Some("gemini-2.5-flash".to_string()),
            "GOOGLE_API_BASE_URL" => Some(mock_base.clone()),
            _ => None,
        })
        .unwrap();
        let service = MovieService::new(GeminiClient::from_settings(&settings).unwrap());

        let movie = service.get_movie_info("Interstellar").await.unwrap();
        assert_eq!(movie.title, "Interstellar");
        assert_eq!(movie.box_office, "$677,471,339");

        let requests = mock_server.received_requests().await.unwrap();
        let body: Value = requests[0].body_json().unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("'Interstellar'"));
    }
}
