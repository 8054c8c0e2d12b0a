//! Insight generation with model fallback

use std::sync::Arc;

use coach_common::{Insight, InsightRequest};
use tracing::{info, warn};

use crate::llm::{ChatBackend, ChatMessage, ChatRequest, LlmError};
use crate::parse::parse_insight;
use crate::prompt::{build_prompt, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE};

/// Asks the primary model, then the fallback model once, for coach text
pub struct InsightGenerator {
    backend: Arc<dyn ChatBackend>,
    primary_model: String,
    fallback_model: String,
}

impl InsightGenerator {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
        }
    }

    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    /// Generate an insight for `request`
    ///
    /// Errors only when both models fail; the error is the fallback's.
    pub async fn generate(&self, request: &InsightRequest) -> Result<Insight, LlmError> {
        let prompt = build_prompt(request);

        let content = match self.ask(&self.primary_model, &prompt).await {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Falling back to {} due to: {}",
                    self.fallback_model, e
                );
                self.ask(&self.fallback_model, &prompt).await?
            }
        };

        Ok(parse_insight(&content))
    }

    async fn ask(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let content = self.backend.complete(&request).await?;
        info!(model, chars = content.len(), "Coach response received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails for the listed models, answers for the rest
    struct ScriptedBackend {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(request.model.clone());
            assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
            assert_eq!(request.max_tokens, 300);

            if self.failing.contains(&request.model.as_str()) {
                Err(LlmError::Backend(format!("{} unavailable", request.model)))
            } else {
                Ok(format!(
                    r#"{{"insight": "from {}", "tip": "t", "concept": "c"}}"#,
                    request.model
                ))
            }
        }
    }

    fn generator(failing: Vec<&'static str>) -> (InsightGenerator, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend {
            failing,
            calls: Mutex::new(Vec::new()),
        });
        (
            InsightGenerator::new(backend.clone(), "gpt-4o", "gpt-3.5-turbo"),
            backend,
        )
    }

    #[tokio::test]
    async fn test_primary_model_answers() {
        let (generator, backend) = generator(vec![]);
        let insight = generator.generate(&InsightRequest::new("fen")).await.unwrap();

        assert_eq!(insight.insight, "from gpt-4o");
        assert_eq!(*backend.calls.lock().unwrap(), vec!["gpt-4o"]);
    }

    #[tokio::test]
    async fn test_fallback_model_used_once() {
        let (generator, backend) = generator(vec!["gpt-4o"]);
        let insight = generator.generate(&InsightRequest::new("fen")).await.unwrap();

        assert_eq!(insight.insight, "from gpt-3.5-turbo");
        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec!["gpt-4o", "gpt-3.5-turbo"]
        );
    }

    #[tokio::test]
    async fn test_both_models_failing_is_error() {
        let (generator, backend) = generator(vec!["gpt-4o", "gpt-3.5-turbo"]);
        let err = generator.generate(&InsightRequest::new("fen")).await.unwrap_err();

        assert!(err.to_string().contains("gpt-3.5-turbo"));
        assert_eq!(backend.calls.lock().unwrap().len(), 2);
    }
}
