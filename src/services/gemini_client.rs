use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::errors::InternalError;
use crate::errors::internal::AssistantError;

const SYSTEM_PROMPT: &str = "Você é um assistente especializado em serviços veiculares do Brasil. \nSua especialidade é ajudar pessoas com questões sobre:\n- Transferência de propriedade de veículos\n- Licenciamento anual (IPVA, DPVAT, taxa de licenciamento)\n- Segunda via de documentos (CRV, CRLV, CNH)\n- CNH (primeira via, renovação, mudança de categoria)\n- Regularização de veículos (débitos, multas, restrições)\n- Procedimentos junto ao DETRAN\n- Documentação necessária para cada serviço\n- Prazos e valores aproximados\n\nResponda de forma clara, prática e em português brasileiro. \nSe não souber algo específico, oriente a procurar um despachante ou o DETRAN.\nMantenha as respostas concisas mas informativas.";

/// Returned when the model answers with no text
pub const EMPTY_ANSWER: &str = "Desculpe, não consegui processar sua pergunta.";

/// Source of generated answers for the assistant
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Name reported as `provider` in assistant responses
    fn provider_name(&self) -> &'static str;

    async fn generate(&self, pergunta: &str) -> Result<String, InternalError>;
}

/// Google Gemini `generateContent` REST client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            timeout,
        }
    }

    fn failure(message: impl Into<String>) -> InternalError {
        AssistantError::Provider {
            provider: "gemini".to_string(),
            message: message.into(),
        }
        .into()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Full prompt sent to the model
pub fn build_prompt(pergunta: &str) -> String {
    format!("{}\n\nPergunta do usuário: {}", SYSTEM_PROMPT, pergunta)
}

/// First candidate text of a `generateContent` response
fn extract_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Model text as returned, or the stock reply when it is blank
fn answer_text(body: &Value) -> String {
    extract_text(body)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(EMPTY_ANSWER)
        .to_string()
}

#[async_trait]
impl AnswerGenerator for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, pergunta: &str) -> Result<String, InternalError> {
        let request = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": build_prompt(pergunta) }] }]
            }))
            .timeout(self.timeout)
            .send();

        let response = request.await.map_err(|e| Self::failure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(format!(
                "Gemini API returned status: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Self::failure(e.to_string()))?;

        Ok(answer_text(&body))
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
