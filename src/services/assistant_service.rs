use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::AssistantError;
use crate::services::gemini_client::AnswerGenerator;
use crate::services::responder;
use crate::types::internal::audit::EventType;
use crate::types::internal::context::RequestContext;

/// Provider name when the static table answered
pub const PROVIDER_FALLBACK: &str = "fallback";

/// Answer to one assistant question
#[derive(Debug, Clone, PartialEq)]
pub struct Resposta {
    pub resposta: String,
    pub categoria: &'static str,
    pub provider: &'static str,
}

/// FAQ assistant: optional model-generated answers over the static table
pub struct AssistantService {
    generator: Option<Arc<dyn AnswerGenerator>>,
    audit_logger: Arc<AuditLogger>,
}

impl AssistantService {
    pub fn new(generator: Option<Arc<dyn AnswerGenerator>>, audit_logger: Arc<AuditLogger>) -> Self {
        Self {
            generator,
            audit_logger,
        }
    }

    /// Answer a question
    ///
    /// # Arguments
    /// * `pergunta` - The question; empty or blank is rejected
    /// * `categoria_informada` - Category picked by the caller, audited only
    pub async fn answer(
        &self,
        ctx: &RequestContext,
        pergunta: Option<&str>,
        categoria_informada: Option<&str>,
    ) -> Result<Resposta, InternalError> {
        let pergunta = pergunta
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(AssistantError::EmptyQuestion)?;

        let categoria = responder::categorizar(pergunta);

        let (resposta, provider) = match &self.generator {
            Some(generator) => match generator.generate(pergunta).await {
                Ok(texto) => (texto, generator.provider_name()),
                Err(e) => {
                    tracing::warn!(error = %e, "Answer provider failed, using static answer");
                    self.audit_logger
                        .builder(EventType::AiAssistantError)
                        .with_context(ctx)
                        .mask_ip_address()
                        .resource("assistente", None)
                        .add_field("provider", generator.provider_name())
                        .add_field("error", e.to_string())
                        .write()
                        .await?;
                    (responder::responder(pergunta).to_string(), PROVIDER_FALLBACK)
                }
            },
            None => (responder::responder(pergunta).to_string(), PROVIDER_FALLBACK),
        };

        self.audit_logger
            .builder(EventType::AiAssistantQuery)
            .with_context(ctx)
            .mask_ip_address()
            .resource("assistente", None)
            .add_field("categoria", categoria)
            .add_field("categoria_informada", categoria_informada)
            .add_field("pergunta_length", pergunta.chars().count())
            .add_field("provider", provider)
            .write()
            .await?;

        Ok(Resposta {
            resposta,
            categoria,
            provider,
        })
    }
}
