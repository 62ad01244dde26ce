use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::enforce_rate_limit;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::content::PERGUNTAS_PREDEFINIDAS;
use crate::types::dto::assistente::{AssistenteRequest, AssistenteResponse, PerguntaSugerida};
use crate::types::internal::context::RequestContext;

/// FAQ assistant endpoints
pub struct AssistenteApi {
    app_data: Arc<AppData>,
}

impl AssistenteApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[derive(Tags)]
enum AssistenteTags {
    /// Vehicle services assistant
    Assistente,
}

#[OpenApi]
impl AssistenteApi {
    /// Answer a question about vehicle services
    #[oai(path = "/assistente", method = "post", tag = "AssistenteTags::Assistente")]
    async fn perguntar(
        &self,
        req: &Request,
        body: Json<AssistenteRequest>,
    ) -> Result<Json<AssistenteResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);
        enforce_rate_limit(&self.app_data, &ctx, "assistente").await?;

        let resposta = self
            .app_data
            .assistant_service
            .answer(&ctx, body.pergunta.as_deref(), body.categoria.as_deref())
            .await?;

        Ok(Json(AssistenteResponse {
            success: true,
            resposta: resposta.resposta,
            categoria: resposta.categoria.to_string(),
            provider: resposta.provider.to_string(),
        }))
    }

    /// Suggested questions for the assistant menu
    #[oai(path = "/assistente/perguntas", method = "get", tag = "AssistenteTags::Assistente")]
    async fn perguntas(&self) -> Json<Vec<PerguntaSugerida>> {
        Json(
            PERGUNTAS_PREDEFINIDAS
                .iter()
                .map(|item| PerguntaSugerida {
                    id: item.id.to_string(),
                    categoria: item.categoria.to_string(),
                    titulo: item.titulo.to_string(),
                    pergunta: item.pergunta.to_string(),
                })
                .collect(),
        )
    }
}
