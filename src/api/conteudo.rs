use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::services::content::FAQ;
use crate::types::dto::conteudo::FaqItem;

/// Public site content
pub struct ConteudoApi;

#[derive(Tags)]
enum ConteudoTags {
    /// Static site content
    Conteudo,
}

#[OpenApi]
impl ConteudoApi {
    /// Frequently asked questions
    #[oai(path = "/faq", method = "get", tag = "ConteudoTags::Conteudo")]
    async fn faq(&self) -> Json<Vec<FaqItem>> {
        Json(
            FAQ.iter()
                .map(|entry| FaqItem {
                    pergunta: entry.pergunta.to_string(),
                    resposta: entry.resposta.to_string(),
                })
                .collect(),
        )
    }
}
