use poem_openapi::Object;

/// Frequently asked question shown on the marketing site
#[derive(Object, Debug, Clone)]
pub struct FaqItem {
    pub pergunta: String,
    pub resposta: String,
}
