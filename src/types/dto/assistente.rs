use poem_openapi::Object;

/// Question sent to the FAQ assistant
#[derive(Object, Debug)]
pub struct AssistenteRequest {
    /// Free-text question
    pub pergunta: Option<String>,

    /// Category picked in the UI; recorded for auditing only
    pub categoria: Option<String>,
}

/// Assistant answer
#[derive(Object, Debug)]
pub struct AssistenteResponse {
    pub success: bool,

    /// Answer text (markdown-like)
    pub resposta: String,

    /// Category derived from the question
    pub categoria: String,

    /// `gemini` or `fallback`
    pub provider: String,
}

/// A predefined question offered by the assistant UI
#[derive(Object, Debug, Clone)]
pub struct PerguntaSugerida {
    pub id: String,
    pub categoria: String,
    pub titulo: String,
    pub pergunta: String,
}
