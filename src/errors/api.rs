use poem::http::StatusCode;
use poem_openapi::{ApiResponse, payload::Json};

use crate::errors::internal::{
    AssistantError, CredentialError, InternalError, LookupError, RegistryError,
};
use crate::types::dto::common::ErrorResponse;

/// Caller-facing error for every endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing or invalid input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Invalid credentials or token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but not allowed
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Unique field already registered
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Too many requests from this IP for this endpoint
    #[oai(status = 429)]
    RateLimited(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),

    /// Status relayed from the vehicle lookup vendor
    Upstream(StatusCode, Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(error, message, 400))
    }

    /// Fixed payload for an empty assistant question
    pub fn question_required() -> Self {
        Self::bad_request("pergunta_obrigatoria", "Pergunta é obrigatória.")
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(body("credenciais_invalidas", "Credenciais inválidas", 401))
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(body("token_invalido", "Token inválido ou malformado", 401))
    }

    pub fn expired_token() -> Self {
        ApiError::Unauthorized(body("token_expirado", "Token expirado", 401))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(body("acesso_negado", "Acesso não autorizado", 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body("nao_encontrado", message, 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("registro_duplicado", message, 409))
    }

    pub fn rate_limited() -> Self {
        ApiError::RateLimited(body(
            "limite_excedido",
            "Limite de requisições excedido. Tente novamente em alguns minutos.",
            429,
        ))
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalError(body(
            "erro_interno",
            "Erro interno do servidor. Tente novamente.",
            500,
        ))
    }

    fn internal_with_message(error: &str, message: impl Into<String>) -> Self {
        ApiError::InternalError(body(error, message, 500))
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
        ApiError::Upstream(code, body("erro_consulta", message, code.as_u16()))
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::RateLimited(json)
            | ApiError::InternalError(json)
            | ApiError::Upstream(_, json) => &json.0,
        }
    }

    pub fn message(&self) -> &str {
        &self.response().message
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Database { ref operation, .. } => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Transaction { ref operation, .. } => {
                tracing::error!("Transaction error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Parse { ref value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { ref operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Audit(e) => {
                tracing::error!("Audit error: {}", e);
                Self::internal_server_error()
            }

            InternalError::Credential(e) => match e {
                CredentialError::MissingCredentials(message) => {
                    Self::bad_request("credenciais_obrigatorias", message)
                }
                CredentialError::InvalidCredentials => {
                    tracing::debug!("Invalid credentials attempt");
                    Self::invalid_credentials()
                }
                CredentialError::InvalidToken(reason) => {
                    tracing::debug!("Invalid token: {}", reason);
                    Self::invalid_token()
                }
                CredentialError::ExpiredToken => Self::expired_token(),
                CredentialError::Forbidden(reason) => {
                    tracing::warn!("Forbidden: {}", reason);
                    Self::forbidden()
                }
                CredentialError::DuplicateProfile(email) => {
                    tracing::warn!("Duplicate profile: {}", email);
                    Self::conflict("Email já cadastrado")
                }
            },

            InternalError::Lookup(e) => match e {
                LookupError::MissingField(message) => {
                    Self::bad_request("campo_obrigatorio", message)
                }
                LookupError::InvalidPlate => Self::bad_request(
                    "placa_invalida",
                    "Formato de placa inválido. Use o formato ABC1234 ou ABC1D23",
                ),
                LookupError::InvalidKind(_) => {
                    Self::bad_request("tipo_invalido", "Tipo de consulta inválido")
                }
                LookupError::AccessKeyMissing => {
                    tracing::error!("CHAVE_ACESSO_API is not configured");
                    Self::internal_with_message(
                        "configuracao_ausente",
                        "Chave de acesso da API não configurada",
                    )
                }
                LookupError::Upstream { status, message } => Self::upstream(status, message),
                LookupError::Timeout(_)
                | LookupError::Transport(_)
                | LookupError::InvalidResponse(_) => {
                    tracing::error!("Vehicle lookup failed: {}", e);
                    Self::internal_server_error()
                }
            },

            InternalError::Registry(e) => match e {
                RegistryError::Validation(message) => {
                    Self::bad_request("dados_invalidos", message)
                }
                RegistryError::Duplicate(field) => {
                    Self::conflict(format!("{} já cadastrado", field))
                }
                RegistryError::ClienteNotFound(_) => Self::not_found("Cliente não encontrado"),
                RegistryError::DocumentoNotFound(_) => {
                    Self::not_found("Documento não encontrado")
                }
            },

            InternalError::Assistant(e) => match e {
                AssistantError::EmptyQuestion => Self::question_required(),
                AssistantError::Provider { .. } => {
                    tracing::error!("Assistant provider error: {}", e);
                    Self::internal_server_error()
                }
            },
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}
