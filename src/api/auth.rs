use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, SecurityScheme, Tags, auth::Bearer, payload::Json};

use crate::api::helpers::{authenticated_context, enforce_rate_limit};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::Sessao;
use crate::types::dto::auth::{
    AdminLoginRequest, ClienteLoginRequest, LoginResponse, SessaoResponse, UsuarioResponse,
};
use crate::types::dto::common::format_timestamp;
use crate::types::internal::context::RequestContext;

/// Authentication API endpoints
pub struct AuthApi {
    app_data: Arc<AppData>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Client and admin login
    Authentication,
}

fn login_response(sessao: Sessao) -> Json<LoginResponse> {
    Json(LoginResponse {
        success: true,
        token: sessao.token,
        user: UsuarioResponse {
            id: sessao.usuario.id,
            nome: sessao.usuario.nome,
            email: sessao.usuario.email,
            tipo: sessao.usuario.tipo.as_str().to_string(),
        },
    })
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Client login with vehicle plate and CPF
    ///
    /// Token valid for 24 hours.
    #[oai(path = "/cliente", method = "post", tag = "AuthTags::Authentication")]
    async fn login_cliente(
        &self,
        req: &Request,
        body: Json<ClienteLoginRequest>,
    ) -> Result<Json<LoginResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);
        enforce_rate_limit(&self.app_data, &ctx, "auth/cliente").await?;

        let sessao = self
            .app_data
            .auth_service
            .login_cliente(&ctx, body.placa.as_deref(), body.cpf.as_deref())
            .await?;

        Ok(login_response(sessao))
    }

    /// Admin login with email and password
    ///
    /// Token valid for 8 hours.
    #[oai(path = "/admin", method = "post", tag = "AuthTags::Authentication")]
    async fn login_admin(
        &self,
        req: &Request,
        body: Json<AdminLoginRequest>,
    ) -> Result<Json<LoginResponse>, ApiError> {
        let ctx = RequestContext::from_request(req);
        enforce_rate_limit(&self.app_data, &ctx, "auth/admin").await?;

        let sessao = self
            .app_data
            .auth_service
            .login_admin(&ctx, body.email.as_deref(), body.senha.as_deref())
            .await?;

        Ok(login_response(sessao))
    }

    /// Current session decoded from the bearer token
    #[oai(path = "/sessao", method = "get", tag = "AuthTags::Authentication")]
    async fn sessao(&self, req: &Request, auth: BearerAuth) -> Result<Json<SessaoResponse>, ApiError> {
        let ctx = authenticated_context(&self.app_data, req, &auth)?;
        let claims = ctx.claims.ok_or_else(ApiError::invalid_token)?;

        Ok(Json(SessaoResponse {
            user_id: claims.sub,
            tipo: claims.tipo.as_str().to_string(),
            email: claims.email,
            expires_at: format_timestamp(claims.exp),
        }))
    }
}
