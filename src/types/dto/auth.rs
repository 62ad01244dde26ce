use poem_openapi::Object;

/// Client login: vehicle plate plus CPF (full or last five digits)
#[derive(Object, Debug)]
pub struct ClienteLoginRequest {
    pub placa: Option<String>,
    pub cpf: Option<String>,
}

/// Admin login
#[derive(Object, Debug)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

/// Authenticated user summary returned with a token
#[derive(Object, Debug)]
pub struct UsuarioResponse {
    pub id: String,
    pub nome: String,
    pub email: Option<String>,

    /// `cliente` or `admin`
    #[oai(rename = "type")]
    pub tipo: String,
}

/// Successful login
#[derive(Object, Debug)]
pub struct LoginResponse {
    pub success: bool,

    /// HS256 JWT
    pub token: String,

    pub user: UsuarioResponse,
}

/// Current session decoded from the bearer token
#[derive(Object, Debug)]
pub struct SessaoResponse {
    pub user_id: String,
    pub tipo: String,
    pub email: Option<String>,

    /// Expiration (ISO 8601 format)
    pub expires_at: String,
}
