#[cfg(test)]
mod tests {
    use crate::errors::ApiError;
    use crate::errors::internal::{
        AssistantError, CredentialError, InternalError, LookupError, RegistryError,
    };
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let internal_err = InternalError::database("find_cliente", DbErr::RecordNotFound("x".to_string()));
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "Erro interno do servidor. Tente novamente.");
    }

    #[test]
    fn test_crypto_error_does_not_leak_details() {
        let internal_err = InternalError::crypto("argon2_init", "invalid secret");
        let api_err = ApiError::from_internal_error(internal_err);

        assert_eq!(api_err.status_code(), 500);
        assert!(!api_err.message().contains("argon2"));
    }

    #[test]
    fn test_invalid_credentials_is_uniform() {
        let api_err = ApiError::from_internal_error(CredentialError::InvalidCredentials.into());

        assert_eq!(api_err.status_code(), 401);
        assert_eq!(api_err.message(), "Credenciais inválidas");
    }

    #[test]
    fn test_missing_credentials_keeps_message() {
        let api_err = ApiError::from_internal_error(
            CredentialError::MissingCredentials("Placa e CPF são obrigatórios".to_string()).into(),
        );

        assert_eq!(api_err.status_code(), 400);
        assert_eq!(api_err.message(), "Placa e CPF são obrigatórios");
    }

    #[test]
    fn test_invalid_plate_message() {
        let api_err = ApiError::from_internal_error(LookupError::InvalidPlate.into());

        assert_eq!(api_err.status_code(), 400);
        assert_eq!(
            api_err.message(),
            "Formato de placa inválido. Use o formato ABC1234 ou ABC1D23"
        );
    }

    #[test]
    fn test_missing_access_key_is_server_error() {
        let api_err = ApiError::from_internal_error(LookupError::AccessKeyMissing.into());

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "Chave de acesso da API não configurada");
    }

    #[test]
    fn test_upstream_status_is_relayed() {
        let api_err = ApiError::from_internal_error(
            LookupError::Upstream {
                status: 404,
                message: "Veículo não encontrado".to_string(),
            }
            .into(),
        );

        assert!(matches!(api_err, ApiError::Upstream(_, _)));
        assert_eq!(api_err.status_code(), 404);
        assert_eq!(api_err.message(), "Veículo não encontrado");
    }

    #[test]
    fn test_upstream_invalid_status_falls_back_to_bad_gateway() {
        let api_err = ApiError::upstream(42, "x");

        assert_eq!(api_err.status_code(), 502);
    }

    #[test]
    fn test_timeout_is_generic_server_error() {
        let api_err = ApiError::from_internal_error(LookupError::Timeout(30).into());

        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.message(), "Erro interno do servidor. Tente novamente.");
    }

    #[test]
    fn test_duplicate_field_is_conflict() {
        let api_err = ApiError::from_internal_error(RegistryError::Duplicate("CPF".to_string()).into());

        assert_eq!(api_err.status_code(), 409);
        assert_eq!(api_err.message(), "CPF já cadastrado");
    }

    #[test]
    fn test_empty_question_payload() {
        let api_err = ApiError::from_internal_error(AssistantError::EmptyQuestion.into());

        assert_eq!(api_err.status_code(), 400);
        assert_eq!(api_err.message(), "Pergunta é obrigatória.");
    }
}
