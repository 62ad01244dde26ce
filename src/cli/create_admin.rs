use crate::app_data::AppData;
use crate::services::crypto::generate_secure_password;
use crate::types::internal::audit::EventType;
use crate::types::internal::context::RequestContext;

/// Create an admin profile from the command line
///
/// A random password is generated and printed once when none is given.
pub async fn create_admin(
    app_data: &AppData,
    email: &str,
    nome: &str,
    telefone: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("create-admin");

    let generated = password.is_none();
    let password = password.unwrap_or_else(generate_secure_password);

    let profile = app_data
        .credential_store
        .create_admin(nome, email, telefone, &password)
        .await?;

    app_data
        .audit_logger
        .builder(EventType::AdminCreated)
        .with_context(&ctx)
        .resource("profile", Some(profile.user_id.clone()))
        .add_sensitive("email", &profile.email)
        .write()
        .await?;

    println!("Admin created: {} ({})", profile.nome, profile.email);
    if generated {
        println!("Generated password (shown once): {}", password);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{AdminCredentialStore, AdminVerification};
    use crate::test::utils::setup_test_app_data;

    #[tokio::test]
    async fn test_create_admin_with_given_password() {
        let app_data = setup_test_app_data().await;

        create_admin(&app_data, "Admin@Example.com", "Admin", None, Some("senha-forte".to_string()))
            .await
            .unwrap();

        let verification = app_data
            .credential_store
            .verify_admin("admin@example.com", "senha-forte")
            .await
            .unwrap();
        assert!(matches!(verification, AdminVerification::Verified(_)));

        let events = app_data.audit_store.recent_events(10).await.unwrap();
        assert_eq!(events[0].action, "admin_created");
    }

    #[tokio::test]
    async fn test_create_admin_twice_fails() {
        let app_data = setup_test_app_data().await;
        create_admin(&app_data, "admin@example.com", "Admin", None, None).await.unwrap();

        let result = create_admin(&app_data, "admin@example.com", "Outro", None, None).await;

        assert!(result.is_err());
    }
}
