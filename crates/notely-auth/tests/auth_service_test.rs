//! Integration tests for the authentication service.

use notely_auth::config::AuthConfig;
use notely_auth::error::AuthError;
use notely_auth::service::{AuthService, LoginInput};
use notely_auth::token;
use notely_core::error::NotelyError;
use notely_core::models::tenant::CreateTenant;
use notely_core::models::user::{CreateUser, Role};
use notely_core::repository::{TenantRepository, UserRepository};
use notely_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Service = AuthService<SurrealUserRepository<Db>, SurrealTenantRepository<Db>>;

fn test_config() -> AuthConfig {
    let mut config = AuthConfig::with_secret("auth-service-test");
    config.jwt_issuer = "notely-test".into();
    config
}

/// In-memory DB with tenant `acme` and two users.
async fn setup_with(config: AuthConfig) -> (Service, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    notely_db::run_migrations(&db).await.unwrap();

    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let tenant = tenant_repo
        .create(CreateTenant {
            name: "Acme".into(),
            slug: "acme".into(),
        })
        .await
        .unwrap();

    let user_repo = SurrealUserRepository::with_pepper(db.clone(), config.pepper.clone());
    for (email, role) in [
        ("admin@acme.test", Role::Admin),
        ("user@acme.test", Role::Member),
    ] {
        user_repo
            .create(CreateUser {
                tenant_id: tenant.id,
                email: email.into(),
                password: "password".into(),
                role,
            })
            .await
            .unwrap();
    }

    (AuthService::new(user_repo, tenant_repo, config), tenant.id)
}

async fn setup() -> (Service, Uuid) {
    setup_with(test_config()).await
}

fn login(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn login_issues_token_with_identity() {
    let (svc, tenant_id) = setup().await;

    let out = svc.login(login("admin@acme.test", "password")).await.unwrap();

    assert_eq!(out.expires_in, 3600);
    assert_eq!(out.claims.tenant_id, tenant_id);
    assert_eq!(out.claims.role, Role::Admin);
    assert_eq!(out.claims.tenant_slug, "acme");

    let decoded = token::decode_access_token(&out.access_token, svc.config()).unwrap();
    assert_eq!(decoded.identity(), out.claims);
    assert_eq!(decoded.iss, "notely-test");
}

#[tokio::test]
async fn member_login_carries_member_role() {
    let (svc, _) = setup().await;
    let out = svc.login(login("user@acme.test", "password")).await.unwrap();
    assert_eq!(out.claims.role, Role::Member);
}

#[tokio::test]
async fn email_lookup_ignores_case_and_whitespace() {
    let (svc, _) = setup().await;
    let out = svc
        .login(login("  Admin@ACME.test ", "password"))
        .await
        .unwrap();
    assert_eq!(out.claims.role, Role::Admin);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let (svc, _) = setup().await;

    let unknown = svc
        .login(login("nobody@acme.test", "password"))
        .await
        .unwrap_err();
    let wrong = svc
        .login(login("admin@acme.test", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(unknown, NotelyError::AuthenticationFailed { .. }));
    assert!(matches!(wrong, NotelyError::AuthenticationFailed { .. }));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn authenticate_accepts_issued_token() {
    let (svc, _) = setup().await;
    let out = svc.login(login("user@acme.test", "password")).await.unwrap();

    let claims = svc.authenticate(&out.access_token).unwrap();
    assert_eq!(claims, out.claims);
}

#[tokio::test]
async fn authenticate_rejects_tampered_token() {
    let (svc, _) = setup().await;
    let out = svc.login(login("user@acme.test", "password")).await.unwrap();

    let mut tampered = out.access_token.clone();
    tampered.push('x');
    let err = svc.authenticate(&tampered).unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid(_)));
}

#[tokio::test]
async fn pepper_must_match_on_both_sides() {
    let mut config = test_config();
    config.pepper = Some("server-pepper".into());
    let (svc, _) = setup_with(config).await;

    assert!(svc.login(login("user@acme.test", "password")).await.is_ok());
    assert!(
        svc.login(login("user@acme.test", "server-pepperpassword"))
            .await
            .is_err()
    );
}
