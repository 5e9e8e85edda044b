//! Client tests against a real listener on an ephemeral port.

use notely_auth::AuthConfig;
use notely_client::{ClientError, NotelyClient};
use notely_core::error::ErrorCode;
use notely_core::models::tenant::Plan;
use notely_core::models::user::Role;
use notely_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use notely_db::{DbConfig, DbManager};
use notely_server::seed::{DEMO_PASSWORD, seed};
use notely_server::{AppState, router};
use tokio::net::TcpListener;
use uuid::Uuid;

async fn spawn_server() -> NotelyClient {
    let db = DbManager::connect(&DbConfig::default()).await.unwrap();
    let client = db.client().clone();
    seed(
        &SurrealTenantRepository::new(client.clone()),
        &SurrealUserRepository::new(client.clone()),
    )
    .await
    .unwrap();
    let app = router(AppState::new(client, AuthConfig::with_secret("client-test")));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    NotelyClient::new(format!("http://{addr}/"))
}

#[tokio::test]
async fn login_decodes_session_claims() {
    let client = spawn_server().await;

    let session = client.login("user@acme.test", DEMO_PASSWORD).await.unwrap();
    assert_eq!(session.tenant_slug(), "acme");
    assert_eq!(session.claims().role, Role::Member);
    assert!(!session.is_admin());
    assert!(session.expires_at() > 0);
}

#[tokio::test]
async fn wrong_password_is_an_api_error() {
    let client = spawn_server().await;

    let err = client.login("user@acme.test", "nope").await.unwrap_err();
    match err {
        ClientError::Api { status, code, .. } => {
            assert_eq!(status, 401);
            assert_eq!(code, ErrorCode::InvalidCredentials);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn note_lifecycle() {
    let client = spawn_server().await;
    let session = client.login("user@acme.test", DEMO_PASSWORD).await.unwrap();

    let note = client
        .create_note(&session, "Groceries", "milk")
        .await
        .unwrap();
    assert_eq!(note.user_id, session.claims().user_id);

    let fetched = client.get_note(&session, note.id).await.unwrap();
    assert_eq!(fetched.title, "Groceries");

    let updated = client
        .update_note(&session, note.id, "Groceries", "milk, eggs")
        .await
        .unwrap();
    assert_eq!(updated.content, "milk, eggs");

    assert_eq!(client.list_notes(&session).await.unwrap().len(), 1);

    client.delete_note(&session, note.id).await.unwrap();
    let err = client.get_note(&session, note.id).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));

    let err = client.get_note(&session, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[tokio::test]
async fn quota_prompts_upgrade() {
    let client = spawn_server().await;
    let admin = client.login("admin@globex.test", DEMO_PASSWORD).await.unwrap();

    for title in ["a", "b", "c"] {
        client.create_note(&admin, title, "").await.unwrap();
    }
    let err = client.create_note(&admin, "d", "").await.unwrap_err();
    assert!(err.is_quota_exceeded());
    assert!(!err.is_session_expired());

    let reply = client.upgrade_own_tenant(&admin).await.unwrap();
    assert_eq!(reply.plan, Plan::Pro);

    client.create_note(&admin, "d", "").await.unwrap();
}

#[tokio::test]
async fn member_cannot_upgrade() {
    let client = spawn_server().await;
    let member = client.login("user@globex.test", DEMO_PASSWORD).await.unwrap();

    let err = client.upgrade_own_tenant(&member).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::AccessDenied));
}

#[tokio::test]
async fn forged_session_is_reported_as_expired() {
    let client = spawn_server().await;
    let real = client.login("user@acme.test", DEMO_PASSWORD).await.unwrap();

    // Keep the header and payload, drop the signature.
    let (unsigned, _) = real.token().rsplit_once('.').unwrap();
    let forged = notely_client::Session::from_token(format!("{unsigned}.AAAA")).unwrap();

    let err = client.list_notes(&forged).await.unwrap_err();
    assert!(err.is_session_expired());
}
