//! Notely Client: typed access to the Notely HTTP API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), notely_client::ClientError> {
//! let client = notely_client::NotelyClient::new("http://127.0.0.1:5000");
//! let session = client.login("admin@acme.test", "password").await?;
//! match client.create_note(&session, "Groceries", "milk").await {
//!     Err(e) if e.is_quota_exceeded() => {
//!         client.upgrade_own_tenant(&session).await?;
//!     }
//!     other => {
//!         other?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod session;

use notely_core::error::ErrorCode;
use notely_core::models::note::Note;
use notely_core::models::tenant::Plan;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::ClientError;
pub use session::Session;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

#[derive(Deserialize)]
struct ErrorReply {
    code: ErrorCode,
    message: String,
}

/// Outcome of a plan upgrade.
#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeReply {
    pub message: String,
    pub plan: Plan,
}

pub struct NotelyClient {
    base_url: String,
    http: reqwest::Client,
}

impl NotelyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(session.token())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        let reply: LoginReply = read(response).await?;
        Session::from_token(reply.token)
    }

    /// Notes of the session's tenant, newest first.
    pub async fn list_notes(&self, session: &Session) -> Result<Vec<Note>> {
        let request = self.authed(self.http.get(self.url("/notes")), session);
        read(request.send().await?).await
    }

    pub async fn create_note(&self, session: &Session, title: &str, content: &str) -> Result<Note> {
        let request = self
            .authed(self.http.post(self.url("/notes")), session)
            .json(&NoteBody { title, content });
        read(request.send().await?).await
    }

    pub async fn get_note(&self, session: &Session, id: Uuid) -> Result<Note> {
        let request = self.authed(self.http.get(self.url(&format!("/notes/{id}"))), session);
        read(request.send().await?).await
    }

    pub async fn update_note(
        &self,
        session: &Session,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note> {
        let request = self
            .authed(self.http.put(self.url(&format!("/notes/{id}"))), session)
            .json(&NoteBody { title, content });
        read(request.send().await?).await
    }

    pub async fn delete_note(&self, session: &Session, id: Uuid) -> Result<()> {
        let request = self.authed(self.http.delete(self.url(&format!("/notes/{id}"))), session);
        let _: serde_json::Value = read(request.send().await?).await?;
        Ok(())
    }

    pub async fn upgrade_tenant(&self, session: &Session, slug: &str) -> Result<UpgradeReply> {
        let request = self.authed(
            self.http.post(self.url(&format!("/tenants/{slug}/upgrade"))),
            session,
        );
        read(request.send().await?).await
    }

    /// Upgrade the tenant the session belongs to.
    pub async fn upgrade_own_tenant(&self, session: &Session) -> Result<UpgradeReply> {
        self.upgrade_tenant(session, session.tenant_slug()).await
    }
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await?;
    match serde_json::from_str::<ErrorReply>(&body) {
        Ok(err) => Err(ClientError::Api {
            status: status.as_u16(),
            code: err.code,
            message: err.message,
        }),
        Err(_) => Err(ClientError::UnexpectedResponse {
            status: status.as_u16(),
            body,
        }),
    }
}
