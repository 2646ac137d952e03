use chrono::{Duration as ChronoDuration, Utc};
use catalog_auth::{JwtClaims, PrincipalId};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

pub const JWT_SECRET: &str = "test-secret";

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod over a fresh in-memory store, on an ephemeral port.
    pub async fn spawn() -> Self {
        let catalog = catalog_api::app::services::in_memory_catalog();
        let app = catalog_api::app::build_app(JWT_SECRET.to_string(), catalog);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn mint_jwt(jwt_secret: &str) -> String {
    let claims = JwtClaims::new(PrincipalId::new(), Utc::now(), ChronoDuration::minutes(10));

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}
