use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Decorators in [`super::auth`] wrap an inner
/// client to add credentials before delegating.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
