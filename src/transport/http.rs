use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Minimal HTTP surface the client and token manager need. Kept as a trait so
/// tests can inject a fake transport.
pub(crate) trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .header("Authorization", authorization)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        authorization: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header("Authorization", authorization)
                .header("Content-Type", "application/json; charset=utf-8")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}
