use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::{str::FromStr, time::Duration};
use tracing::{debug, warn};

use crate::erx::{Erx, Layouted, ResultE};
use crate::listing::source::PageSource;
use crate::web::api::Out;
use crate::web::messages::list::PagedList;
use crate::web::url::join as url_join;

pub struct ClientBuilder {
    base: String,
    headers: reqwest::header::HeaderMap,
    user_agent: Option<String>,
    timeout: Duration,
}

/// Thin json client over the upstream list api
#[derive(Clone)]
pub struct Client {
    base: String,
    cli: reqwest::Client,
}

static DEFAULT_USER_AGENT: &str = "MentorClap/0.1 (listing; en-IN)";

impl ClientBuilder {
    pub fn new(base: &str) -> ClientBuilder {
        ClientBuilder { base: base.to_string(), headers: reqwest::header::HeaderMap::new(), user_agent: None, timeout: Duration::from_secs(10) }
    }

    /// builder seeded from the `api` section of the config
    pub fn from_conf(api: &crate::conf::Api) -> ClientBuilder {
        let mut builder = ClientBuilder::new(&api.base);
        builder.set_timeout(Duration::from_secs(api.timeout_secs));
        if let Some(agent) = &api.user_agent {
            builder.set_user_agent(agent);
        }
        builder
    }

    pub fn set_user_agent(&mut self, agent: &str) -> &mut Self {
        self.user_agent = Some(agent.to_string());
        self
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn add_header(&mut self, key: &str, value: &str) -> ResultE<&mut Self> {
        let key = reqwest::header::HeaderName::from_str(key).map_err(crate::erx::amp("header name"))?;
        let value = reqwest::header::HeaderValue::from_str(value).map_err(crate::erx::amp("header value"))?;
        self.headers.insert(key, value);
        Ok(self)
    }

    pub fn use_json(&mut self) -> &mut Self {
        let val = reqwest::header::HeaderValue::from_static("application/json");
        self.headers.insert(reqwest::header::ACCEPT, val);
        self
    }

    pub fn build(&self) -> ResultE<Client> {
        let cli = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(crate::erx::emp)?;

        Ok(Client { base: self.base.clone(), cli })
    }
}

impl Client {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn get(&self, path: &str) -> ResultE<String> {
        let url = url_join(&self.base, path);
        debug!("GET {}", url);
        let response = self.cli.get(url).send().await.map_err(Self::transport_error)?;
        Self::response_untyped(response).await
    }

    fn transport_error(error: reqwest::Error) -> Erx {
        let mut e = Erx::coded(Layouted::fetch("HTTP", "0001"), &error.to_string());
        if let Some(url) = error.url() {
            e.add_extra("url", url.as_str());
        }
        e
    }

    fn status_error(status: reqwest::StatusCode, body: &str) -> Erx {
        let mut e = Erx::coded(Layouted::fetch("HTTP", &format!("{:04}", status.as_u16())), body);
        e.add_extra("status", status.as_str());
        e
    }

    async fn response_untyped(response: Response) -> ResultE<String> {
        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Self::status_error(status, &body))
        }
    }
}

/// Paged data source backed by a remote list endpoint
pub struct RemoteSource<T> {
    client: Client,
    path: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> RemoteSource<T> {
    pub fn new(client: Client, path: &str) -> Self {
        Self { client, path: path.to_string(), _item: PhantomData }
    }
}

#[async_trait]
impl<T> PageSource<T> for RemoteSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, query: &str) -> ResultE<PagedList<T>> {
        let target = if query.is_empty() { self.path.clone() } else { format!("{}?{}", self.path, query) };

        let body = self.client.get(&target).await.map_err(|e| {
            // the list api answers failures with the same envelope, keep its code
            let enveloped = e.extra_val("status").and_then(|_| serde_json::from_str::<Out<()>>(e.message()).ok());
            match enveloped.and_then(|out| out.into_result().err()) {
                Some(upstream) => upstream,
                None => {
                    warn!("remote page fetch failed: {}", e.description());
                    e
                },
            }
        })?;

        let out: Out<PagedList<T>> =
            serde_json::from_str(&body).map_err(|e| Erx::coded(Layouted::fetch("JSON", "0001"), &e.to_string()))?;
        out.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_from_conf() {
        let api = crate::conf::Api { base: "http://localhost:9/".to_string(), timeout_secs: 3, user_agent: Some("probe".to_string()) };
        let mut builder = ClientBuilder::from_conf(&api);
        builder.use_json();
        assert!(builder.add_header("X-Listing", "blogs").is_ok());
        assert!(builder.add_header("bad header", "x").is_err());

        let client = builder.build().unwrap();
        assert_eq!(client.base(), "http://localhost:9/");
    }

    #[test]
    fn test_status_error_code() {
        let e = Client::status_error(reqwest::StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(e.code().detail, "0502");
        assert_eq!(e.extra_val("status"), Some("502".to_string()));
    }
}
