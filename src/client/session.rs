use std::collections::BTreeMap;

use reqwest::{Client, Method, Response};
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

use crate::config::Settings;
use crate::render::Printer;
use crate::shell::error::{CliError, CliResult};
use crate::shell::payload::Params;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const REGION_HEADER: &str = "X-Region";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Authenticated transport handed to every handler.
#[derive(Clone, Debug)]
pub struct Session {
    client: Client,
    endpoint: Option<Url>,
    services: BTreeMap<String, Url>,
    token: Option<String>,
    region: Option<String>,
    printer: Printer,
}

impl Session {
    pub fn from_settings(settings: &Settings) -> CliResult<Self> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.timeout)
            .build()
            .map_err(|err| CliError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            services: settings.services.clone(),
            token: settings.token.clone(),
            region: settings.region.clone(),
            printer: Printer::new(settings.output),
        })
    }

    /// A session against `endpoint` with default settings otherwise.
    pub fn new(endpoint: &str, token: Option<String>) -> CliResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| CliError::Config(format!("invalid endpoint `{endpoint}`: {err}")))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| CliError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            endpoint: Some(endpoint),
            services: BTreeMap::new(),
            token,
            region: None,
            printer: Printer::default(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("cloudadm/", env!("CARGO_PKG_VERSION"))
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// Base URL of `service`: an explicit override, or `<endpoint>/<service>`.
    pub fn service_url(&self, service: &str) -> CliResult<Url> {
        if let Some(url) = self.services.get(service) {
            return Ok(url.clone());
        }
        let mut url = self.endpoint.clone().ok_or_else(|| {
            CliError::Config("endpoint is required (use --endpoint or CLOUDADM_ENDPOINT)".into())
        })?;
        url.path_segments_mut()
            .map_err(|()| CliError::Config("endpoint cannot carry a path".into()))?
            .pop_if_empty()
            .push(service);
        Ok(url)
    }

    /// Issue one call. `context` names the resource in error messages.
    pub async fn request(
        &self,
        method: Method,
        service: &str,
        segments: &[&str],
        query: Option<&Params>,
        body: Option<Value>,
        context: &str,
    ) -> CliResult<Value> {
        let mut url = self.service_url(service)?;
        url.path_segments_mut()
            .map_err(|()| CliError::Config(format!("{service} URL cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_query() {
                pairs.append_pair(&key, &value);
            }
        }

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        if let Some(token) = self.token.as_deref() {
            req = req.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(region) = self.region.as_deref() {
            req = req.header(REGION_HEADER, region);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        tracing::debug!(%method, %url, status = resp.status().as_u16(), "remote call");
        Self::handle(resp, context).await
    }

    async fn handle(resp: Response, context: &str) -> CliResult<Value> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("no response body").to_string()
            } else {
                text
            };
            return Err(CliError::Remote {
                resource: context.to_string(),
                status: status.as_u16(),
                message,
            });
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| CliError::Decode(format!("{context}: failed to parse body: {err}")))
    }
}
