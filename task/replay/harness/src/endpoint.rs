use anyhow::{Context, Result};
use log::*;
use replay_proto::{MoveResponse, Phase};
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////

/// The game server as seen by the driver: one call per phase, each taking a
/// raw transcript record as its body.
#[allow(async_fn_in_trait)]
pub trait Endpoint {
    /// The server's customisation, e.g. `{"color": "#DEA584"}`.
    async fn start(&mut self, body: &str) -> Result<Value>;
    async fn get_move(&mut self, body: &str) -> Result<MoveResponse>;
    async fn end(&mut self, body: &str) -> Result<()>;
}

impl<T: Endpoint> Endpoint for &mut T {
    async fn start(&mut self, body: &str) -> Result<Value> {
        T::start(self, body).await
    }

    async fn get_move(&mut self, body: &str) -> Result<MoveResponse> {
        T::get_move(self, body).await
    }

    async fn end(&mut self, body: &str) -> Result<()> {
        T::end(self, body).await
    }
}

////////////////////////////////////////////////////////////////////////////////

pub struct HttpEndpoint {
    client: Client,
    base_url: String,
}

impl HttpEndpoint {
    pub fn new(address: &str, port: u16) -> Result<Self> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .context("failed to create http client")?;
        Ok(Self {
            client,
            base_url: format!("http://{address}:{port}"),
        })
    }

    async fn post(&self, phase: Phase, body: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, phase.route());
        trace!("POST {url} ({} bytes)", body.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        response
            .error_for_status()
            .with_context(|| format!("POST {url}"))
    }
}

impl Endpoint for HttpEndpoint {
    async fn start(&mut self, body: &str) -> Result<Value> {
        let response = self.post(Phase::Start, body).await?;
        response
            .json::<Value>()
            .await
            .context("failed to decode /start response")
    }

    async fn get_move(&mut self, body: &str) -> Result<MoveResponse> {
        let response = self.post(Phase::Move, body).await?;
        response
            .json::<MoveResponse>()
            .await
            .context("failed to decode /move response")
    }

    async fn end(&mut self, body: &str) -> Result<()> {
        self.post(Phase::End, body).await?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
