use log::{debug, trace, error};
use crate::config::ChatConfig;
use crate::error::Error;
use crate::request::{ChatRequest, ChatResponse};

/// A parsed response together with the body it was parsed from
#[derive(Debug, Clone)]
pub struct Completion
{   pub raw: String
  , pub response: ChatResponse
}

/// HTTP client for one chat-completion endpoint
pub struct ChatClient
{   http_client: reqwest::Client
  , url: String
  , api_key: String
}

impl ChatClient
{   /// Create a client bound to the configured endpoint and timeout
    pub fn new(config: &ChatConfig) -> Result<Self, Error>
    {   debug!("Creating ChatClient for {}", config.base_url);
        let http_client = reqwest::Client::builder()
          .timeout(config.timeout)
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            Error::HttpError(e.to_string())
          })?;
        Ok(ChatClient
        {   http_client
          , url: config.completions_url()
          , api_key: config.api_key.clone()
        })
    }

    /// Send `request` once and parse the reply
    pub async fn complete(
      &self
    , request: &ChatRequest
    ) -> Result<Completion, Error>
    {   debug!("POST {} (model: {})", self.url, request.model);
        trace!("Chat request: {:?}", request);

        let response = self.http_client
          .post(&self.url)
          .bearer_auth(&self.api_key)
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::from(e)
          })?;

        let status = response.status();
        trace!("Chat response status: {}", status);

        let raw = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::from(e)
        })?;

        if !status.is_success()
        {   error!("API error {}: {}", status, raw);
            return Err(Error::api(status.as_u16(), &raw));
        }

        let response: ChatResponse
          = serde_json::from_str(&raw).map_err(|e| {
            error!("Parse error: {}", e);
            Error::from(e)
          })?;
        debug!("Received {} choice(s)", response.choices.len());

        Ok(Completion { raw, response })
    }
}
