//! Wire request and response types for the chat-completion endpoint

use serde::{Deserialize, Serialize};
use log::error;
use crate::config::ChatConfig;
use crate::error::Error;

// ===== Message Types =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
}

impl ChatRequest
{   /// Build the request for one run: system message first, then user
    pub fn from_config(config: &ChatConfig) -> Self
    {   ChatRequest
        {   model: config.model.clone()
          , messages: vec![
              ChatMessage
              {   role: Role::System
                , content: config.system_prompt.clone()
              }
            , ChatMessage
              {   role: Role::User
                , content: config.user_prompt.clone()
              }
            ]
          , temperature: config.temperature
        }
    }
}

// ===== Response Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ResponseMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Assistant message. Role is whatever the service sends back.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

impl ChatResponse
{   /// Text of the first choice
    pub fn first_content(&self) -> Result<&str, Error>
    {   let choice = self.choices.first().ok_or_else(|| {
          error!("No choices in response");
          Error::NoChoicesInResponse
        })?;
        match choice.message.content.as_deref()
        {   Some(text) if !text.is_empty() => Ok(text)
          , _ => {
              error!(
                "First choice has no content (finish_reason: {:?})",
                choice.finish_reason
              );
              Err(Error::EmptyContent)
            }
        }
    }
}
