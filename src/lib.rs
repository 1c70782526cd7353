pub mod error;
pub mod config;
pub mod request;
pub mod client;
pub mod invoker;

pub use client::ChatClient;
pub use config::ChatConfig;
pub use error::{Error, ErrorKind};
pub use invoker::{run, run_with};
pub use request::{ChatMessage, ChatRequest, ChatResponse, Role};

/*

chatcall: send one system/user prompt pair to an OpenAI-compatible
chat-completion endpoint and print the first choice's text.

chatcall/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and provider presets
│   ├── error.rs        # Error type, kinds and exit codes
│   ├── config.rs       # Environment-driven configuration
│   ├── request.rs      # Wire request/response types
│   ├── client.rs       # The single HTTP call
│   ├── invoker.rs      # config -> request -> call -> output
│   └── main.rs         # Binary entry point
└── tests/              # Mock-server and binary tests

*/

/// Endpoint presets. A preset decides which key variable is read and
/// what base URL / model are used when the environment does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider
{
  /// Any OpenAI-compatible endpoint; base URL and model are required
  Generic
  ,
  /// xAI (Grok models)
  Xai
}

impl Provider
{   /// Environment variable holding the bearer key for this preset
    pub fn api_key_var(&self) -> &'static str
    {   match self
        {   Provider::Generic => "CHAT_API_KEY"
          , Provider::Xai => "X_API_KEY"
        }
    }

    /// Base URL used when `CHAT_BASE_URL` is unset
    pub fn default_base_url(&self) -> Option<&'static str>
    {   match self
        {   Provider::Generic => None
          , Provider::Xai => Some("https://api.x.ai/v1")
        }
    }

    /// Model used when `CHAT_MODEL` is unset
    pub fn default_model(&self) -> Option<&'static str>
    {   match self
        {   Provider::Generic => None
          , Provider::Xai => Some("grok-3-latest")
        }
    }
}
