use std::fmt;

/// Longest slice of an error body kept in `ApiError`
pub const MAX_BODY_SNIPPET: usize = 512;

/// Broad failure classes. Callers branch on these, the binary maps
/// them to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   /// Environment incomplete or malformed; no request was sent
    Configuration
  , /// Service unreachable, timed out, or answered non-2xx
    Transport
  , /// Service answered 2xx but not with a usable completion
    ResponseShape
  , /// Writing to stdout/stderr failed
    Output
}

/// Custom error type for chatcall operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Required environment variable is unset or empty
    MissingVariable(String)
  , /// Environment variable present but unusable
    InvalidConfiguration(String)
  , /// HTTP request error
    HttpError(String)
  , /// Request timed out
    Timeout
  , /// API returned a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// First choice carried no text
    EmptyContent
  , /// Could not write to an output channel
    Output(String)
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::MissingVariable(_)
          | Error::InvalidConfiguration(_) => ErrorKind::Configuration
          , Error::HttpError(_)
          | Error::Timeout
          | Error::ApiError { .. } => ErrorKind::Transport
          , Error::ParseError(_)
          | Error::NoChoicesInResponse
          | Error::EmptyContent => ErrorKind::ResponseShape
          , Error::Output(_) => ErrorKind::Output
        }
    }

    /// Process exit status for this error. Never 0.
    pub fn exit_code(&self) -> i32
    {   match self.kind()
        {   ErrorKind::Configuration => 2
          , ErrorKind::Transport => 3
          , ErrorKind::ResponseShape => 4
          , ErrorKind::Output => 1
        }
    }

    /// Build an `ApiError`, cutting the body down to a snippet
    pub fn api(status: u16, body: &str) -> Self
    {   Error::ApiError
        {   status
          , body: snippet(body, MAX_BODY_SNIPPET)
        }
    }
}

fn snippet(body: &str, max: usize) -> String
{   let body = body.trim();
    if body.len() <= max
    {   return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end)
    {   end -= 1;
    }
    format!("{}...", &body[..end])
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingVariable(name) => {
              write!(f,
                "Missing required environment variable: {}",
                name
              )
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error (status {}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::EmptyContent => {
              write!(f,
                "First choice in API response has no content"
              )
            }
          , Error::Output(msg) => {
              write!(f, "Output error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
