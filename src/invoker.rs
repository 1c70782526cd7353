//! The whole run: configuration, one request, output

use std::env::VarError;
use std::io::Write;
use log::{debug, error, info};
use crate::client::ChatClient;
use crate::config::ChatConfig;
use crate::error::Error;
use crate::request::ChatRequest;

/// Load configuration through `lookup`, then [`run`] it.
///
/// A configuration error returns before any client is built, so no
/// request leaves the process.
pub async fn run_with<F, O, D>(
  lookup: F
, out: &mut O
, diag: &mut D
) -> Result<(), Error>
where F: Fn(&str) -> Result<String, VarError>
    , O: Write
    , D: Write
{   let config = ChatConfig::from_lookup(lookup)?;
    run(&config, out, diag).await
}

/// Send the configured prompt pair and print the reply.
///
/// On success the raw response body goes to `diag` and the first
/// choice's text, undecorated, goes to `out`. On failure `out` is left
/// untouched.
pub async fn run<O, D>(
  config: &ChatConfig
, out: &mut O
, diag: &mut D
) -> Result<(), Error>
where O: Write
    , D: Write
{   let request = ChatRequest::from_config(config);
    let client = ChatClient::new(config)?;
    let completion = client.complete(&request).await?;

    writeln!(diag, "{}", completion.raw).map_err(output_error)?;
    let content = completion.response.first_content()?;

    debug!("Writing {} byte(s) of content", content.len());
    out.write_all(content.as_bytes()).map_err(output_error)?;
    out.flush().map_err(output_error)?;
    info!("Completion from {} written", config.model);
    Ok(())
}

fn output_error(e: std::io::Error) -> Error
{   error!("Failed to write output: {}", e);
    Error::Output(e.to_string())
}
