use std::io;
use log::debug;
use chatcall::{ChatConfig, Error};

async fn invoke() -> Result<(), Error>
{   let config = ChatConfig::from_env()?;
    let mut out = io::stdout();
    let mut diag = io::stderr();
    chatcall::run(&config, &mut out, &mut diag).await
}

#[tokio::main(flavor = "current_thread")]
async fn main()
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("off")
    ).init();
    debug!("chatcall starting");

    if let Err(e) = invoke().await
    {   eprintln!("chatcall: {}", e);
        std::process::exit(e.exit_code());
    }
}
