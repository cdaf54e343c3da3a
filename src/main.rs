//! Mouffette Server - Entry Point
//!
//! WebSocket relay that lets clients discover each other and exchange
//! media-sharing messages.

use log::{info, warn};
use std::process::ExitCode;

use mouffette_server::error::ServerError;
use mouffette_server::error::handlers::handle_error;
use mouffette_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default `info` filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let port = parse_port_arg(std::env::args().nth(1))?;
    let config = ServerConfig::load(port)?;

    info!("Launching Mouffette relay...");

    let server = Server::bind(config).await?;
    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for termination signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

/// The only command line argument is an optional listen port.
fn parse_port_arg(arg: Option<String>) -> Result<Option<u16>, ServerError> {
    arg.map(|raw| {
        raw.parse::<u16>()
            .map_err(|_| ServerError::InvalidArgument(format!("not a port number: {}", raw)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_argument_is_optional() {
        assert_eq!(parse_port_arg(None).unwrap(), None);
        assert_eq!(parse_port_arg(Some("9000".to_string())).unwrap(), Some(9000));
        assert!(parse_port_arg(Some("http".to_string())).is_err());
    }
}
