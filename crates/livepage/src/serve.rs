//! Serve command implementation.

use std::path::Path;

use clap::Args;
use livepage_server::{DEFAULT_PORT, Server, ServerConfig, shutdown_signal};
use tokio_util::sync::CancellationToken;

use crate::error::CliError;
use crate::output::Output;

/// Host the server binds to and advertises.
const HOST: &str = "localhost";

/// Directory served, relative to the working directory.
const SOURCE_DIR: &str = "src";

/// Arguments for serving.
#[derive(Args, Debug)]
pub(crate) struct ServeArgs {
    /// Port to listen on.
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,
}

impl ServeArgs {
    /// Serve `./src` until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or the
    /// server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.server_config(&std::env::current_dir()?);
        let root_dir = config.root_dir.clone();
        let server = Server::bind(config).await?;
        let port = server.local_addr()?.port();

        output.highlight(&format!("Server running on http://{HOST}:{port}"));
        output.info(&format!("Serving {}", root_dir.display()));

        let shutdown = CancellationToken::new();
        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            Output::new().info("\nShutting down...");
            signal_token.cancel();
        });

        server.run(shutdown).await?;
        Ok(())
    }

    /// Build the server configuration for a working directory.
    fn server_config(&self, cwd: &Path) -> ServerConfig {
        ServerConfig {
            host: HOST.to_owned(),
            port: self.port,
            root_dir: cwd.join(SOURCE_DIR),
            ..ServerConfig::default()
        }
    }
}
