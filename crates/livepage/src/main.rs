//! livepage - static file server with browser live reload.
//!
//! Serves `./src` on `http://localhost:<port>` and reloads open pages when
//! an `.html`, `.css` or `.js` file under it changes.

mod error;
mod output;
mod serve;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;
use serve::ServeArgs;

/// livepage - static file server with browser live reload.
#[derive(Parser)]
#[command(name = "livepage", version, about)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // RUST_LOG overrides the default request logging level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = tokio::runtime::Runtime::new()
        .map_err(error::CliError::from)
        .and_then(|rt| rt.block_on(cli.serve.execute()));

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_port_defaults_to_8002() {
        let cli = Cli::try_parse_from(["livepage"]).unwrap();

        assert_eq!(format!("{:?}", cli.serve), "ServeArgs { port: 8002 }");
    }

    #[test]
    fn test_port_is_positional() {
        let cli = Cli::try_parse_from(["livepage", "9001"]).unwrap();

        assert_eq!(format!("{:?}", cli.serve), "ServeArgs { port: 9001 }");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["livepage", "http"]).is_err());
        assert!(Cli::try_parse_from(["livepage", "70000"]).is_err());
        assert!(Cli::try_parse_from(["livepage", "8002", "extra"]).is_err());
    }
}
