use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ClientConfig, ServerConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};
use crate::dashboard::Locale;

/// Order/vehicle dispatch service and dashboard.
#[derive(Parser, Debug)]
#[command(name = "dispatch-dashboard", about = "Order/vehicle dispatch service and dashboard")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scheduling HTTP service
    Serve(ServeArgs),
    /// Print an example orders/vehicles payload
    Example(ExampleArgs),
    /// Submit orders and vehicles and render the result
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "DISPATCH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "DISPATCH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Static dashboard assets served at `/`
    #[arg(long, env = "DISPATCH_WEB_DIR")]
    pub web_dir: Option<PathBuf>,

    #[arg(long, env = "DISPATCH_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            web_dir: args.web_dir,
            max_body_bytes: args.max_body_bytes,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// Generate a random payload instead of the fixed example
    #[arg(long)]
    pub random: bool,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long = "orders", default_value_t = 5)]
    pub order_count: usize,

    #[arg(long = "vehicles", default_value_t = 2)]
    pub vehicle_count: usize,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// File holding the orders JSON array
    #[arg(long)]
    pub orders: Option<PathBuf>,

    /// File holding the vehicles JSON array
    #[arg(long)]
    pub vehicles: Option<PathBuf>,

    /// Start from the built-in example payload
    #[arg(long, conflicts_with_all = ["orders", "vehicles"])]
    pub example: bool,

    #[arg(long, env = "DISPATCH_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    pub server: String,

    /// Schedule in-process instead of calling the service
    #[arg(long)]
    pub local: bool,

    /// Also write the assignment table to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[arg(long, env = "DISPATCH_LOCALE", value_enum, default_value_t = Locale::Zh)]
    pub locale: Locale,
}

impl RunArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server.clone(),
            locale: self.locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_example() {
        let args = CliArgs::try_parse_from(["dispatch-dashboard", "run", "--example", "--locale", "en"]).unwrap();
        match args.command {
            Command::Run(run) => {
                assert!(run.example);
                assert_eq!(run.locale, Locale::En);
                assert!(!run.local);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn example_conflicts_with_files() {
        assert!(CliArgs::try_parse_from(["dispatch-dashboard", "run", "--example", "--orders", "o.json"]).is_err());
    }
}
