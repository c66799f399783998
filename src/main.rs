use std::fs::{self, File};

use clap::Parser;
use dispatch_dashboard::cli::{CliArgs, Command, ExampleArgs, RunArgs};
use dispatch_dashboard::config;
use dispatch_dashboard::dashboard::example::{example_orders, example_vehicles, random_payload};
use dispatch_dashboard::dashboard::view::{format_view, write_csv};
use dispatch_dashboard::dashboard::{Dashboard, HttpBackend, LocalBackend, Phase};
use dispatch_dashboard::web;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_dotenv();
    let args = CliArgs::parse();

    // The server logs requests; the client commands only report problems
    let default_level = match args.command {
        Command::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Serve(serve) => web::start_server(serve.into()).await?,
        Command::Example(example) => print_example(&example)?,
        Command::Run(run) => {
            if run_dashboard(&run).await? == Phase::Errored {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_example(args: &ExampleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let payload = if args.random {
        let (orders, vehicles) = random_payload(args.seed, args.order_count, args.vehicle_count);
        serde_json::json!({ "orders": orders, "vehicles": vehicles })
    } else {
        serde_json::json!({ "orders": example_orders(), "vehicles": example_vehicles() })
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn run_dashboard(args: &RunArgs) -> Result<Phase, Box<dyn std::error::Error>> {
    let config = args.client_config();
    let mut dashboard = Dashboard::new(config.locale);

    if args.example {
        dashboard.load_example();
    }
    if let Some(path) = &args.orders {
        dashboard.orders_input = fs::read_to_string(path)?;
    }
    if let Some(path) = &args.vehicles {
        dashboard.vehicles_input = fs::read_to_string(path)?;
    }

    let phase = if args.local {
        dashboard.run_schedule(&LocalBackend).await
    } else {
        dashboard.run_schedule(&HttpBackend::new(&config.server_url)).await
    };

    print!("{}", format_view(dashboard.view(), config.locale));

    if let Some(path) = &args.csv {
        write_csv(dashboard.view(), config.locale, File::create(path)?)?;
        println!("Assignments saved to: {}", path.display());
    }

    Ok(phase)
}
