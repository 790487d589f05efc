use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use caproute_cli::commands::cities::handle_cities_command;
use caproute_cli::commands::route::{handle_route_command, RouteCommandArgs, RouteOptimization};
use caproute_cli::output::{print_footer, print_logo, OutputFormat};
use caproute_lib::{DEFAULT_FUEL_EFFICIENCY, DEFAULT_FUEL_PRICE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cheapest road trips between capital cities")]
struct Cli {
    /// Road graph JSON file. Falls back to CAPROUTE_DATASET, then the bundled capitals.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner and timing footer.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the cheapest route between two capitals.
    Route {
        /// Origin capital.
        #[arg(long = "from")]
        from: String,
        /// Destination capital.
        #[arg(long = "to")]
        to: String,
        /// Fuel price per liter.
        #[arg(long, default_value_t = DEFAULT_FUEL_PRICE)]
        fuel_price: f64,
        /// Vehicle fuel efficiency in km per liter.
        #[arg(long, default_value_t = DEFAULT_FUEL_EFFICIENCY)]
        efficiency: f64,
        /// Optimization objective.
        #[arg(long, value_enum, default_value_t = RouteOptimization::Cost)]
        optimize: RouteOptimization,
        /// Print the step-by-step search trace.
        #[arg(long)]
        trace: bool,
    },
    /// List the capitals with their tolls and road connections.
    Cities,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();
    let decorate = !cli.no_logo && !cli.format.is_json();

    if decorate {
        print_logo();
    }

    let exit_code = match cli.command {
        Command::Route {
            from,
            to,
            fuel_price,
            efficiency,
            optimize,
            trace,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                fuel_price,
                efficiency,
                optimize,
                trace,
            };
            handle_route_command(cli.dataset.as_deref(), cli.format, &args)?.exit_code()
        }
        Command::Cities => {
            handle_cities_command(cli.dataset.as_deref(), cli.format)?;
            ExitCode::SUCCESS
        }
    };

    if decorate {
        print_footer(started.elapsed());
    }

    Ok(exit_code)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
