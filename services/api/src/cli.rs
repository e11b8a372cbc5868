use crate::demo::{run_demo, run_quote, run_simulate, DemoArgs, QuoteArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use creditsmart::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CreditSmart",
    about = "Serve the CreditSmart catalog, simulator and application API, or explore it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Search the credit catalog the way the simulator page does
    Simulate(SimulateArgs),
    /// Estimate the monthly installment for a product, amount and term
    Quote(QuoteArgs),
    /// Walk an application form session end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulate(args),
        Command::Quote(args) => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditsmart::workflows::simulator::AmountRange;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["creditsmart-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn simulate_accepts_range_tokens() {
        let cli = Cli::try_parse_from([
            "creditsmart-api",
            "simulate",
            "--query",
            "veh",
            "--range",
            "5000000-20000000",
        ])
        .expect("parses");
        let Some(Command::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.query.as_deref(), Some("veh"));
        assert_eq!(args.range, AmountRange::From5MTo20M);
    }

    #[test]
    fn simulate_rejects_unknown_range() {
        let parsed = Cli::try_parse_from(["creditsmart-api", "simulate", "--range", "1-2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn quote_requires_every_input() {
        let parsed = Cli::try_parse_from(["creditsmart-api", "quote", "--product", "libre"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "creditsmart-api",
            "quote",
            "--product",
            "libre",
            "--amount",
            "$ 50.000.000",
            "--term",
            "60",
        ])
        .expect("parses");
        let Some(Command::Quote(args)) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.term, 60);
    }
}
