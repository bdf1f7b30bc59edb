use clap::{Args, Parser, Subcommand};
use triage_ai::error::AppError;
use triage_ai::triage::{Score, UnitType};

use crate::demo::{run_demo, run_score, DemoArgs};
use crate::infra::{parse_score, parse_unit_type};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Evacuation Triage Console",
    about = "Score patients and run the evacuation triage service from the command line",
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
    /// Compute a composite C.C.E.E. score and resource recommendation
    Score(ScoreArgs),
    /// Run an end-to-end CLI demo covering suggestion, scoring, and history
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

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Evacuation-difficulty score (F.E.P., 1-5)
    #[arg(long, value_parser = parse_score)]
    pub(crate) fep: Score,
    /// Oxygen-need score (1-5)
    #[arg(long, value_parser = parse_score)]
    pub(crate) oxygen_need: Score,
    /// Vital-signs monitoring score (1-5)
    #[arg(long, value_parser = parse_score)]
    pub(crate) vital_signs: Score,
    /// Medication/nutrition score (1-5)
    #[arg(long, value_parser = parse_score)]
    pub(crate) medication_nutrition: Score,
    /// Care setting: hospitalization, psychiatric, penitentiary, icu, isolation
    #[arg(long, value_parser = parse_unit_type)]
    pub(crate) unit_type: UnitType,
    /// Unit-specific scale score (1-5), read from the chosen care setting
    #[arg(long, value_parser = parse_score)]
    pub(crate) unit_scale: Score,
    /// Emit the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
