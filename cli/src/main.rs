mod interactive;
mod predict;
mod simulate;

use anyhow::Context;
use battery_sim_core::{config::SimulationConfig, ignition::IgnitionSystem};
use clap::{Parser, Subcommand};
use log::debug;
use rand::rngs::StdRng;
use std::{io::Write, path::PathBuf};

/// Two-wheeler battery health simulator.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Simulation configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for health check jitter, overrides the configuration file
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Menu driven session (default)
    Interactive,

    /// Predict battery health from usage figures
    Predict(predict::Cli),

    /// Run a sequence of charge, discharge and health check steps
    Simulate(simulate::Cli),

    /// Show battery status and replacement estimate
    Status,
}

pub(crate) struct Session {
    pub(crate) system: IgnitionSystem,
    pub(crate) rng: StdRng,
}

impl Session {
    fn new(config: &SimulationConfig) -> anyhow::Result<Self> {
        Ok(Self {
            system: config
                .build_system()
                .context("failed to prepare battery model")?,
            rng: config.rng(),
        })
    }
}

trait Runner {
    fn run(&self, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<()>;
}

struct Status;

impl Runner for Status {
    fn run(&self, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", session.system.battery_status_message())?;
        writeln!(out, "{}", session.system.estimate_battery_replacement())?;
        Ok(())
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    debug!("Configuration: {config:?}");
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut session = Session::new(&config)?;

    let runner: Box<dyn Runner> = match cli.command {
        None | Some(Command::Interactive) => Box::new(interactive::Menu),
        Some(Command::Predict(args)) => Box::new(args),
        Some(Command::Simulate(args)) => Box::new(args),
        Some(Command::Status) => Box::new(Status),
    };

    let stdout = std::io::stdout();
    runner.run(&mut session, &mut stdout.lock())
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_command_is_interactive() {
        let cli = Cli::try_parse_from(["battery-sim"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn seed_overrides_config() {
        let cli = Cli::try_parse_from(["battery-sim", "--seed", "4", "status"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.simulation.seed, Some(4));
    }

    #[test]
    fn missing_config_file() {
        let cli =
            Cli::try_parse_from(["battery-sim", "--config", "/nonexistent/sim.toml"]).unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn status() {
        let mut session = test_support::session();
        let mut out = Vec::new();
        Status.run(&mut session, &mut out).unwrap();

        assert_eq!(
            test_support::output(out),
            "Battery is Off due to the engine has been running.\n\
             Battery health is within an acceptable range (between 20% and 100%).\n"
        );
    }
}
