use crate::{Runner, Session};
use anyhow::Context;
use battery_sim_core::types::PredictionInput;
use clap::Parser;
use std::io::Write;

#[derive(Parser)]
pub(super) struct Cli {
    /// Charge cycles completed
    #[arg(long)]
    cycles: u32,

    /// Current temperature in degrees Celsius
    #[arg(long, allow_negative_numbers = true)]
    temperature: i32,

    /// Current state of charge, percent
    #[arg(long)]
    soc: i32,

    /// Average kilometres driven per day
    #[arg(long)]
    kms: i32,

    /// Battery age in months
    #[arg(long, default_value_t = 0)]
    months_old: u32,
}

impl From<&Cli> for PredictionInput {
    fn from(cli: &Cli) -> Self {
        Self {
            cycles: cli.cycles,
            temperature: cli.temperature,
            soc: cli.soc,
            kms: cli.kms,
            months_old: cli.months_old,
        }
    }
}

impl Runner for Cli {
    fn run(&self, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<()> {
        let health = session
            .system
            .battery()
            .predict_battery_health(&self.into())
            .context("prediction failed")?;

        writeln!(out, "Predicted Battery Health: {health}%")?;
        Ok(())
    }
}
