use crate::{Runner, Session};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use log::info;
use std::io::Write;

#[derive(Parser)]
pub(super) struct Cli {
    /// Number of health checks to run
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Operating temperature used for health checks, degrees Celsius
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    temperature: f64,

    /// Ambient temperature while charging and discharging, defaults to the operating temperature
    #[arg(long, allow_negative_numbers = true)]
    ambient: Option<f64>,

    /// Simulated time between steps, in minutes
    #[arg(long, default_value_t = 60)]
    interval: u32,
}

impl Cli {
    fn simulate(
        &self,
        session: &mut Session,
        start: DateTime<Utc>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let ambient = self.ambient.unwrap_or(self.temperature);
        let interval = Duration::try_minutes(i64::from(self.interval))
            .context("simulation interval is out of range")?;

        writeln!(out, "{}", session.system.start_engine())?;

        for step in 0..self.steps {
            let now = i32::try_from(step)
                .ok()
                .and_then(|step| interval.checked_mul(step))
                .and_then(|elapsed| start.checked_add_signed(elapsed))
                .with_context(|| format!("simulated time overflows at step {}", step + 1))?;

            let battery = session.system.battery_mut();
            battery.discharge_battery(ambient);
            battery.charge_battery(ambient, now);
            let health = battery.check_battery_health(self.temperature, &mut session.rng)?;

            writeln!(
                out,
                "Step {}: health {:.1}% ({}), status {}, state of charge {:.1}%",
                step + 1,
                health,
                battery.band(),
                battery.status(),
                battery.state_of_charge()
            )?;
            for suggestion in battery.suggestions() {
                writeln!(out, "  {suggestion}")?;
            }
        }

        info!(
            "Simulated {} steps, {} cycles recorded",
            self.steps,
            session.system.battery().cycles()
        );

        writeln!(out, "{}", session.system.battery_status_message())?;
        writeln!(out, "{}", session.system.estimate_battery_replacement())?;
        Ok(())
    }
}

impl Runner for Cli {
    fn run(&self, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<()> {
        self.simulate(session, Utc::now(), out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{output, session};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["simulate"]).unwrap();
        assert_eq!(cli.steps, 10);
        assert_eq!(cli.temperature, 30.0);
        assert!(cli.ambient.is_none());
        assert_eq!(cli.interval, 60);
    }

    #[test]
    fn runs_requested_steps() {
        let cli = Cli::try_parse_from(["simulate", "--steps", "3"]).unwrap();
        let mut session = session();
        let mut out = Vec::new();

        cli.simulate(&mut session, start(), &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with("Engine started successfully.\n"));
        assert!(text.contains("Step 1: "));
        assert!(text.contains("Step 3: "));
        assert!(!text.contains("Step 4: "));
        assert_eq!(session.system.battery().cycles(), 3);
        assert!(session.system.battery().health() < 90.0);
    }

    #[test]
    fn negative_interval_rejected() {
        assert!(Cli::try_parse_from(["simulate", "--interval=-600"]).is_err());
    }

    #[test]
    fn clock_overflow_is_an_error() {
        let cli = Cli::try_parse_from(["simulate", "--steps", "3"]).unwrap();
        let mut session = session();
        let mut out = Vec::new();

        let err = cli
            .simulate(&mut session, DateTime::<Utc>::MAX_UTC, &mut out)
            .unwrap_err();

        assert!(err.to_string().contains("overflows at step 2"));
        assert!(output(out).contains("Step 1: "));
    }

    #[test]
    fn huge_interval_is_an_error() {
        let cli = Cli::try_parse_from([
            "simulate",
            "--steps",
            "40",
            "--interval",
            "4294967295",
        ])
        .unwrap();
        let mut session = session();

        assert!(cli.simulate(&mut session, start(), &mut Vec::new()).is_err());
    }

    #[test]
    fn charging_at_mild_temperature_gains_charge() {
        let cli = Cli::try_parse_from(["simulate", "--steps", "4", "--temperature", "20"])
            .unwrap();
        let mut session = session();
        let before = session.system.battery().state_of_charge();

        cli.simulate(&mut session, start(), &mut Vec::new()).unwrap();

        assert!(session.system.battery().state_of_charge() > before);
    }

    #[test]
    fn long_hot_run_wears_battery_out() {
        let cli = Cli::try_parse_from(["simulate", "--steps", "60", "--temperature", "45"])
            .unwrap();
        let mut session = session();
        let mut out = Vec::new();

        cli.simulate(&mut session, start(), &mut out).unwrap();

        let text = output(out);
        assert_eq!(session.system.battery().health(), 0.0);
        assert!(text.contains("Battery health is poor."));
        assert!(text.contains("consider replacing the battery in approximately"));
    }
}
