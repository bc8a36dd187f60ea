use crate::{Runner, Session};
use battery_sim_core::{ignition::ImprovementTip, types::PredictionInput};
use log::warn;
use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

pub(crate) struct Menu;

impl Runner for Menu {
    fn run(&self, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<()> {
        let stdin = io::stdin();
        Prompt::new(stdin.lock(), out).main_menu(session)?;
        Ok(())
    }
}

const INVALID_CHOICE: &str = "Invalid choice. Please enter a valid option.";

struct Prompt<'a, R> {
    input: R,
    out: &'a mut dyn Write,
}

impl<'a, R: BufRead> Prompt<'a, R> {
    fn new(input: R, out: &'a mut dyn Write) -> Self {
        Self { input, out }
    }

    /// Returns `None` once input is exhausted.
    fn line(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn number<T: FromStr>(&mut self, text: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.line(text)? else {
                return Ok(None);
            };

            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "'{line}' is not a valid whole number.")?,
            }
        }
    }

    fn main_menu(&mut self, session: &mut Session) -> io::Result<()> {
        writeln!(self.out, "2-Wheeler Vehicle Ignition System Model")?;

        loop {
            writeln!(self.out, "\nOptions:")?;
            writeln!(self.out, "1. Start Engine")?;
            writeln!(self.out, "2. Stop Engine")?;
            writeln!(self.out, "3. Suggest Operational Changes")?;
            writeln!(self.out, "4. Predict Battery Health")?;
            writeln!(self.out, "5. Show Battery Status")?;
            writeln!(self.out, "6. Estimate Battery Replacement")?;
            writeln!(self.out, "7. Improve Battery Life")?;
            writeln!(self.out, "8. Quit")?;

            let Some(choice) = self.line("Enter your choice: ")? else {
                break Ok(());
            };

            match choice.as_str() {
                "1" => writeln!(self.out, "{}", session.system.start_engine())?,
                "2" => writeln!(self.out, "{}", session.system.stop_engine())?,
                "3" => self.operational_changes(session)?,
                "4" => {
                    if !self.predict(session)? {
                        break Ok(());
                    }
                }
                "5" => writeln!(self.out, "{}", session.system.battery_status_message())?,
                "6" => writeln!(
                    self.out,
                    "{}",
                    session.system.estimate_battery_replacement()
                )?,
                "7" => {
                    if !self.improve_battery_life(session)? {
                        break Ok(());
                    }
                }
                "8" => break Ok(()),
                _ => writeln!(self.out, "{INVALID_CHOICE}")?,
            }
        }
    }

    fn operational_changes(&mut self, session: &mut Session) -> io::Result<()> {
        match session.system.suggest_operational_changes() {
            Ok(suggestions) => {
                writeln!(self.out, "Operational Change Suggestions:")?;
                for suggestion in suggestions {
                    writeln!(self.out, "{suggestion}")?;
                }
            }
            Err(e) => {
                warn!("Failed to generate suggestions: {e}");
                writeln!(self.out, "Error: {e}")?;
            }
        }
        Ok(())
    }

    /// Returns `false` if input ran out part way through.
    fn predict(&mut self, session: &mut Session) -> io::Result<bool> {
        let Some(cycles) = self.number::<u32>("Enter the number of cycles: ")? else {
            return Ok(false);
        };
        let Some(temperature) = self.number::<i32>("Enter the current temperature: ")? else {
            return Ok(false);
        };
        let Some(soc) = self.number::<i32>("Enter the current state-of-charge: ")? else {
            return Ok(false);
        };
        let Some(kms) = self.number::<i32>("Enter the average kilometers driven per day: ")? else {
            return Ok(false);
        };
        let Some(months_old) = self.number::<u32>("Enter how old the battery is (in months): ")? else {
            return Ok(false);
        };

        let input = PredictionInput {
            cycles,
            temperature,
            soc,
            kms,
            months_old,
        };

        match session.system.battery().predict_battery_health(&input) {
            Ok(health) => writeln!(self.out, "Predicted Battery Health: {health}%")?,
            Err(e) => {
                warn!("Prediction failed: {e}");
                writeln!(self.out, "Error: {e}")?;
            }
        }

        Ok(true)
    }

    /// Returns `false` if input ran out.
    fn improve_battery_life(&mut self, session: &mut Session) -> io::Result<bool> {
        loop {
            writeln!(self.out, "\nImprove Battery Life:")?;
            writeln!(self.out, "1. Reduce daily kilometers driven.")?;
            writeln!(self.out, "2. Avoid extreme temperatures.")?;
            writeln!(self.out, "3. Charge the battery regularly.")?;
            writeln!(self.out, "4. Follow suggested operational changes.")?;
            writeln!(self.out, "5. Go back")?;

            let Some(choice) = self.line("Enter your choice: ")? else {
                return Ok(false);
            };

            match choice.as_str() {
                "1" => writeln!(self.out, "{}", ImprovementTip::ReduceDailyKilometers)?,
                "2" => writeln!(self.out, "{}", ImprovementTip::AvoidExtremeTemperatures)?,
                "3" => writeln!(self.out, "{}", ImprovementTip::ChargeRegularly)?,
                "4" => self.operational_changes(session)?,
                "5" => return Ok(true),
                _ => writeln!(self.out, "{INVALID_CHOICE}")?,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{output, session};
    use std::io::Cursor;

    fn run(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        Prompt::new(Cursor::new(input.to_owned()), &mut out)
            .main_menu(session)
            .unwrap();
        output(out)
    }

    #[test]
    fn quit_immediately() {
        let text = run(&mut session(), "8\n");
        assert!(text.starts_with("2-Wheeler Vehicle Ignition System Model\n"));
        assert_eq!(text.matches("Options:").count(), 1);
    }

    #[test]
    fn end_of_input_quits() {
        let text = run(&mut session(), "");
        assert!(text.contains("8. Quit"));
    }

    #[test]
    fn engine_start_stop() {
        let mut session = session();
        let text = run(&mut session, "1\n1\n5\n2\n2\n8\n");

        assert!(text.contains("Engine started successfully."));
        assert!(text.contains("Engine is already running."));
        assert!(text.contains("Battery is On due to the engine is still running."));
        assert!(text.contains("Engine stopped successfully."));
        assert!(text.contains("Engine is already off."));
        assert!(!session.system.engine_running());
    }

    #[test]
    fn invalid_choice() {
        let text = run(&mut session(), "9\nabc\n8\n");
        assert_eq!(text.matches(INVALID_CHOICE).count(), 2);
    }

    #[test]
    fn suggestions() {
        let text = run(&mut session(), "3\n8\n");
        assert!(text.contains("Operational Change Suggestions:"));
        assert!(text.contains("Battery health is good."));
    }

    #[test]
    fn predict_reprompts_on_bad_number() {
        let text = run(&mut session(), "4\n300\nwarm\n22\n85\n25\n0\n8\n");
        assert!(text.contains("'warm' is not a valid whole number."));
        assert!(text.contains("Predicted Battery Health: "));
    }

    #[test]
    fn predict_interrupted() {
        let text = run(&mut session(), "4\n300\n22\n");
        assert!(!text.contains("Predicted Battery Health"));
    }

    #[test]
    fn replacement_estimate() {
        let text = run(&mut session(), "6\n8\n");
        assert!(text.contains("within an acceptable range"));
    }

    #[test]
    fn improve_battery_life_submenu() {
        let text = run(&mut session(), "7\n1\n2\n3\n4\n0\n5\n8\n");

        assert!(text.contains("Reducing daily kilometers can extend your battery life."));
        assert!(text.contains("Avoiding extreme temperatures is crucial"));
        assert!(text.contains("Charging your battery regularly"));
        assert!(text.contains("Operational Change Suggestions:"));
        assert_eq!(text.matches(INVALID_CHOICE).count(), 1);
        assert_eq!(text.matches("Options:").count(), 2);
    }
}
