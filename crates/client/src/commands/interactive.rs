//! Menu-driven scenario entry.
//!
//! Prompts for a distance and one ammunition level per weapon, re-asking until
//! each value is a number in `[0, 100]`. End of input leaves the menu cleanly.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use arsenal_content::Arsenal;
use arsenal_runtime::{AmmoByWeapon, WeaponEvaluator};
use clap::Parser;
use console::style;

use super::parse_percent;
use crate::render;

/// Most scenarios accepted in one multi-scenario run.
const MAX_SCENARIOS: usize = 10;

/// Menu-driven scenario entry
#[derive(Parser)]
pub struct Interactive {}

impl Interactive {
    pub fn execute(self, arsenal: Arsenal) -> Result<()> {
        let evaluator = WeaponEvaluator::new(Arc::new(arsenal));
        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(&evaluator, stdin.lock(), stdout.lock()).run()
    }
}

/// One combat situation entered by the user.
struct Scenario {
    description: String,
    distance: f64,
    ammunition: AmmoByWeapon,
}

struct Session<'a, R, W> {
    evaluator: &'a WeaponEvaluator,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    fn new(evaluator: &'a WeaponEvaluator, input: R, output: W) -> Self {
        Self {
            evaluator,
            input,
            output,
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.menu()?;
            let Some(choice) = self.prompt("Choose an option (0-2): ")? else {
                break;
            };

            match choice.as_str() {
                "0" => break,
                "1" => {
                    if !self.single()? {
                        break;
                    }
                }
                "2" => {
                    if !self.multiple()? {
                        break;
                    }
                }
                _ => writeln!(self.output, "Invalid option, enter 0, 1 or 2.")?,
            }
        }

        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", style("=== NPC weapon selection ===").bold())?;
        writeln!(self.output, "1) Single scenario")?;
        writeln!(self.output, "2) Multiple scenarios")?;
        writeln!(self.output, "0) Quit")?;
        Ok(())
    }

    /// Returns false when input ran out.
    fn single(&mut self) -> Result<bool> {
        let Some(scenario) = self.scenario("Scenario".to_string())? else {
            return Ok(false);
        };
        self.report(&scenario)?;
        Ok(true)
    }

    /// Returns false when input ran out.
    fn multiple(&mut self) -> Result<bool> {
        let Some(count) = self.scenario_count()? else {
            return Ok(false);
        };

        let mut scenarios = Vec::with_capacity(count);
        for i in 1..=count {
            writeln!(self.output, "\n--- Scenario {i} ---")?;
            let Some(mut scenario) = self.scenario(format!("Scenario {i}"))? else {
                return Ok(false);
            };
            let Some(description) = self.prompt("Description (optional): ")? else {
                return Ok(false);
            };
            if !description.is_empty() {
                scenario.description = description;
            }
            scenarios.push(scenario);
        }

        for scenario in &scenarios {
            self.report(scenario)?;
        }
        Ok(true)
    }

    fn scenario(&mut self, description: String) -> Result<Option<Scenario>> {
        let Some(distance) = self.percent("Target distance (0-100): ")? else {
            return Ok(None);
        };

        let names: Vec<String> = self
            .evaluator
            .arsenal()
            .names()
            .map(str::to_string)
            .collect();

        let mut ammunition = AmmoByWeapon::with_capacity(names.len());
        for name in names {
            let Some(level) = self.percent(&format!("  {name} ammunition (0-100): "))? else {
                return Ok(None);
            };
            ammunition.insert(name, level);
        }

        Ok(Some(Scenario {
            description,
            distance,
            ammunition,
        }))
    }

    fn scenario_count(&mut self) -> Result<Option<usize>> {
        loop {
            let prompt = format!("How many scenarios? (1-{MAX_SCENARIOS}): ");
            let Some(raw) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            match raw.parse::<usize>() {
                Ok(n) if (1..=MAX_SCENARIOS).contains(&n) => return Ok(Some(n)),
                _ => writeln!(
                    self.output,
                    "  Enter a whole number between 1 and {MAX_SCENARIOS}."
                )?,
            }
        }
    }

    fn percent(&mut self, prompt: &str) -> Result<Option<f64>> {
        loop {
            let Some(raw) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse_percent(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.output, "  {reason}")?,
            }
        }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, scenario: &Scenario) -> Result<()> {
        let selection = self
            .evaluator
            .best_weapon(scenario.distance, &scenario.ammunition);

        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            style(format!("=== {} ===", scenario.description)).bold()
        )?;
        writeln!(self.output, "Distance: {:.2}", scenario.distance)?;
        for name in self.evaluator.arsenal().names() {
            if let Some(level) = scenario.ammunition.get(name) {
                writeln!(self.output, "  {name}: {level:.2}")?;
            }
        }
        writeln!(self.output)?;
        write!(self.output, "{}", render::ranking(&selection))?;
        Ok(())
    }
}
