//! Steps command - print the filing wizard sequence

use crate::steps::FormStep;
use clap::Args;

#[derive(Args, Debug)]
pub struct StepsCommand {}

impl StepsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        println!("Filing steps (forward/back only, no branching):");
        let mut current = Some(FormStep::default());
        while let Some(step) = current {
            let arrow = if step.next().is_some() { "  ->" } else { "" };
            println!("  {}. {}{}", step.number(), step.title(), arrow);
            current = step.next();
        }
        Ok(())
    }
}
