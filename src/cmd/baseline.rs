//! Baseline command - run the built-in reference scenario

use super::bases::{run, OutputArgs};
use crate::core::scenario::baseline;
use clap::Args;

#[derive(Args, Debug)]
pub struct BaselineCommand {
    #[command(flatten)]
    output: OutputArgs,
}

impl BaselineCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        run(&baseline(), &self.output)
    }
}
