use crate::case::OpcodeCase;
use crate::failure::{Failure, FailureKind};
use crate::simulator::Simulator;
use crate::state::RegisterFile;

use common::arch::Arch;

use log::debug;

// Drives one case through a simulator. Holds nothing between runs.
pub struct Executor<'a> {
    arch: &'a Arch,
}

impl<'a> Executor<'a> {
    pub fn new(arch: &'a Arch) -> Self {
        Executor{arch}
    }

    // Preset the full register file, stage the word at the PC, step once and
    // read everything back.
    pub fn run<S: Simulator>(&self, sim: &mut S, case: &OpcodeCase) -> Result<RegisterFile, Failure> {
        let preset = case.preset(self.arch);
        sim.load_registers(self.arch, &preset);
        sim.load_instruction(case.word());

        debug!("{}: {} at {:#06x}", case.id(), case.ins(), preset.pc);
        if let Err(e) = sim.step() {
            return Err(Failure {
                id: case.id(),
                word: case.word(),
                kind: FailureKind::Decode(e.to_string()),
            });
        }

        Ok(sim.read_registers(self.arch))
    }
}
