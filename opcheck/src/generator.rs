use crate::case::OpcodeCase;

use common::arch::Arch;
use common::asm::{Flag, Opcode};

use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenError {
    #[error("{opcode} value set never {} flag {flag}", verb(.set))]
    IncompleteCoverage { opcode: Opcode, flag: Flag, set: bool },
}

fn verb(set: &bool) -> &'static str {
    if *set { "sets" } else { "clears" }
}

// Which SREG bits were seen clear and which were seen set across a set of
// expected post-states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    pub seen_clear: u8,
    pub seen_set: u8,
}

impl Coverage {
    pub fn add(&mut self, sreg: u8) {
        self.seen_set |= sreg;
        self.seen_clear |= !sreg;
    }

    pub fn missing(&self, flag: Flag) -> Option<bool> {
        if self.seen_clear & flag.mask() == 0 {
            Some(false)
        } else if self.seen_set & flag.mask() == 0 {
            Some(true)
        } else {
            None
        }
    }
}

pub fn coverage(arch: &Arch, cases: &[OpcodeCase]) -> Coverage {
    let mut cov = Coverage::default();
    for case in cases {
        let expected = case.expected(arch, &case.preset(arch));
        cov.add(expected.sreg);
    }
    cov
}

pub struct Generator<'a> {
    arch: &'a Arch,
}

impl<'a> Generator<'a> {
    pub fn new(arch: &'a Arch) -> Self {
        Generator{arch}
    }

    // One case per destination register and representative value, registers
    // outermost. Fails if the values don't drive every operand dependent flag
    // both ways.
    pub fn cases(&self, opcode: Opcode) -> Result<Vec<OpcodeCase>, GenError> {
        let profile = crate::case::profile(opcode);
        let cases: Vec<OpcodeCase> = self.arch.regs()
            .flat_map(|rd| profile.values.iter().map(move |vd| OpcodeCase::new(opcode, rd, *vd)))
            .collect();

        let cov = coverage(self.arch, &cases);
        for flag in profile.covers {
            if let Some(set) = cov.missing(*flag) {
                return Err(GenError::IncompleteCoverage { opcode, flag: *flag, set });
            }
        }

        debug!("{opcode}: generated {} cases", cases.len());
        Ok(cases)
    }

    // Cases for each opcode in order. A repeated opcode is only generated once.
    pub fn matrix(&self, opcodes: &[Opcode]) -> Result<Vec<OpcodeCase>, GenError> {
        let mut seen: Vec<Opcode> = vec![];
        let mut out = vec![];
        for opcode in opcodes {
            if seen.contains(opcode) {
                continue;
            }
            seen.push(*opcode);
            out.extend(self.cases(*opcode)?);
        }
        Ok(out)
    }
}
