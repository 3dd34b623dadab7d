use crate::case::OpcodeCase;
use crate::failure::{Divergence, Failure, FailureKind};
use crate::state::RegisterFile;

use common::arch::Arch;

pub struct Analyzer<'a> {
    arch: &'a Arch,
}

impl<'a> Analyzer<'a> {
    pub fn new(arch: &'a Arch) -> Self {
        Analyzer{arch}
    }

    // Compare every register in the snapshot against the case's expected
    // state. Registers in the touch set must hold the expected value, all
    // others must still hold their preset. Every divergence is collected
    // rather than stopping at the first.
    pub fn analyze(&self, case: &OpcodeCase, snapshot: &RegisterFile) -> Result<(), Failure> {
        let preset = case.preset(self.arch);
        let expected = case.expected(self.arch, &preset);

        let mut divs = vec![];
        for reg in RegisterFile::ids(self.arch) {
            let exp = expected.get(reg);
            let actual = snapshot.get(reg);
            if exp == actual {
                continue;
            }
            let div = if case.touches(reg) {
                Divergence::Mismatch { reg, expected: exp, actual }
            } else {
                Divergence::Mutation { reg, before: preset.get(reg), after: actual }
            };
            divs.push(div);
        }

        if divs.is_empty() {
            Ok(())
        } else {
            Err(Failure {
                id: case.id(),
                word: case.word(),
                kind: FailureKind::Assertion(divs),
            })
        }
    }
}
