use crate::case::CaseId;

use common::asm::{RegId, diff_flags, render_sreg};

use std::fmt;

use derive_more::IsVariant;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Divergence {
    // A register the instruction writes holds the wrong value.
    Mismatch { reg: RegId, expected: u16, actual: u16 },
    // A register the instruction must not write was changed.
    Mutation { reg: RegId, before: u16, after: u16 },
}

impl Divergence {
    pub fn reg(&self) -> RegId {
        match self {
            Divergence::Mismatch { reg, .. } => *reg,
            Divergence::Mutation { reg, .. } => *reg,
        }
    }
}

fn fmt_val(f: &mut fmt::Formatter, reg: RegId, val: u16) -> fmt::Result {
    match reg {
        RegId::Gpr(_) => write!(f, "{val:#04x}"),
        RegId::Sreg => write!(f, "{val:#04x} ({})", render_sreg(val as u8)),
        RegId::Pc => write!(f, "{val:#06x}"),
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Divergence::Mismatch { reg, expected, actual } => {
                write!(f, "{reg} expected ")?;
                fmt_val(f, reg, expected)?;
                write!(f, ", got ")?;
                fmt_val(f, reg, actual)?;
                if reg.is_sreg() {
                    let bits: Vec<String> = diff_flags(expected as u8, actual as u8)
                        .iter()
                        .map(|flag| flag.to_string())
                        .collect();
                    write!(f, ", differs in {}", bits.join(" "))?;
                }
                Ok(())
            },
            Divergence::Mutation { reg, before, after } => {
                write!(f, "{reg} changed unexpectedly from ")?;
                fmt_val(f, reg, before)?;
                write!(f, " to ")?;
                fmt_val(f, reg, after)
            },
        }
    }
}

fn fmt_divergences(divs: &[Divergence]) -> String {
    divs.iter().map(|d| d.to_string()).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error, IsVariant)]
pub enum FailureKind {
    #[error("{}", fmt_divergences(.0))]
    Assertion(Vec<Divergence>),
    #[error("decode failure: {0}")]
    Decode(String),
}

// One failed case. The id carries the opcode, Rd and the input value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{id} [{word:#06x}]: {kind}")]
pub struct Failure {
    pub id: CaseId,
    pub word: u16,
    pub kind: FailureKind,
}

impl Failure {
    pub fn divergences(&self) -> &[Divergence] {
        match &self.kind {
            FailureKind::Assertion(divs) => divs,
            FailureKind::Decode(_) => &[],
        }
    }
}
