
use crate::constants::INS_WIDTH;

use std::fmt;
use std::str::FromStr;

use derive_more::IsVariant;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};


#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reg {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    R16,
    R17,
    R18,
    R19,
    R20,
    R21,
    R22,
    R23,
    R24,
    R25,
    R26,
    R27,
    R28,
    R29,
    R30,
    R31,
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

pub const NUM_REGS: usize = 32;

impl Reg {
    pub const NUM_BITS: usize = 5;
    pub const MASK: u16 = (1u16 << Self::NUM_BITS) - 1;

    pub fn index(self) -> usize {
        self.to_usize().unwrap()
    }

    pub fn all() -> impl Iterator<Item = Reg> {
        (0..NUM_REGS).map(|i| Reg::from_usize(i).unwrap())
    }
}


// Anything the analyzer can compare: a general purpose register, SREG or the PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum RegId {
    Gpr(Reg),
    Sreg,
    Pc,
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegId::Gpr(r) => write!(f, "{r}"),
            RegId::Sreg => write!(f, "SREG"),
            RegId::Pc => write!(f, "PC"),
        }
    }
}


////////////////////////////////////////////////////////////////////////////////


// Bit positions in SREG.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Flag {
    C = 0, // Carry
    Z,     // Zero
    N,     // Negative
    V,     // Two's complement overflow
    S,     // Sign, N ^ V
    H,     // Half carry
    T,     // Bit copy storage
    I,     // Global interrupt enable
}

impl Flag {
    pub const ALL: [Flag; 8] = [
        Flag::C, Flag::Z, Flag::N, Flag::V, Flag::S, Flag::H, Flag::T, Flag::I,
    ];

    // The flags an ALU instruction may write. T and I are left alone.
    pub const ARITH: [Flag; 6] = [Flag::C, Flag::Z, Flag::N, Flag::V, Flag::S, Flag::H];

    pub fn shift(self) -> u8 {
        self.to_u8().unwrap()
    }

    pub fn mask(self) -> u8 {
        1u8 << self.shift()
    }

    pub fn is_set(self, sreg: u8) -> bool {
        sreg & self.mask() != 0
    }

    pub fn letter(self) -> char {
        format!("{:?}", self).chars().next().unwrap()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub fn flags_mask(flags: &[Flag]) -> u8 {
    flags.iter().fold(0, |acc, flag| acc | flag.mask())
}

// The flags that differ between two SREG values.
pub fn diff_flags(a: u8, b: u8) -> Vec<Flag> {
    Flag::ALL.into_iter().filter(|flag| flag.is_set(a ^ b)).collect()
}

// Renders SREG most significant bit first, "ITHSVNZC" with '-' for clear bits.
pub fn render_sreg(sreg: u8) -> String {
    Flag::ALL
        .iter()
        .rev()
        .map(|flag| if flag.is_set(sreg) { flag.letter() } else { '-' })
        .collect()
}


////////////////////////////////////////////////////////////////////////////////


// The single register operand group, encoded 1001 010d dddd oooo.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Opcode {
    Com = 0x0,
    Neg = 0x1,
    Swap = 0x2,
    Inc = 0x3,
    Asr = 0x5,
    Lsr = 0x6,
    Ror = 0x7,
    Dec = 0xa,
}

impl Opcode {
    pub const ALL: [Opcode; 8] = [
        Opcode::Com,
        Opcode::Neg,
        Opcode::Swap,
        Opcode::Inc,
        Opcode::Asr,
        Opcode::Lsr,
        Opcode::Ror,
        Opcode::Dec,
    ];

    pub const GROUP: u16 = 0x9400;
    pub const GROUP_MASK: u16 = 0xfe00;
    pub const SUBOP_MASK: u16 = 0x000f;

    pub fn template(self) -> u16 {
        Self::GROUP | self.to_u16().unwrap()
    }

    pub fn mnemonic(self) -> String {
        format!("{:?}", self).to_uppercase()
    }

    fn decode(word: u16) -> Option<Opcode> {
        if word & Self::GROUP_MASK != Self::GROUP {
            return None;
        }
        Opcode::from_u16(word & Self::SUBOP_MASK)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl FromStr for Opcode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown opcode \"{s}\""))
    }
}


////////////////////////////////////////////////////////////////////////////////


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RdIns {
    pub op: Opcode,
    pub rd: Reg,
}

impl RdIns {
    pub const RD_SHIFT: usize = 4;

    pub fn encode(&self) -> u16 {
        self.op.template() | (self.rd.to_u16().unwrap() << Self::RD_SHIFT)
    }

    pub(crate) fn decode(word: u16) -> Option<Ins> {
        let op = Opcode::decode(word)?;
        let rd = Reg::from_u16((word >> Self::RD_SHIFT) & Reg::MASK).unwrap();
        Some(Ins::Rd(Self{op, rd}))
    }
}

impl fmt::Display for RdIns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.op, self.rd)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ins {
    Nop,
    Rd(RdIns),
}

impl Ins {
    pub const NOP: u16 = 0x0000;

    // In words.
    pub fn size(&self) -> u16 {
        INS_WIDTH
    }

    pub fn encode(&self) -> u16 {
        match self {
            Ins::Nop => Self::NOP,
            Ins::Rd(ins) => ins.encode(),
        }
    }
}

impl fmt::Display for Ins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ins::Nop => write!(f, "nop"),
            Ins::Rd(ins) => fmt::Display::fmt(ins, f),
        }
    }
}
