use crate::state::RegisterFile;

use common::arch::Arch;
use common::asm::{Flag, Opcode, RdIns, Reg, RegId, flags_mask};

use std::fmt;

// Where every case places its instruction.
pub const START_PC: u16 = 0x0100;

pub const VALUES_PER_OPCODE: usize = 6;

// Per opcode test parameters.
#[derive(Debug)]
pub struct Profile {
    // Operand values, chosen so every flag in `covers` is seen both clear and set.
    pub values: [u8; VALUES_PER_OPCODE],
    pub sreg_preset: u8,
    // Flags the instruction writes. Everything else in SREG must survive.
    pub writes: &'static [Flag],
    // Flags that depend on the operand, as opposed to being forced or untouched.
    pub covers: &'static [Flag],
}

use Flag::*;

const COM: Profile = Profile {
    values: [0x00, 0xff, 0xaa, 0x55, 0x0f, 0xf0],
    sreg_preset: 0,
    writes: &[C, Z, N, V, S],
    covers: &[Z, N, S],
};

const NEG: Profile = Profile {
    values: [0x00, 0xff, 0xaa, 0xf0, 0x01, 0x80],
    sreg_preset: 0,
    writes: &[C, Z, N, V, S, H],
    covers: &[C, Z, N, V, S, H],
};

const SWAP: Profile = Profile {
    values: [0x00, 0xff, 0x0f, 0xf0, 0xa5, 0x12],
    sreg_preset: 0,
    writes: &[],
    covers: &[],
};

const INC: Profile = Profile {
    values: [0x00, 0xff, 0x7f, 0x80, 0xaa, 0x0f],
    sreg_preset: 0,
    writes: &[Z, N, V, S],
    covers: &[Z, N, V, S],
};

const ASR: Profile = Profile {
    values: [0x00, 0x01, 0x80, 0x81, 0xfe, 0x7f],
    sreg_preset: 0,
    writes: &[C, Z, N, V, S],
    covers: &[C, Z, N, V, S],
};

// N is always cleared.
const LSR: Profile = Profile {
    values: [0x00, 0x01, 0x02, 0xff, 0xaa, 0x80],
    sreg_preset: 0,
    writes: &[C, Z, N, V, S],
    covers: &[C, Z, V, S],
};

// With the carry preset clear, the top bit shifted in is always 0.
const ROR: Profile = Profile {
    values: [0x00, 0x01, 0x02, 0xff, 0xaa, 0x80],
    sreg_preset: 0,
    writes: &[C, Z, N, V, S],
    covers: &[C, Z, V, S],
};

const DEC: Profile = Profile {
    values: [0x01, 0x00, 0x80, 0x7f, 0xaa, 0x10],
    sreg_preset: 0,
    writes: &[Z, N, V, S],
    covers: &[Z, N, V, S],
};

pub fn profile(op: Opcode) -> &'static Profile {
    match op {
        Opcode::Com => &COM,
        Opcode::Neg => &NEG,
        Opcode::Swap => &SWAP,
        Opcode::Inc => &INC,
        Opcode::Asr => &ASR,
        Opcode::Lsr => &LSR,
        Opcode::Ror => &ROR,
        Opcode::Dec => &DEC,
    }
}


////////////////////////////////////////////////////////////////////////////////


fn bit(val: u8, n: u8) -> u8 {
    (val >> n) & 0x1
}

fn pack(flags: &[(Flag, u8)]) -> u8 {
    flags.iter().fold(0, |acc, (flag, val)| acc | (val << flag.shift()))
}

// Z, N, V, S for an 8 bit result.
fn result_flags(res: u8, v: u8) -> [(Flag, u8); 4] {
    let n = bit(res, 7);
    [(Z, (res == 0) as u8), (N, n), (V, v), (S, n ^ v)]
}

fn shift_flags(res: u8, c: u8) -> u8 {
    let v = bit(res, 7) ^ c;
    pack(&result_flags(res, v)) | pack(&[(C, c)])
}

// The result and the value of the written flags. Unwritten flags read as 0.
fn compute(op: Opcode, vd: u8, sreg: u8) -> (u8, u8) {
    match op {
        Opcode::Com => {
            let res = 0xff - vd;
            (res, pack(&result_flags(res, 0)) | pack(&[(C, 1)]))
        },
        Opcode::Neg => {
            let res = 0x00u8.wrapping_sub(vd);
            let n = bit(res, 7);
            let v = (res == 0x80) as u8;
            let flags = pack(&[
                (H, bit(res | vd, 3)),
                (N, n),
                (V, v),
                (S, n ^ v),
                (Z, (res == 0) as u8),
                (C, (res != 0) as u8),
            ]);
            (res, flags)
        },
        Opcode::Swap => ((vd << 4) | (vd >> 4), 0),
        Opcode::Inc => {
            let res = vd.wrapping_add(1);
            (res, pack(&result_flags(res, (res == 0x80) as u8)))
        },
        Opcode::Dec => {
            let res = vd.wrapping_sub(1);
            (res, pack(&result_flags(res, (res == 0x7f) as u8)))
        },
        Opcode::Asr => {
            let res = (vd >> 1) | (vd & 0x80);
            (res, shift_flags(res, bit(vd, 0)))
        },
        Opcode::Lsr => {
            let res = vd >> 1;
            (res, shift_flags(res, bit(vd, 0)))
        },
        Opcode::Ror => {
            let res = (vd >> 1) | (bit(sreg, C.shift()) << 7);
            (res, shift_flags(res, bit(vd, 0)))
        },
    }
}

// What Rd and SREG should hold after `op` runs on `vd` with SREG preset to `sreg`.
pub fn expected(op: Opcode, vd: u8, sreg: u8) -> (u8, u8) {
    let (res, flags) = compute(op, vd, sreg);
    let writes = flags_mask(profile(op).writes);
    (res, (sreg & !writes) | (flags & writes))
}

// Fill for registers outside the touch set, so stray writes show up.
pub fn background(reg: Reg) -> u8 {
    (reg.index() as u8).wrapping_mul(0x1d) ^ 0xa5
}


////////////////////////////////////////////////////////////////////////////////


// Stable name of a case, e.g. NEG_r05_v80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseId {
    pub opcode: Opcode,
    pub rd: Reg,
    pub vd: u8,
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_r{:02}_v{:02x}", self.opcode.mnemonic(), self.rd.index(), self.vd)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeCase {
    pub opcode: Opcode,
    pub rd: Reg,
    pub vd: u8,
}

impl OpcodeCase {
    pub fn new(opcode: Opcode, rd: Reg, vd: u8) -> Self {
        OpcodeCase{opcode, rd, vd}
    }

    pub fn id(&self) -> CaseId {
        CaseId{opcode: self.opcode, rd: self.rd, vd: self.vd}
    }

    pub fn ins(&self) -> RdIns {
        RdIns{op: self.opcode, rd: self.rd}
    }

    pub fn word(&self) -> u16 {
        self.ins().encode()
    }

    pub fn profile(&self) -> &'static Profile {
        profile(self.opcode)
    }

    // The whole register file is preset, not just Rd and SREG.
    pub fn preset(&self, arch: &Arch) -> RegisterFile {
        let mut regs = RegisterFile::new();
        for reg in arch.regs() {
            regs.set_reg(reg, background(reg));
        }
        regs.set_reg(self.rd, self.vd);
        regs.sreg = self.profile().sreg_preset;
        regs.pc = START_PC;
        regs
    }

    // Control bits always come from the preset, whatever the opcode computes.
    pub fn expected(&self, arch: &Arch, preset: &RegisterFile) -> RegisterFile {
        let (res, sreg) = expected(self.opcode, preset.reg(self.rd), preset.sreg);
        let control = arch.control_mask();
        let mut regs = *preset;
        regs.set_reg(self.rd, res);
        regs.sreg = (sreg & !control) | (preset.sreg & control);
        regs.pc = arch.next_pc(preset.pc);
        regs
    }

    // Registers the instruction is allowed to write.
    pub fn touches(&self, id: RegId) -> bool {
        match id {
            RegId::Gpr(reg) => reg == self.rd,
            RegId::Sreg => !self.profile().writes.is_empty(),
            RegId::Pc => true,
        }
    }
}
