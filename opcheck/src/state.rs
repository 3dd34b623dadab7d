use common::arch::Arch;
use common::asm::{NUM_REGS, Reg, RegId};

// A full copy of the architectural registers. Used both for the preset and
// for the snapshot read back after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    pub regs: [u8; NUM_REGS],
    pub sreg: u8,
    pub pc: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            regs: [0; NUM_REGS],
            sreg: 0,
            pc: 0,
        }
    }

    pub fn reg(&self, reg: Reg) -> u8 {
        self.regs[reg.index()]
    }

    pub fn set_reg(&mut self, reg: Reg, val: u8) {
        self.regs[reg.index()] = val;
    }

    // Widened so PC and the 8 bit registers compare the same way.
    pub fn get(&self, id: RegId) -> u16 {
        match id {
            RegId::Gpr(reg) => self.reg(reg) as u16,
            RegId::Sreg => self.sreg as u16,
            RegId::Pc => self.pc,
        }
    }

    pub fn ids(arch: &Arch) -> impl Iterator<Item = RegId> {
        arch.regs()
            .map(RegId::Gpr)
            .chain([RegId::Sreg, RegId::Pc])
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
