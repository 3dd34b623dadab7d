use crate::asm::{Flag, NUM_REGS, Reg, flags_mask};
use crate::constants::{INS_WIDTH, PC_MASK};

// Machine parameters the harness needs. Passed around by reference.
#[derive(Debug)]
pub struct Arch {
    pub num_regs: usize,
    pub ins_width: u16,
    pub pc_mask: u16,
    // SREG bits no single register instruction may write.
    pub control_flags: [Flag; 2],
}

pub static AVR: Arch = Arch {
    num_regs: NUM_REGS,
    ins_width: INS_WIDTH,
    pc_mask: PC_MASK,
    control_flags: [Flag::T, Flag::I],
};

impl Arch {
    pub fn regs(&self) -> impl Iterator<Item = Reg> {
        Reg::all().take(self.num_regs)
    }

    pub fn control_mask(&self) -> u8 {
        flags_mask(&self.control_flags)
    }

    pub fn next_pc(&self, pc: u16) -> u16 {
        pc.wrapping_add(self.ins_width) & self.pc_mask
    }
}
