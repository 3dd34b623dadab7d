use common::asm::{Flag, NUM_REGS, Reg, render_sreg};
use common::constants::{FLASH_WORDS, PC_MASK, RESET_PC};

use std::fmt;

use log::trace;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub const C: u8 = 0x1 << Flag::C as u8;
    pub const Z: u8 = 0x1 << Flag::Z as u8;
    pub const N: u8 = 0x1 << Flag::N as u8;
    pub const V: u8 = 0x1 << Flag::V as u8;
    pub const S: u8 = 0x1 << Flag::S as u8;
    pub const H: u8 = 0x1 << Flag::H as u8;
    pub const T: u8 = 0x1 << Flag::T as u8;
    pub const I: u8 = 0x1 << Flag::I as u8;

    pub fn new() -> Status {
        Default::default()
    }

    pub fn from_raw(raw: u8) -> Self {
        Status(raw)
    }

    pub fn to_raw(&self) -> u8 {
        self.0
    }

    pub fn get(&self, flag: Flag) -> bool {
        flag.is_set(self.0)
    }

    pub fn set(&mut self, flag: Flag, val: bool) {
        self.0 &= !flag.mask();
        self.0 |= (val as u8) << flag.shift();
    }

    pub fn get_carry(&self) -> bool {
        self.get(Flag::C)
    }

    pub fn set_carry(&mut self, val: bool) {
        self.set(Flag::C, val);
    }

    pub fn set_half_carry(&mut self, val: bool) {
        self.set(Flag::H, val);
    }

    // Z, N and V from the result, S as N ^ V.
    pub fn set_result(&mut self, res: u8, overflow: bool) {
        let negative = res & 0x80 != 0;
        self.set(Flag::Z, res == 0);
        self.set(Flag::N, negative);
        self.set(Flag::V, overflow);
        self.set(Flag::S, negative ^ overflow);
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_sreg(self.0))
    }
}

pub struct EmulatorState {
    num_ins: usize,
    flash: Vec<u16>,
    regs: [u8; NUM_REGS],
    status: Status,
    pc: u16,
}

impl EmulatorState {
    pub fn new() -> Self {
        EmulatorState {
            num_ins: 0usize,
            flash: vec![0; FLASH_WORDS],
            regs: [0; NUM_REGS],
            status: Status::new(),
            pc: RESET_PC,
        }
    }

    pub fn inc_ins(&mut self) {
        self.num_ins += 1;
    }

    pub fn num_ins(&self) -> usize {
        self.num_ins
    }

    pub fn flash_read(&self, addr: u16) -> u16 {
        self.flash[(addr & PC_MASK) as usize]
    }

    pub fn flash_write(&mut self, addr: u16, val: u16) {
        trace!("Flash: writing {val:#06x} to {addr:#06x}");
        self.flash[(addr & PC_MASK) as usize] = val;
    }

    pub fn reg_read(&self, reg: Reg) -> u8 {
        self.regs[reg.index()]
    }

    pub fn reg_write(&mut self, reg: Reg, val: u8) {
        trace!("Reg: writing {val:#04x} to {reg}");
        self.regs[reg.index()] = val;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        trace!("PC: set to {pc:#06x}");
        self.pc = pc & PC_MASK;
    }

    pub fn set_status(&mut self, status: Status) {
        trace!("SREG: set to {status}");
        self.status = status;
    }

    pub fn get_status(&self) -> &Status {
        &self.status
    }

    pub fn get_status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new()
    }
}
