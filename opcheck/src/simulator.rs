use crate::state::RegisterFile;

use common::arch::Arch;
use common::asm::Reg;
use emu_lib::{Emulator, ExecError, Status};

// What the harness needs from a simulator: load register state, stage one
// instruction word at the PC, execute it, read the registers back.
pub trait Simulator {
    type Error: std::error::Error;

    fn set_register(&mut self, reg: Reg, val: u8);
    fn set_status_register(&mut self, val: u8);
    fn set_program_counter(&mut self, pc: u16);

    // Stage `word` at the current PC.
    fn load_instruction(&mut self, word: u16);

    // Execute exactly one instruction.
    fn step(&mut self) -> Result<(), Self::Error>;

    fn get_register(&self, reg: Reg) -> u8;
    fn get_status_register(&self) -> u8;
    fn get_program_counter(&self) -> u16;

    fn load_registers(&mut self, arch: &Arch, regs: &RegisterFile) {
        for reg in arch.regs() {
            self.set_register(reg, regs.reg(reg));
        }
        self.set_status_register(regs.sreg);
        self.set_program_counter(regs.pc);
    }

    fn read_registers(&self, arch: &Arch) -> RegisterFile {
        let mut regs = RegisterFile::new();
        for reg in arch.regs() {
            regs.set_reg(reg, self.get_register(reg));
        }
        regs.sreg = self.get_status_register();
        regs.pc = self.get_program_counter();
        regs
    }
}

impl Simulator for Emulator {
    type Error = ExecError;

    fn set_register(&mut self, reg: Reg, val: u8) {
        self.reg_write(reg, val);
    }

    fn set_status_register(&mut self, val: u8) {
        self.set_status(Status::from_raw(val));
    }

    fn set_program_counter(&mut self, pc: u16) {
        self.set_pc(pc);
    }

    fn load_instruction(&mut self, word: u16) {
        Emulator::load_instruction(self, word);
    }

    fn step(&mut self) -> Result<(), ExecError> {
        Emulator::step(self)
    }

    fn get_register(&self, reg: Reg) -> u8 {
        self.reg_read(reg)
    }

    fn get_status_register(&self) -> u8 {
        self.get_status().to_raw()
    }

    fn get_program_counter(&self) -> u16 {
        self.pc()
    }
}
