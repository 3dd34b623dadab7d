
use common::asm::*;
use common::decoder::decode;
use crate::EmulatorState;
use crate::Status;

use delegate::delegate;
use log::{debug, trace};
use thiserror::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("invalid instruction {word:#06x} at pc {pc:#06x}")]
    InvalidInstruction { word: u16, pc: u16 },
}


pub struct Emulator {
    state: EmulatorState,
}

impl Emulator {
    pub fn new() -> Emulator {
        Emulator {
            state: EmulatorState::new(),
        }
    }

    delegate! {
        to self.state {
            pub fn reg_read(&self, reg: Reg) -> u8;
            pub fn reg_write(&mut self, reg: Reg, val: u8);
            pub fn pc(&self) -> u16;
            pub fn set_pc(&mut self, pc: u16);
            pub fn get_status(&self) -> &Status;
            pub fn set_status(&mut self, status: Status);
        }
    }

    // Execute exactly one instruction. On a decode failure nothing is changed,
    // including the PC.
    pub fn step(&mut self) -> Result<(), ExecError> {
        let pc = self.state.pc();
        let word = self.state.flash_read(pc);
        let Some(ins) = decode(word) else {
            return Err(ExecError::InvalidInstruction { word, pc });
        };
        debug!("PC: {pc:#06x}: {ins}");

        self.state.inc_ins();
        self.state.set_pc(pc.wrapping_add(ins.size()));
        self.exec(&ins);
        trace!("SREG: {}", self.state.get_status());
        Ok(())
    }

    pub fn load_image(&mut self, words: &[u16], start: u16) {
        for (addr, word) in (start..).zip(words) {
            self.state.flash_write(addr, *word);
        }
    }

    // Place a single word at the current PC.
    pub fn load_instruction(&mut self, word: u16) {
        let pc = self.state.pc();
        self.state.flash_write(pc, word);
    }

    pub fn get_state(&self) -> &EmulatorState {
        &self.state
    }

    ///////////////////////////////////////////////////////////////////////////
    // Execute
    ///////////////////////////////////////////////////////////////////////////

    fn exec_rd_ins(&mut self, ins: &RdIns) {
        let val = self.state.reg_read(ins.rd);
        let status = self.state.get_status_mut();
        use Opcode::*;
        let res = match ins.op {
            Com => {
                let res = !val;
                status.set_result(res, false);
                status.set_carry(true);
                res
            },
            Neg => {
                let res = 0u8.wrapping_sub(val);
                status.set_result(res, res == 0x80);
                status.set_carry(res != 0);
                status.set_half_carry((res & 0x08) != 0 || (val & 0x08) != 0);
                res
            },
            Swap => val.rotate_left(4),
            Inc => {
                let res = val.wrapping_add(1);
                // Carry and half carry not affected
                status.set_result(res, val == 0x7f);
                res
            },
            Dec => {
                let res = val.wrapping_sub(1);
                // Carry and half carry not affected
                status.set_result(res, val == 0x80);
                res
            },
            Asr => {
                let res = ((val as i8) >> 1) as u8; // i8 for arithmetic shift
                let new_carry = val & 0x1 != 0;
                status.set_result(res, (res & 0x80 != 0) ^ new_carry);
                status.set_carry(new_carry);
                res
            },
            Lsr => {
                let res = val >> 1;
                let new_carry = val & 0x1 != 0;
                // N is always clear, so V is just the carry.
                status.set_result(res, new_carry);
                status.set_carry(new_carry);
                res
            },
            Ror => {
                let carry = status.get_carry() as u8;
                let res = (val >> 1) | (carry << 7);
                let new_carry = val & 0x1 != 0;
                status.set_result(res, (res & 0x80 != 0) ^ new_carry);
                status.set_carry(new_carry);
                res
            },
        };
        self.state.reg_write(ins.rd, res);
    }

    fn exec(&mut self, ins: &Ins) {
        match ins {
            Ins::Nop => (),
            Ins::Rd(ins) => self.exec_rd_ins(ins),
        }
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
