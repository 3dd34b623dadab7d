
pub const INS_WIDTH: u16 = 1; // Words

pub const FLASH_WORDS: usize = 0x4000;
pub const PC_MASK: u16 = (FLASH_WORDS - 1) as u16;
pub const RESET_PC: u16 = 0x0;
