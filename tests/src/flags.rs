
use emu_lib::Status;

// Because each test starts from SREG = 0, unaffected flags will be false
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub c: bool,
    pub z: bool,
    pub n: bool,
    pub v: bool, // overflow
    pub s: bool,
    pub h: bool,
    pub t: bool,
    pub i: bool,
}

impl Flags {
    pub fn to_bits(self) -> u8 {
        (if self.c { Status::C } else { 0 })
            | (if self.z { Status::Z } else { 0 })
            | (if self.n { Status::N } else { 0 })
            | (if self.v { Status::V } else { 0 })
            | (if self.s { Status::S } else { 0 })
            | (if self.h { Status::H } else { 0 })
            | (if self.t { Status::T } else { 0 })
            | (if self.i { Status::I } else { 0 })
    }

    pub fn c(mut self) -> Self {
        self.c = true;
        self
    }

    pub fn z(mut self) -> Self {
        self.z = true;
        self
    }

    pub fn n(mut self) -> Self {
        self.n = true;
        self
    }

    pub fn v(mut self) -> Self {
        self.v = true;
        self
    }

    pub fn s(mut self) -> Self {
        self.s = true;
        self
    }

    pub fn h(mut self) -> Self {
        self.h = true;
        self
    }

    pub fn t(mut self) -> Self {
        self.t = true;
        self
    }

    pub fn i(mut self) -> Self {
        self.i = true;
        self
    }
}

pub fn flags() -> Flags {
    Flags::default()
}
