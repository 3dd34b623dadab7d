pub mod emulator;
pub mod emulator_state;

pub use emulator::{Emulator, ExecError};
pub use emulator_state::{EmulatorState, Status};
