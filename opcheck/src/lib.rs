pub mod analyzer;
pub mod case;
pub mod executor;
pub mod failure;
pub mod generator;
pub mod report;
pub mod simulator;
pub mod state;

pub use analyzer::Analyzer;
pub use case::{CaseId, OpcodeCase};
pub use executor::Executor;
pub use failure::{Divergence, Failure, FailureKind};
pub use generator::{GenError, Generator};
pub use report::{Report, run_batch};
pub use simulator::Simulator;
pub use state::RegisterFile;
