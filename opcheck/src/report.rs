use crate::analyzer::Analyzer;
use crate::case::OpcodeCase;
use crate::executor::Executor;
use crate::failure::Failure;
use crate::simulator::Simulator;

use common::arch::Arch;

use std::fmt;

use log::{debug, info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn num_decode_failures(&self) -> usize {
        self.failures.iter().filter(|f| f.kind.is_decode()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, case: &OpcodeCase, verdict: Result<(), Failure>) {
        match verdict {
            Ok(()) => {
                debug!("{}: pass", case.id());
                self.passed += 1;
            },
            Err(failure) => {
                warn!("{failure}");
                self.failures.push(failure);
            },
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "FAIL {failure}")?;
        }
        writeln!(
            f,
            "{} passed, {} failed ({} decode failures)",
            self.passed,
            self.failures.len(),
            self.num_decode_failures(),
        )
    }
}

// Run every case against `sim`. A failing case never stops the batch.
pub fn run_batch<S: Simulator>(sim: &mut S, arch: &Arch, cases: &[OpcodeCase]) -> Report {
    let executor = Executor::new(arch);
    let analyzer = Analyzer::new(arch);

    let mut report = Report::default();
    for case in cases {
        let verdict = executor
            .run(sim, case)
            .and_then(|snapshot| analyzer.analyze(case, &snapshot));
        report.record(case, verdict);
    }

    info!(
        "{} cases: {} passed, {} failed",
        report.total(),
        report.passed,
        report.failures.len()
    );
    report
}
