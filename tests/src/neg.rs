use crate::check;
use crate::flags::{Flags, flags};
use common::arch::AVR;
use common::asm::{Flag, Opcode, Reg};
use emu_lib::Emulator;
use opcheck_lib::case::START_PC;
use opcheck_lib::generator::coverage;
use opcheck_lib::{Analyzer, Executor, Generator, OpcodeCase, run_batch};

const VALUES: [u8; 6] = [0x00, 0xff, 0xaa, 0xf0, 0x01, 0x80];

fn expect(vd: u8) -> (u8, Flags) {
    match vd {
        0x00 => (0x00, flags().z()),
        0xff => (0x01, flags().h().c()),
        0xaa => (0x56, flags().h().c()),
        0xf0 => (0x10, flags().c()),
        0x01 => (0xff, flags().h().s().n().c()),
        0x80 => (0x80, flags().v().n().c()),
        _ => unreachable!(),
    }
}

#[test]
fn every_register_and_value() {
    for rd in Reg::all() {
        for vd in VALUES {
            let case = OpcodeCase::new(Opcode::Neg, rd, vd);
            let snapshot = check(&case);
            let (res, sreg) = expect(vd);
            assert_eq!(snapshot.reg(rd), res, "{}", case.id());
            assert_eq!(snapshot.reg(rd), 0u8.wrapping_sub(vd), "{}", case.id());
            assert_eq!(snapshot.sreg, sreg.to_bits(), "{}", case.id());
            assert_eq!(snapshot.pc, START_PC + 1, "{}", case.id());
        }
    }
}

#[test]
fn zero() {
    let snapshot = check(&OpcodeCase::new(Opcode::Neg, Reg::R0, 0x00));
    assert_eq!(snapshot.reg(Reg::R0), 0x00);
    assert!(Flag::Z.is_set(snapshot.sreg));
    for flag in [Flag::C, Flag::N, Flag::V, Flag::S, Flag::H] {
        assert!(!flag.is_set(snapshot.sreg), "{flag}");
    }
}

#[test]
fn most_negative() {
    let snapshot = check(&OpcodeCase::new(Opcode::Neg, Reg::R16, 0x80));
    assert_eq!(snapshot.reg(Reg::R16), 0x80);
    assert!(Flag::V.is_set(snapshot.sreg));
    assert!(Flag::N.is_set(snapshot.sreg));
    assert!(!Flag::S.is_set(snapshot.sreg));
    assert!(Flag::C.is_set(snapshot.sreg));
    assert!(!Flag::Z.is_set(snapshot.sreg));
}

#[test]
fn minus_one() {
    let snapshot = check(&OpcodeCase::new(Opcode::Neg, Reg::R31, 0xff));
    assert_eq!(snapshot.reg(Reg::R31), 0x01);
    assert!(Flag::C.is_set(snapshot.sreg));
    assert!(!Flag::Z.is_set(snapshot.sreg));
    assert!(!Flag::N.is_set(snapshot.sreg));
    assert!(!Flag::V.is_set(snapshot.sreg));
}

#[test]
fn only_rd_sreg_and_pc_change() {
    for case in Generator::new(&AVR).cases(Opcode::Neg).unwrap() {
        let preset = case.preset(&AVR);
        let snapshot = check(&case);
        for reg in AVR.regs().filter(|reg| *reg != case.rd) {
            assert_eq!(snapshot.reg(reg), preset.reg(reg), "{} {reg}", case.id());
        }
    }
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = Analyzer::new(&AVR);
    let executor = Executor::new(&AVR);
    for case in Generator::new(&AVR).cases(Opcode::Neg).unwrap() {
        let mut emu = Emulator::new();
        let mut snapshot = executor.run(&mut emu, &case).unwrap();
        assert_eq!(analyzer.analyze(&case, &snapshot), analyzer.analyze(&case, &snapshot));

        // Failing verdicts too.
        snapshot.sreg ^= Flag::H.mask();
        let first = analyzer.analyze(&case, &snapshot);
        assert!(first.is_err());
        assert_eq!(first, analyzer.analyze(&case, &snapshot));
    }
}

#[test]
fn full_matrix() {
    let cases = Generator::new(&AVR).cases(Opcode::Neg).unwrap();
    assert_eq!(cases.len(), 192);

    let cov = coverage(&AVR, &cases);
    for flag in Flag::ARITH {
        assert_eq!(cov.missing(flag), None, "{flag}");
    }

    let mut emu = Emulator::new();
    let report = run_batch(&mut emu, &AVR, &cases);
    assert!(report.is_success(), "{report}");
    assert_eq!(report.passed, 192);
}
