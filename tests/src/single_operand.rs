use crate::check;
use crate::flags::{Flags, flags};
use common::arch::AVR;
use common::asm::{Opcode, RdIns, Reg};
use emu_lib::{Emulator, Status};
use opcheck_lib::{Generator, OpcodeCase, run_batch};

const START: u16 = 0x200;

// Because each test is run on a fresh emulator, unaffected flags will be false
fn run_with(op: Opcode, init: u8, flags_init: Flags, exp: u8, flags_exp: Flags) {
    let mut emu = Emulator::new();
    emu.set_pc(START);
    emu.load_instruction(RdIns{op, rd: Reg::R24}.encode());
    emu.reg_write(Reg::R24, init);
    emu.set_status(Status::from_raw(flags_init.to_bits()));
    emu.step().unwrap();
    assert_eq!(emu.reg_read(Reg::R24), exp, "{op} {init:#04x}");
    assert_eq!(
        *emu.get_status(),
        Status::from_raw(flags_exp.to_bits()),
        "{op} {init:#04x}: got {}",
        emu.get_status(),
    );
    assert_eq!(emu.pc(), START + 1);
}

fn run(op: Opcode, init: u8, exp: u8, flags_exp: Flags) {
    run_with(op, init, flags(), exp, flags_exp);
}

fn whole_group(op: Opcode) {
    let cases = Generator::new(&AVR).cases(op).unwrap();
    let mut emu = Emulator::new();
    let report = run_batch(&mut emu, &AVR, &cases);
    assert!(report.is_success(), "{report}");
    assert_eq!(report.passed, 192);
}

#[test]
fn com() {
    run(Opcode::Com, 0x00, 0xff, flags().s().n().c());
    run(Opcode::Com, 0xff, 0x00, flags().z().c());
    run(Opcode::Com, 0xaa, 0x55, flags().c());
    run_with(Opcode::Com, 0x0f, flags().h(), 0xf0, flags().h().s().n().c());
    whole_group(Opcode::Com);
}

#[test]
fn neg() {
    run(Opcode::Neg, 0x00, 0x00, flags().z());
    run(Opcode::Neg, 0x01, 0xff, flags().h().s().n().c());
    run(Opcode::Neg, 0x80, 0x80, flags().v().n().c());
    run(Opcode::Neg, 0x08, 0xf8, flags().h().s().n().c());
    run_with(Opcode::Neg, 0x00, flags().i().t().c(), 0x00, flags().i().t().z());
    whole_group(Opcode::Neg);
}

#[test]
fn swap() {
    run(Opcode::Swap, 0x00, 0x00, flags());
    run(Opcode::Swap, 0x12, 0x21, flags());
    run(Opcode::Swap, 0xf0, 0x0f, flags());
    let all = flags().i().t().h().s().v().n().z().c();
    run_with(Opcode::Swap, 0xa5, all, 0x5a, all);
    whole_group(Opcode::Swap);
}

#[test]
fn inc() {
    run(Opcode::Inc, 0x00, 0x01, flags());
    run(Opcode::Inc, 0xff, 0x00, flags().z());
    run(Opcode::Inc, 0x7f, 0x80, flags().n().v());
    run(Opcode::Inc, 0x80, 0x81, flags().s().n());
    run_with(Opcode::Inc, 0x0f, flags().c().h(), 0x10, flags().c().h());
    whole_group(Opcode::Inc);
}

#[test]
fn dec() {
    run(Opcode::Dec, 0x01, 0x00, flags().z());
    run(Opcode::Dec, 0x00, 0xff, flags().s().n());
    run(Opcode::Dec, 0x80, 0x7f, flags().s().v());
    run(Opcode::Dec, 0x7f, 0x7e, flags());
    run_with(Opcode::Dec, 0x10, flags().c().h(), 0x0f, flags().c().h());
    whole_group(Opcode::Dec);
}

#[test]
fn asr() {
    run(Opcode::Asr, 0x00, 0x00, flags().z());
    run(Opcode::Asr, 0x01, 0x00, flags().s().v().z().c());
    run(Opcode::Asr, 0x80, 0xc0, flags().v().n());
    run(Opcode::Asr, 0x81, 0xc0, flags().s().n().c());
    run(Opcode::Asr, 0x7f, 0x3f, flags().s().v().c());
    whole_group(Opcode::Asr);
}

#[test]
fn lsr() {
    run(Opcode::Lsr, 0x00, 0x00, flags().z());
    run(Opcode::Lsr, 0x01, 0x00, flags().s().v().z().c());
    run(Opcode::Lsr, 0x02, 0x01, flags());
    run(Opcode::Lsr, 0xff, 0x7f, flags().s().v().c());
    whole_group(Opcode::Lsr);
}

#[test]
fn ror() {
    run(Opcode::Ror, 0x01, 0x00, flags().s().v().z().c());
    run(Opcode::Ror, 0x80, 0x40, flags());
    run_with(Opcode::Ror, 0x00, flags().c(), 0x80, flags().v().n());
    run_with(Opcode::Ror, 0x01, flags().c(), 0x80, flags().s().n().c());
    whole_group(Opcode::Ror);
}

#[test]
fn control_bits_survive() {
    for op in Opcode::ALL {
        for vd in [0x00, 0x01, 0x7f, 0x80, 0xff] {
            let mut emu = Emulator::new();
            emu.set_pc(START);
            emu.load_instruction(RdIns{op, rd: Reg::R2}.encode());
            emu.reg_write(Reg::R2, vd);
            emu.set_status(Status::from_raw(Status::I | Status::T));
            emu.step().unwrap();
            let sreg = emu.get_status().to_raw();
            assert_eq!(sreg & (Status::I | Status::T), Status::I | Status::T, "{op} {vd:#04x}");
        }
    }
}

#[test]
fn spot_checks_through_harness() {
    let snapshot = check(&OpcodeCase::new(Opcode::Swap, Reg::R10, 0xa5));
    assert_eq!(snapshot.reg(Reg::R10), 0x5a);
    assert_eq!(snapshot.sreg, 0);
    let snapshot = check(&OpcodeCase::new(Opcode::Dec, Reg::R30, 0x80));
    assert_eq!(snapshot.reg(Reg::R30), 0x7f);
    assert_eq!(snapshot.sreg, Status::S | Status::V);
}
