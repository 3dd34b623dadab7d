
use common::arch::AVR;
use common::asm::Opcode;
use emu_lib::Emulator;
use opcheck_lib::{Generator, run_batch};

use clap::Parser;


/// AVR single register instruction checker
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Opcode to check, may be repeated. Defaults to the whole group.
    #[arg(long = "opcode")]
    opcodes: Vec<Opcode>,

    /// Only run cases whose name contains this string, e.g. NEG_r05.
    #[arg(long)]
    filter: Option<String>,

    /// Print case names and exit.
    #[arg(long)]
    list: bool,
}


fn main() {
    env_logger::init();

    let args = Args::parse();
    let opcodes = if args.opcodes.is_empty() {
        Opcode::ALL.to_vec()
    } else {
        args.opcodes
    };

    let mut cases = match Generator::new(&AVR).matrix(&opcodes) {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if let Some(filter) = &args.filter {
        cases.retain(|case| case.id().to_string().contains(filter.as_str()));
    }

    if args.list {
        for case in &cases {
            println!("{}", case.id());
        }
        return;
    }

    let mut emu = Emulator::new();
    let report = run_batch(&mut emu, &AVR, &cases);
    print!("{report}");

    if !report.is_success() {
        std::process::exit(1);
    }
}
