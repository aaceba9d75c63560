use std::env;
use std::fs;

use eyre::{bail, Result, WrapErr};
use log::info;
use simple_logger::SimpleLogger;

use intcode::computer::Computer;
use intcode::{moons, puzzle};

fn main() -> Result<()> {
    SimpleLogger::new().init()?;

    let mut args = env::args().skip(1);
    let (day, path) = match (args.next(), args.next()) {
        (Some(day), Some(path)) => (day, path),
        _ => bail!("usage: intcode <day> <input-file>"),
    };
    let input = fs::read_to_string(&path).wrap_err_with(|| format!("reading {path}"))?;

    match day.as_str() {
        "2" => day02(&input),
        "5" => day05(&input),
        "12" => day12(&input),
        other => bail!("no solver for day {other}"),
    }
}

fn day02(input: &str) -> Result<()> {
    let program = puzzle::parse_program(input)?;

    let mut computer = Computer::new(&program);
    computer.run(Some(12), Some(2), None)?;
    info!("part 1: {}", computer.output());

    for noun in 0..100 {
        for verb in 0..100 {
            let mut computer = Computer::new(&program);
            if computer.run(Some(noun), Some(verb), None).is_ok() && computer.output() == 19_690_720
            {
                info!("part 2: {}", 100 * noun + verb);
                return Ok(());
            }
        }
    }
    bail!("no noun/verb pair reaches the target")
}

fn day05(input: &str) -> Result<()> {
    let program = puzzle::parse_program(input)?;

    // the diagnostic reads the default input of 1 and checks itself
    let mut computer = Computer::new(&program).self_testing();
    computer.run(None, None, None)?;
    info!("part 1: {}", computer.output());

    let mut computer = Computer::new(&program);
    computer.run(None, None, Some(5))?;
    info!("part 2: {}", computer.output());
    Ok(())
}

fn day12(input: &str) -> Result<()> {
    let scan = moons::parse(input)?;
    info!("part 1: {}", moons::total_energy(scan.clone(), 1000));
    info!("part 2: {}", moons::cycle_length(&scan));
    Ok(())
}
