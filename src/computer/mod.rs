//! A stored-program computer over a flat image of signed integers.
//!
//! Programs are their own memory: the machine decodes the word at the
//! program counter, resolves each parameter through its addressing mode
//! (position or immediate), executes, and advances until it decodes the
//! halt opcode. One word of pending input feeds every `store` instruction;
//! the most recent `out` value is kept as the machine's output.

mod error;
mod instructions;

pub use error::ExecError;
pub use instructions::{Op, OPCODES};

use log::trace;
use smallvec::SmallVec;

/// Machine words are signed: programs routinely store negative sentinels.
pub type Word = i64;

const POSITION: u8 = 0;
const IMMEDIATE: u8 = 1;

/// A fetched parameter: the raw memory cell and its addressing-mode digit.
#[derive(Copy, Clone, Debug)]
struct Param {
    raw: Word,
    mode: u8,
}

/// Split an instruction word into its opcode (the low two decimal digits)
/// and the per-parameter mode digits above them, least significant first.
/// Missing digits read as position mode. Decoding never fails; a bad opcode
/// surfaces at dispatch and a bad mode digit at operand resolution.
fn decode(word: Word) -> (Word, SmallVec<[u8; 3]>) {
    let opcode = word % 100;
    let mut rest = word / 100;
    let mut modes = SmallVec::new();
    for _ in 0..3 {
        modes.push((rest % 10) as u8);
        rest /= 10;
    }
    (opcode, modes)
}

/// Bounds-check a position-mode address against the memory image.
fn checked_addr(mem: &[Word], raw: Word) -> Result<usize, ExecError> {
    usize::try_from(raw)
        .ok()
        .filter(|&addr| addr < mem.len())
        .ok_or(ExecError::AddressOutOfBounds {
            address: raw,
            len: mem.len(),
        })
}

/// Resolve a parameter for reading.
fn resolve_read(mem: &[Word], param: Param) -> Result<Word, ExecError> {
    match param.mode {
        POSITION => Ok(mem[checked_addr(mem, param.raw)?]),
        IMMEDIATE => Ok(param.raw),
        mode => Err(ExecError::UnknownParameterMode(mode)),
    }
}

/// Resolve a parameter for writing. Destinations are position mode only.
fn resolve_write(mem: &mut [Word], param: Param, value: Word) -> Result<(), ExecError> {
    match param.mode {
        POSITION => {
            let addr = checked_addr(mem, param.raw)?;
            mem[addr] = value;
            Ok(())
        }
        IMMEDIATE => Err(ExecError::InvalidWriteMode),
        mode => Err(ExecError::UnknownParameterMode(mode)),
    }
}

pub struct Computer {
    mem: Vec<Word>,
    pc: usize,
    input: Word,
    output: Option<Word>,
    self_test: bool,
    last_op: Option<Op>,
}

impl Computer {
    /// Copies `program` into fresh memory, so the caller's image is never
    /// mutated and machines built from the same program never share state.
    pub fn new(program: &[Word]) -> Computer {
        Computer {
            mem: program.to_vec(),
            pc: 0,
            input: 1,
            output: None,
            self_test: false,
            last_op: None,
        }
    }

    /// Treat any non-zero output left behind mid-run as a failed check.
    /// Diagnostic programs emit 0 for every test they pass and save their
    /// one real answer for the instruction just before the halt; ordinary
    /// programs should leave this off.
    pub fn self_testing(mut self) -> Computer {
        self.self_test = true;
        self
    }

    /// The memory image as execution last left it.
    pub fn mem(&self) -> &[Word] {
        &self.mem
    }

    /// The machine's result: the last word an `out` instruction produced,
    /// or memory cell 0 for programs that report through memory instead.
    pub fn output(&self) -> Word {
        match self.output {
            Some(value) => value,
            None => self.mem.first().copied().unwrap_or_default(),
        }
    }

    /// Execute until the halt opcode. `noun` and `verb` overwrite memory
    /// cells 1 and 2 before anything runs; `input` replaces the word every
    /// `store` instruction consumes (1 when never supplied).
    pub fn run(
        &mut self,
        noun: Option<Word>,
        verb: Option<Word>,
        input: Option<Word>,
    ) -> Result<(), ExecError> {
        if let Some(noun) = noun {
            self.poke(1, noun)?;
        }
        if let Some(verb) = verb {
            self.poke(2, verb)?;
        }
        if let Some(input) = input {
            self.input = input;
        }

        loop {
            let word = self.fetch(self.pc)?;
            let (opcode, modes) = decode(word);
            let op = u8::try_from(opcode)
                .ok()
                .and_then(|code| OPCODES.get(&code))
                .copied()
                .ok_or(ExecError::UnknownOpcode {
                    opcode,
                    pc: self.pc,
                })?;

            if self.self_test && op != Op::Halt {
                if let (Some(output), Some(last)) = (self.output, self.last_op) {
                    if output != 0 {
                        return Err(ExecError::SelfTestFailure { output, op: last });
                    }
                }
            }

            let params = self.operands(op.params(), &modes)?;
            let pc_before = self.pc;
            trace!("pc {:<5} {}", self.pc, op);

            match op {
                Op::Halt => break,
                Op::Add => {
                    let sum = resolve_read(&self.mem, params[0])?
                        .wrapping_add(resolve_read(&self.mem, params[1])?);
                    resolve_write(&mut self.mem, params[2], sum)?;
                }
                Op::Mul => {
                    let product = resolve_read(&self.mem, params[0])?
                        .wrapping_mul(resolve_read(&self.mem, params[1])?);
                    resolve_write(&mut self.mem, params[2], product)?;
                }
                Op::Store => resolve_write(&mut self.mem, params[0], self.input)?,
                Op::Out => self.output = Some(resolve_read(&self.mem, params[0])?),
                Op::JumpIfTrue => {
                    if resolve_read(&self.mem, params[0])? != 0 {
                        self.jump(resolve_read(&self.mem, params[1])?)?;
                    }
                }
                Op::JumpIfFalse => {
                    if resolve_read(&self.mem, params[0])? == 0 {
                        self.jump(resolve_read(&self.mem, params[1])?)?;
                    }
                }
                Op::LessThan => {
                    let flag = resolve_read(&self.mem, params[0])?
                        < resolve_read(&self.mem, params[1])?;
                    resolve_write(&mut self.mem, params[2], flag as Word)?;
                }
                Op::Equals => {
                    let flag = resolve_read(&self.mem, params[0])?
                        == resolve_read(&self.mem, params[1])?;
                    resolve_write(&mut self.mem, params[2], flag as Word)?;
                }
            }

            // Jumps move pc themselves and skip the automatic advance.
            if self.pc == pc_before {
                self.pc += op.params() + 1;
            }
            self.last_op = Some(op);
        }
        Ok(())
    }

    fn fetch(&self, addr: usize) -> Result<Word, ExecError> {
        self.mem
            .get(addr)
            .copied()
            .ok_or(ExecError::AddressOutOfBounds {
                address: addr as Word,
                len: self.mem.len(),
            })
    }

    fn operands(&self, count: usize, modes: &[u8]) -> Result<SmallVec<[Param; 3]>, ExecError> {
        (0..count)
            .map(|slot| {
                Ok(Param {
                    raw: self.fetch(self.pc + 1 + slot)?,
                    mode: modes[slot],
                })
            })
            .collect()
    }

    fn jump(&mut self, target: Word) -> Result<(), ExecError> {
        self.pc = usize::try_from(target).map_err(|_| ExecError::AddressOutOfBounds {
            address: target,
            len: self.mem.len(),
        })?;
        Ok(())
    }

    fn poke(&mut self, addr: usize, value: Word) -> Result<(), ExecError> {
        let len = self.mem.len();
        let cell = self
            .mem
            .get_mut(addr)
            .ok_or(ExecError::AddressOutOfBounds {
                address: addr as Word,
                len,
            })?;
        *cell = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_mem(program: &[Word]) -> Vec<Word> {
        let mut computer = Computer::new(program);
        computer.run(None, None, None).expect("run failed");
        computer.mem().to_vec()
    }

    fn run_output(program: &[Word], input: Option<Word>) -> Word {
        let mut computer = Computer::new(program);
        computer.run(None, None, input).expect("run failed");
        computer.output()
    }

    fn run_err(program: &[Word]) -> ExecError {
        let mut computer = Computer::new(program);
        computer.run(None, None, None).expect_err("expected error")
    }

    #[test]
    fn add_and_mul_position_mode() {
        assert_eq!(
            run_mem(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]),
            [3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]
        );
        assert_eq!(run_mem(&[1, 0, 0, 0, 99]), [2, 0, 0, 0, 99]);
        assert_eq!(run_mem(&[2, 3, 0, 3, 99]), [2, 3, 0, 6, 99]);
        assert_eq!(run_mem(&[2, 4, 4, 5, 99, 0]), [2, 4, 4, 5, 99, 9801]);
        assert_eq!(
            run_mem(&[1, 1, 1, 4, 99, 5, 6, 0, 99]),
            [30, 1, 1, 4, 2, 5, 6, 0, 99]
        );
    }

    #[test]
    fn immediate_mode_operands() {
        assert_eq!(run_mem(&[1002, 4, 3, 4, 33]), [1002, 4, 3, 4, 99]);
        assert_eq!(run_mem(&[1101, 100, -1, 4, 0]), [1101, 100, -1, 4, 99]);
    }

    #[test]
    fn store_then_out_echoes_input() {
        // pending input defaults to 1
        assert_eq!(run_output(&[3, 0, 4, 0, 99], None), 1);
        assert_eq!(run_output(&[3, 0, 4, 0, 99], Some(77)), 77);
    }

    #[test]
    fn equals_position_mode() {
        let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run_output(&program, Some(8)), 1);
        assert_eq!(run_output(&program, Some(5)), 0);
    }

    #[test]
    fn less_than_position_mode() {
        let program = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run_output(&program, Some(5)), 1);
        assert_eq!(run_output(&program, Some(8)), 0);
    }

    #[test]
    fn equals_immediate_mode() {
        let program = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
        assert_eq!(run_output(&program, Some(8)), 1);
        assert_eq!(run_output(&program, Some(5)), 0);
    }

    #[test]
    fn jumps_position_mode() {
        // emits 0 for a zero input and 1 for anything else; the only path
        // to the second out runs through a taken jump
        let program = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
        assert_eq!(run_output(&program, Some(0)), 0);
        assert_eq!(run_output(&program, Some(4)), 1);
    }

    #[test]
    fn jumps_immediate_mode() {
        let program = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
        assert_eq!(run_output(&program, Some(0)), 0);
        assert_eq!(run_output(&program, Some(4)), 1);
    }

    #[test]
    fn compares_around_eight() {
        // emits 999, 1000 or 1001 for input below, at or above 8
        let program = [
            3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98,
            0, 0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20,
            4, 20, 1105, 1, 46, 98, 99,
        ];
        assert_eq!(run_output(&program, Some(7)), 999);
        assert_eq!(run_output(&program, Some(8)), 1000);
        assert_eq!(run_output(&program, Some(9)), 1001);
    }

    #[test]
    fn noun_and_verb_overwrite_cells_one_and_two() {
        let mut computer = Computer::new(&[1, 0, 0, 0, 99]);
        computer.run(Some(4), Some(4), None).expect("run failed");
        assert_eq!(computer.mem(), [198, 4, 4, 0, 99]);
        // no out instruction ran, so output falls back to cell 0
        assert_eq!(computer.output(), 198);
    }

    #[test]
    fn construction_copies_and_runs_stay_independent() {
        let program = vec![1, 0, 0, 0, 99];
        assert_eq!(Computer::new(&program).mem(), program.as_slice());

        let mut first = Computer::new(&program);
        let mut second = Computer::new(&program);
        first.run(None, None, None).expect("run failed");
        assert_eq!(program, [1, 0, 0, 0, 99]);
        second.run(None, None, None).expect("run failed");
        assert_eq!(first.mem(), second.mem());
    }

    #[test]
    fn output_accessor_is_idempotent() {
        let mut computer = Computer::new(&[104, 7, 99]);
        computer.run(None, None, None).expect("run failed");
        assert_eq!(computer.output(), 7);
        assert_eq!(computer.output(), 7);
    }

    #[test]
    fn unknown_opcode_reports_position() {
        assert_eq!(
            run_err(&[1, 0, 0, 0, 50, 0, 0]),
            ExecError::UnknownOpcode { opcode: 50, pc: 4 }
        );
    }

    #[test]
    fn negative_word_is_an_unknown_opcode() {
        assert_eq!(
            run_err(&[-1, 0, 0]),
            ExecError::UnknownOpcode { opcode: -1, pc: 0 }
        );
    }

    #[test]
    fn write_through_immediate_parameter_fails() {
        assert_eq!(run_err(&[10001, 0, 0, 0, 99]), ExecError::InvalidWriteMode);
    }

    #[test]
    fn out_of_range_address_fails() {
        assert_eq!(
            run_err(&[1, 100, 0, 0, 99]),
            ExecError::AddressOutOfBounds {
                address: 100,
                len: 5
            }
        );
    }

    #[test]
    fn unknown_parameter_mode_fails() {
        assert_eq!(
            run_err(&[201, 0, 0, 0, 99]),
            ExecError::UnknownParameterMode(2)
        );
    }

    #[test]
    fn self_test_flags_stray_output() {
        let mut computer = Computer::new(&[104, 13, 1101, 0, 0, 0, 99]).self_testing();
        assert_eq!(
            computer.run(None, None, None),
            Err(ExecError::SelfTestFailure {
                output: 13,
                op: Op::Out
            })
        );
    }

    #[test]
    fn self_test_allows_the_final_answer() {
        // zeros mid-run, the real answer right before the halt
        let mut computer = Computer::new(&[104, 0, 104, 5, 99]).self_testing();
        computer.run(None, None, None).expect("run failed");
        assert_eq!(computer.output(), 5);
    }

    #[test]
    fn stray_output_passes_without_self_test() {
        let mut computer = Computer::new(&[104, 13, 1101, 0, 0, 0, 99]);
        computer.run(None, None, None).expect("run failed");
        assert_eq!(computer.output(), 13);
    }
}
