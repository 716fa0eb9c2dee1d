/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    ---------------------------------------------------------------------------

    machine.rs

    The Machine owns the memory bus, the CPU and the instruction definition
    table, and drives the decode/execute loop until the terminator byte is
    reached.

*/

use crate::{
    bus::{BusInterface, DEFAULT_MEMORY_SIZE},
    cpu_808x::{decode, Cpu, ExecutionReport, INSTRUCTION_WINDOW},
    cpu_common::{CpuError, Instruction},
    inst_table::InstructionDefinitionTable,
    tracelogger::TraceLogger,
};

pub const DEFAULT_TERMINATOR: u8 = 0x0F;

#[derive(Copy, Clone, Debug)]
pub struct MachineConfig {
    pub memory_size: usize,
    pub terminator: u8,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            terminator: DEFAULT_TERMINATOR,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Disassemble,
    Execute,
}

#[derive(Clone, Debug)]
pub struct StepResult {
    pub instruction: Instruction,
    /// Present only when an instruction was executed. Prefixes never execute.
    pub report: Option<ExecutionReport>,
}

pub struct Machine {
    cpu: Cpu,
    bus: BusInterface,
    table: InstructionDefinitionTable,
    ip: u32,
    terminator: u8,
    program_len: usize,
}

impl Machine {
    pub fn new(config: MachineConfig, table: InstructionDefinitionTable) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: BusInterface::new(config.memory_size),
            table,
            ip: 0,
            terminator: config.terminator,
            program_len: 0,
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &BusInterface {
        &self.bus
    }

    pub fn ip(&self) -> u32 {
        self.ip
    }

    pub fn program_len(&self) -> usize {
        self.program_len
    }

    /// Load a program image at offset 0 and place the terminator byte after it. Resets the CPU.
    pub fn load_program(&mut self, program: &[u8]) {
        self.cpu.reset();
        self.ip = 0;
        self.program_len = program.len();

        self.bus.copy_from(program, 0);
        self.bus.write_u8(program.len() as u32, self.terminator);

        log::debug!(
            "Loaded program of {} bytes, terminator 0x{:02X} at offset {:06X}",
            program.len(),
            self.terminator,
            program.len()
        );
    }

    /// True when the byte at the instruction pointer is the terminator.
    pub fn at_end(&self) -> bool {
        self.bus.read_u8(self.ip) == self.terminator
    }

    /// Decode the instruction at the instruction pointer, fold it into the prefix state and
    /// advance past it. In `Execute` mode, non-prefix instructions are also executed.
    pub fn step(&mut self, mode: RunMode) -> Result<StepResult, CpuError> {
        let mut window = [0u8; INSTRUCTION_WINDOW];
        self.bus.read_bytes(self.ip, &mut window);

        let mut instruction = decode(&self.table, &window, self.ip)?;

        // An instruction that consumes the terminator would leave nothing to stop the loop.
        let end = self.ip as usize + instruction.size as usize;
        if end > self.program_len {
            return Err(CpuError::RanPastTerminator {
                offset: self.ip,
                terminator_offset: self.program_len as u32,
            });
        }

        let is_prefix = self.cpu.handle_prefixes(&mut instruction);
        self.ip = self.ip.wrapping_add(instruction.size);

        log::trace!("{:06X}: {:?}", instruction.address, instruction.mnemonic);

        let report = match mode {
            RunMode::Execute if !is_prefix => Some(self.cpu.execute(&instruction, &mut self.bus)?),
            _ => None,
        };

        Ok(StepResult { instruction, report })
    }

    /// Run until the terminator is the next byte, writing one line per instruction to `logger`.
    /// REP and LOCK are joined to the line of the instruction they modify. Returns the number
    /// of instructions decoded, prefixes included.
    pub fn run(&mut self, mode: RunMode, logger: &mut TraceLogger) -> Result<u64, CpuError> {
        let mut count = 0;
        let mut pending_prefix = String::new();

        while !self.at_end() {
            let StepResult { instruction, report } = match self.step(mode) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Fatal error at offset {:06X}: {}", self.ip, e);
                    return Err(e);
                }
            };
            count += 1;

            if instruction.mnemonic.is_prefix() {
                pending_prefix.push_str(&instruction.to_string());
                continue;
            }

            let mut line = std::mem::take(&mut pending_prefix);
            line.push_str(&instruction.to_string());
            if let Some(report) = report {
                line.push_str(&format!(" ; {}", report));
            }
            logger.println(line);
        }

        // A dangling prefix right before the terminator still gets listed.
        if !pending_prefix.is_empty() {
            logger.println(pending_prefix.trim_end());
        }
        Ok(count)
    }
}
