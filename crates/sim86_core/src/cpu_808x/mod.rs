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

    cpu_808x::mod.rs

    Implements the 8086 CPU state: register file, prefix state and the
    instruction counter.

*/

mod addressing;
mod alu;
pub mod decode;
mod execute;
pub mod modrm;
pub mod prefix;
pub mod register_file;

pub use decode::{decode, try_definition, DecodedFieldSet, INSTRUCTION_WINDOW};
pub use execute::{ExecutionReport, WriteBack};
pub use prefix::PrefixState;
pub use register_file::RegisterFile;

use crate::cpu_common::{Flag, Instruction, Register};

#[derive(Default)]
pub struct Cpu {
    regs: RegisterFile,
    prefixes: PrefixState,
    instruction_count: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        *self = Cpu::default();
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    #[inline]
    pub fn get_register(&self, reg: Register) -> u16 {
        self.regs.get(reg)
    }

    #[inline]
    pub fn set_register(&mut self, reg: Register, value: u16) {
        self.regs.set(reg, value);
    }

    #[inline(always)]
    pub fn flags(&self) -> u16 {
        self.regs.flags()
    }

    #[inline(always)]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.get_flag(flag)
    }

    #[inline(always)]
    pub fn set_flag_state(&mut self, flag: Flag, state: bool) {
        self.regs.set_flag_state(flag, state);
    }

    pub fn prefixes(&self) -> &PrefixState {
        &self.prefixes
    }

    /// Run the instruction through the prefix accumulator. Returns true if it was a prefix.
    pub fn handle_prefixes(&mut self, instruction: &mut Instruction) -> bool {
        self.prefixes.apply(instruction)
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }
}
