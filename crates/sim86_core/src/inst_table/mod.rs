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

    inst_table::mod.rs

    Instruction definition table. Each definition is an ordered list of
    parts describing the bit layout of one encoding of an operation. The
    decoder tries definitions in table order and the first match wins, so
    specific encodings must precede general ones.

*/

mod parse;

use std::{path::Path, str::FromStr};

use crate::cpu_common::Mnemonic;
pub use parse::{parse_table, TableError};

/// The complete 8086 definition table shipped with the crate.
pub const BUNDLED_TABLE: &str = include_str!("8086_inst_table.txt");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InstructionPart {
    /// A literal bit pattern of 1-8 bits that must match exactly.
    Bits { value: u8, size: u8 },
    D,
    W,
    S,
    V,
    Z,
    Mod,
    Reg,
    Rm,
    Sr,
    Data,
    DataIfW,
    Addr,
    Disp,
    ImplicitD(bool),
    ImplicitW(bool),
    ImplicitReg(u8),
    ImplicitMod(u8),
    ImplicitRm(u8),
    /// Register-mode r/m operands are always 16 bit, regardless of W.
    RmRegWide,
}

impl InstructionPart {
    /// Bits this part consumes from the instruction stream during the fixed-field pass.
    pub fn bit_size(&self) -> usize {
        match self {
            InstructionPart::Bits { size, .. } => *size as usize,
            InstructionPart::D
            | InstructionPart::W
            | InstructionPart::S
            | InstructionPart::V
            | InstructionPart::Z => 1,
            InstructionPart::Mod | InstructionPart::Sr => 2,
            InstructionPart::Reg | InstructionPart::Rm => 3,
            InstructionPart::Addr => 16,
            InstructionPart::Disp => 8,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionDefinition {
    pub mnemonic: Mnemonic,
    pub parts: Vec<InstructionPart>,
}

#[derive(Clone, Debug, Default)]
pub struct InstructionDefinitionTable {
    definitions: Vec<InstructionDefinition>,
}

impl InstructionDefinitionTable {
    pub fn new(definitions: Vec<InstructionDefinition>) -> Self {
        Self { definitions }
    }

    pub fn bundled() -> Result<Self, TableError> {
        let table: Self = BUNDLED_TABLE.parse()?;
        log::debug!("Loaded {} instruction definitions from bundled table", table.len());
        Ok(table)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let table: Self = text.parse()?;
        log::debug!(
            "Loaded {} instruction definitions from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstructionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromStr for InstructionDefinitionTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(parse_table(s)?))
    }
}
