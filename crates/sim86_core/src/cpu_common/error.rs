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

    cpu_common::error.rs

    This module defines the error types for decoding and execution.

*/

use crate::cpu_common::Mnemonic;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No instruction definition matches bytes {bytes:02X?} at offset: {offset:06X}")]
    NoDefinitionFound { offset: u32, bytes: [u8; 6] },
    #[error("Unaligned read of {field} at bit offset: {bit_offset}")]
    UnalignedField { field: &'static str, bit_offset: usize },
    #[error("Definition reads past the end of the instruction window at bit offset: {bit_offset}")]
    WindowOverrun { bit_offset: usize },
    #[error("Invalid register code: {0:03b}")]
    InvalidRegister(u8),
    #[error("Invalid segment register code: {0:02b}")]
    InvalidSegmentRegister(u8),
    #[error("Invalid addressing mode: {0:02b}")]
    InvalidAddressingMode(u8),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpuError {
    #[error("Execution of operation '{0}' is not supported")]
    UnsupportedOperation(Mnemonic),
    #[error("Cannot write to operand: {0}")]
    InvalidWriteTarget(String),
    #[error("Cannot read from operand: {0}")]
    InvalidReadSource(String),
    #[error("Instruction at offset {offset:06X} runs past the terminator at offset {terminator_offset:06X}")]
    RanPastTerminator { offset: u32, terminator_offset: u32 },
    #[error("An error occurred during instruction decode: {0}")]
    Decode(#[from] DecodeError),
}
