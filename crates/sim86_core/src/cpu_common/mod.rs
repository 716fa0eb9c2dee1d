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

    cpu_common::mod.rs

    Types shared between the decoder and the execution engine: register
    identities, flag definitions and the parity lookup table.

*/

pub mod addressing;
pub mod alu;
pub mod error;
pub mod instruction;
pub mod mnemonic;

pub use addressing::{AddressingBase, EffectiveAddress};
pub use error::{CpuError, DecodeError};
pub use instruction::{Instruction, Operand};
pub use mnemonic::Mnemonic;

use strum_macros::{Display, IntoStaticStr};

pub const CPU_FLAG_CARRY: u16 = 0b0000_0000_0000_0001;
pub const CPU_FLAG_PARITY: u16 = 0b0000_0000_0000_0100;
pub const CPU_FLAG_AUX_CARRY: u16 = 0b0000_0000_0001_0000;
pub const CPU_FLAG_ZERO: u16 = 0b0000_0000_0100_0000;
pub const CPU_FLAG_SIGN: u16 = 0b0000_0000_1000_0000;
pub const CPU_FLAG_TRAP: u16 = 0b0000_0001_0000_0000;
pub const CPU_FLAG_INT_ENABLE: u16 = 0b0000_0010_0000_0000;
pub const CPU_FLAG_DIRECTION: u16 = 0b0000_0100_0000_0000;
pub const CPU_FLAG_OVERFLOW: u16 = 0b0000_1000_0000_0000;

/// Even parity of the low byte of a result, indexed by that byte.
pub const PARITY_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut index = 0;
    loop {
        table[index] = index.count_ones() % 2 == 0;
        index += 1;
        if index == 256 {
            break;
        }
    }
    table
};

/// Every register an operand may name. Eight-bit halves, the eight 16-bit general purpose
/// registers, and the four segment registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Register {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
    ES,
    CS,
    SS,
    DS,
}

impl Register {
    pub fn is_wide(&self) -> bool {
        !matches!(
            self,
            Register::AL
                | Register::CL
                | Register::DL
                | Register::BL
                | Register::AH
                | Register::CH
                | Register::DH
                | Register::BH
        )
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, Register::ES | Register::CS | Register::SS | Register::DS)
    }
}

pub const REGISTER8_LUT: [Register; 8] = [
    Register::AL,
    Register::CL,
    Register::DL,
    Register::BL,
    Register::AH,
    Register::CH,
    Register::DH,
    Register::BH,
];

pub const REGISTER16_LUT: [Register; 8] = [
    Register::AX,
    Register::CX,
    Register::DX,
    Register::BX,
    Register::SP,
    Register::BP,
    Register::SI,
    Register::DI,
];

pub const SEGMENT_REGISTER_LUT: [Register; 4] = [Register::ES, Register::CS, Register::SS, Register::DS];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    Carry,
    Parity,
    AuxCarry,
    Zero,
    Sign,
    Trap,
    Interrupt,
    Direction,
    Overflow,
}

/// Flags in the order they are listed in a flags string.
pub const FLAG_ORDER: [Flag; 9] = [
    Flag::Carry,
    Flag::Parity,
    Flag::AuxCarry,
    Flag::Zero,
    Flag::Sign,
    Flag::Trap,
    Flag::Interrupt,
    Flag::Direction,
    Flag::Overflow,
];

impl Flag {
    pub const fn mask(&self) -> u16 {
        match self {
            Flag::Carry => CPU_FLAG_CARRY,
            Flag::Parity => CPU_FLAG_PARITY,
            Flag::AuxCarry => CPU_FLAG_AUX_CARRY,
            Flag::Zero => CPU_FLAG_ZERO,
            Flag::Sign => CPU_FLAG_SIGN,
            Flag::Trap => CPU_FLAG_TRAP,
            Flag::Interrupt => CPU_FLAG_INT_ENABLE,
            Flag::Direction => CPU_FLAG_DIRECTION,
            Flag::Overflow => CPU_FLAG_OVERFLOW,
        }
    }

    pub const fn letter(&self) -> char {
        match self {
            Flag::Carry => 'C',
            Flag::Parity => 'P',
            Flag::AuxCarry => 'A',
            Flag::Zero => 'Z',
            Flag::Sign => 'S',
            Flag::Trap => 'T',
            Flag::Interrupt => 'I',
            Flag::Direction => 'D',
            Flag::Overflow => 'O',
        }
    }
}

/// Render the set flags of a flags word as letters, eg. "PZ".
pub fn flags_to_string(flags: u16) -> String {
    FLAG_ORDER
        .iter()
        .filter(|flag| flags & flag.mask() != 0)
        .map(Flag::letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_table() {
        assert!(PARITY_TABLE[0x00]);
        assert!(!PARITY_TABLE[0x01]);
        assert!(PARITY_TABLE[0x03]);
        assert!(PARITY_TABLE[0xFF]);
        assert!(!PARITY_TABLE[0x80]);
    }

    #[test]
    fn test_flags_to_string() {
        assert_eq!(flags_to_string(0), "");
        assert_eq!(flags_to_string(CPU_FLAG_ZERO | CPU_FLAG_PARITY), "PZ");
        let all = FLAG_ORDER.iter().fold(0, |acc, f| acc | f.mask());
        assert_eq!(flags_to_string(all), "CPAZSTIDO");
    }

    #[test]
    fn test_register_names() {
        assert_eq!(Register::AX.to_string(), "ax");
        assert_eq!(Register::BH.to_string(), "bh");
        assert!(Register::SP.is_wide());
        assert!(!Register::AH.is_wide());
        assert!(Register::DS.is_segment());
    }
}
