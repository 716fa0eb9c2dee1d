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

    cpu_common::addressing.rs

    Effective address model for memory operands.

*/

use crate::cpu_common::{DecodeError, Register};
use std::{fmt, fmt::Display};

/// The register combination an effective address is formed from. `Direct` uses no registers
/// and takes the displacement as an absolute offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingBase {
    Direct,
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl AddressingBase {
    /// Map an r/m code to its base. Code 110 maps to Bp here; the mod 00 direct address
    /// exception is resolved by the caller.
    pub fn from_rm(rm: u8) -> Result<AddressingBase, DecodeError> {
        match rm {
            0b000 => Ok(AddressingBase::BxSi),
            0b001 => Ok(AddressingBase::BxDi),
            0b010 => Ok(AddressingBase::BpSi),
            0b011 => Ok(AddressingBase::BpDi),
            0b100 => Ok(AddressingBase::Si),
            0b101 => Ok(AddressingBase::Di),
            0b110 => Ok(AddressingBase::Bp),
            0b111 => Ok(AddressingBase::Bx),
            _ => Err(DecodeError::InvalidRegister(rm)),
        }
    }

    /// The base and index registers summed to form the address.
    pub fn registers(&self) -> (Option<Register>, Option<Register>) {
        match self {
            AddressingBase::Direct => (None, None),
            AddressingBase::BxSi => (Some(Register::BX), Some(Register::SI)),
            AddressingBase::BxDi => (Some(Register::BX), Some(Register::DI)),
            AddressingBase::BpSi => (Some(Register::BP), Some(Register::SI)),
            AddressingBase::BpDi => (Some(Register::BP), Some(Register::DI)),
            AddressingBase::Si => (None, Some(Register::SI)),
            AddressingBase::Di => (None, Some(Register::DI)),
            AddressingBase::Bp => (Some(Register::BP), None),
            AddressingBase::Bx => (Some(Register::BX), None),
        }
    }
}

impl Display for AddressingBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressingBase::Direct => "",
            AddressingBase::BxSi => "bx + si",
            AddressingBase::BxDi => "bx + di",
            AddressingBase::BpSi => "bp + si",
            AddressingBase::BpDi => "bp + di",
            AddressingBase::Si => "si",
            AddressingBase::Di => "di",
            AddressingBase::Bp => "bp",
            AddressingBase::Bx => "bx",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EffectiveAddress {
    pub base: AddressingBase,
    pub displacement: i32,
    pub segment: Option<Register>,
}

impl EffectiveAddress {
    pub fn new(base: AddressingBase, displacement: i32) -> Self {
        Self {
            base,
            displacement,
            segment: None,
        }
    }

    pub fn direct(address: u16) -> Self {
        Self::new(AddressingBase::Direct, address as i32)
    }
}

/// Formats as `es:[bx + si + 4]`. Any size prefix belongs to the instruction formatter.
impl Display for EffectiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(segment) = self.segment {
            write!(f, "{}:", segment)?;
        }
        match self.base {
            AddressingBase::Direct => write!(f, "[{}]", self.displacement),
            base if self.displacement == 0 => write!(f, "[{}]", base),
            base => {
                let sign = if self.displacement < 0 { '-' } else { '+' };
                write!(f, "[{} {} {}]", base, sign, self.displacement.unsigned_abs())
            }
        }
    }
}
