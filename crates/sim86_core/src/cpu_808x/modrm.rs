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

    cpu_808x::modrm.rs

    Resolution of raw register, segment register and mod/rm codes into
    typed operands.

*/

use crate::cpu_common::{
    AddressingBase,
    DecodeError,
    EffectiveAddress,
    Operand,
    Register,
    REGISTER16_LUT,
    REGISTER8_LUT,
    SEGMENT_REGISTER_LUT,
};

pub fn decode_register(code: u8, wide: bool) -> Result<Register, DecodeError> {
    let lut = if wide { &REGISTER16_LUT } else { &REGISTER8_LUT };
    lut.get(code as usize)
        .copied()
        .ok_or(DecodeError::InvalidRegister(code))
}

pub fn decode_segment_register(code: u8) -> Result<Register, DecodeError> {
    SEGMENT_REGISTER_LUT
        .get(code as usize)
        .copied()
        .ok_or(DecodeError::InvalidSegmentRegister(code))
}

/// Resolve the operand selected by a mod/rm pair.
///
/// mod 11 selects a register. Otherwise the operand is in memory: mod 00 with rm 110 is a direct
/// address, and every other combination is a base from the rm code plus `displacement`.
pub fn decode_rm_operand(mod_code: u8, rm: u8, displacement: i32, wide: bool) -> Result<Operand, DecodeError> {
    match (mod_code, rm) {
        (0b11, _) => Ok(Operand::Register(decode_register(rm, wide)?)),
        (0b00, 0b110) => Ok(Operand::Memory(EffectiveAddress::new(
            AddressingBase::Direct,
            displacement,
        ))),
        (0b00..=0b10, _) => Ok(Operand::Memory(EffectiveAddress::new(
            AddressingBase::from_rm(rm)?,
            displacement,
        ))),
        _ => Err(DecodeError::InvalidAddressingMode(mod_code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_register() {
        assert_eq!(decode_register(0b000, false), Ok(Register::AL));
        assert_eq!(decode_register(0b100, false), Ok(Register::AH));
        assert_eq!(decode_register(0b100, true), Ok(Register::SP));
        assert_eq!(decode_register(0b111, true), Ok(Register::DI));
        assert_eq!(decode_register(8, true), Err(DecodeError::InvalidRegister(8)));
    }

    #[test]
    fn test_decode_segment_register() {
        assert_eq!(decode_segment_register(0b00), Ok(Register::ES));
        assert_eq!(decode_segment_register(0b01), Ok(Register::CS));
        assert_eq!(decode_segment_register(0b10), Ok(Register::SS));
        assert_eq!(decode_segment_register(0b11), Ok(Register::DS));
        assert_eq!(decode_segment_register(4), Err(DecodeError::InvalidSegmentRegister(4)));
    }

    #[test]
    fn test_decode_rm_operand() {
        assert_eq!(
            decode_rm_operand(0b11, 0b010, 0, false),
            Ok(Operand::Register(Register::DL))
        );
        assert_eq!(
            decode_rm_operand(0b00, 0b110, 0x1234, true),
            Ok(Operand::Memory(EffectiveAddress::direct(0x1234)))
        );
        assert_eq!(
            decode_rm_operand(0b01, 0b110, -8, true),
            Ok(Operand::Memory(EffectiveAddress::new(AddressingBase::Bp, -8)))
        );
        assert_eq!(
            decode_rm_operand(0b10, 0b000, 1000, true),
            Ok(Operand::Memory(EffectiveAddress::new(AddressingBase::BxSi, 1000)))
        );
        assert_eq!(
            decode_rm_operand(4, 0, 0, true),
            Err(DecodeError::InvalidAddressingMode(4))
        );
    }
}
