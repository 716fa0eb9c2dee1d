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

    cpu_common::alu.rs

    Width-generic arithmetic primitives. Each returns the wrapped result
    along with the carry, overflow and auxiliary carry conditions.

*/

/// ALU operations the execution engine dispatches on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Xi {
    ADD,
    SUB,
    CMP,
}

pub trait AluAdd<Rhs = Self>: Sized {
    fn alu_add(self, rhs: Rhs) -> (Self, bool, bool, bool);
}

pub trait AluSub<Rhs = Self>: Sized {
    fn alu_sub(self, rhs: Rhs) -> (Self, bool, bool, bool);
}

macro_rules! impl_sub {
    ($prim:ty) => {
        impl AluSub for $prim {
            /// Subtraction
            ///
            /// Carry flag is set if an unsigned borrow occurred
            /// Overflow flag is set if the signed result left the signed range
            /// AF flag is set if the low nibble borrowed from the high nibble
            fn alu_sub(self, rhs: Self) -> (Self, bool, bool, bool) {
                let (result, carry) = self.overflowing_sub(rhs);
                let overflow = (self ^ rhs) & (self ^ result) & (1 << (<$prim>::BITS - 1)) != 0;
                let aux_carry = ((self ^ rhs ^ result) & 0x10) != 0;
                (result, carry, overflow, aux_carry)
            }
        }
    };
}

macro_rules! impl_add {
    ($prim:ty) => {
        impl AluAdd for $prim {
            /// Addition
            ///
            /// Carry flag is set if unsigned overflow occurred
            /// Overflow flag is set if the signed result left the signed range
            /// AF flag is set if the low nibble carried into the high nibble
            fn alu_add(self, rhs: Self) -> (Self, bool, bool, bool) {
                let (result, carry) = self.overflowing_add(rhs);
                let overflow = (self ^ result) & (rhs ^ result) & (1 << (<$prim>::BITS - 1)) != 0;
                let aux_carry = ((self ^ rhs ^ result) & 0x10) != 0;
                (result, carry, overflow, aux_carry)
            }
        }
    };
}

impl_sub!(u8);
impl_sub!(u16);
impl_add!(u8);
impl_add!(u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_u8() {
        assert_eq!(0xFFu8.alu_add(0x01), (0x00, true, false, true));
        assert_eq!(0x7Fu8.alu_add(0x01), (0x80, false, true, true));
        assert_eq!(0x01u8.alu_add(0x02), (0x03, false, false, false));
    }

    #[test]
    fn test_add_u16() {
        assert_eq!(0x7FFFu16.alu_add(0x0001), (0x8000, false, true, true));
        assert_eq!(0x8000u16.alu_add(0x8000), (0x0000, true, true, false));
    }

    #[test]
    fn test_sub_u8() {
        assert_eq!(0x00u8.alu_sub(0x01), (0xFF, true, false, true));
        assert_eq!(0x80u8.alu_sub(0x01), (0x7F, false, true, true));
        assert_eq!(0x10u8.alu_sub(0x10), (0x00, false, false, false));
    }

    #[test]
    fn test_sub_u16() {
        assert_eq!(0x8000u16.alu_sub(0x0001), (0x7FFF, false, true, true));
        assert_eq!(0x0000u16.alu_sub(0x8000), (0x8000, true, true, false));
    }
}
