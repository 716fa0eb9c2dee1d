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

    cpu_808x::alu.rs

    Flag-setting arithmetic for the 8086.

*/

use crate::{
    cpu_808x::Cpu,
    cpu_common::{
        alu::{AluAdd, AluSub, Xi},
        Flag,
        PARITY_TABLE,
    },
};

impl Cpu {
    #[inline(always)]
    fn set_parity_flag_from_u8(&mut self, operand: u8) {
        self.set_flag_state(Flag::Parity, PARITY_TABLE[operand as usize]);
    }

    #[inline(always)]
    fn set_parity_flag_from_u16(&mut self, operand: u16) {
        self.set_flag_state(Flag::Parity, PARITY_TABLE[(operand & 0xFF) as usize]);
    }

    pub fn set_szp_flags_from_result_u8(&mut self, result: u8) {
        // Set Sign flag to state of Sign (HO) bit
        self.set_flag_state(Flag::Sign, result & 0x80 != 0);

        // Set Zero flag if result is 0, clear it if not
        self.set_flag_state(Flag::Zero, result == 0);

        self.set_parity_flag_from_u8(result);
    }

    pub fn set_szp_flags_from_result_u16(&mut self, result: u16) {
        self.set_flag_state(Flag::Sign, result & 0x8000 != 0);
        self.set_flag_state(Flag::Zero, result == 0);
        self.set_parity_flag_from_u16(result);
    }

    #[inline(always)]
    fn set_arithmetic_flags(&mut self, carry: bool, overflow: bool, aux_carry: bool) {
        self.set_flag_state(Flag::Carry, carry);
        self.set_flag_state(Flag::Overflow, overflow);
        self.set_flag_state(Flag::AuxCarry, aux_carry);
    }

    /// Perform an 8-bit ALU operation and set CF, PF, AF, ZF, SF and OF from it.
    /// CMP returns operand1 unchanged.
    pub fn math_op8(&mut self, xi: Xi, operand1: u8, operand2: u8) -> u8 {
        match xi {
            Xi::ADD => {
                let (result, carry, overflow, aux_carry) = operand1.alu_add(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u8(result);
                result
            }
            Xi::SUB => {
                let (result, carry, overflow, aux_carry) = operand1.alu_sub(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u8(result);
                result
            }
            Xi::CMP => {
                // CMP is SUB without writeback
                let (result, carry, overflow, aux_carry) = operand1.alu_sub(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u8(result);
                operand1
            }
        }
    }

    /// 16-bit counterpart of [`Cpu::math_op8`].
    pub fn math_op16(&mut self, xi: Xi, operand1: u16, operand2: u16) -> u16 {
        match xi {
            Xi::ADD => {
                let (result, carry, overflow, aux_carry) = operand1.alu_add(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u16(result);
                result
            }
            Xi::SUB => {
                let (result, carry, overflow, aux_carry) = operand1.alu_sub(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u16(result);
                result
            }
            Xi::CMP => {
                let (result, carry, overflow, aux_carry) = operand1.alu_sub(operand2);
                self.set_arithmetic_flags(carry, overflow, aux_carry);
                self.set_szp_flags_from_result_u16(result);
                operand1
            }
        }
    }

    /// Dispatch to the 8 or 16-bit ALU. Operands are truncated to the operation width.
    pub fn alu_op(&mut self, xi: Xi, operand1: u16, operand2: u16, wide: bool) -> u16 {
        if wide {
            self.math_op16(xi, operand1, operand2)
        }
        else {
            self.math_op8(xi, operand1 as u8, operand2 as u8) as u16
        }
    }
}
