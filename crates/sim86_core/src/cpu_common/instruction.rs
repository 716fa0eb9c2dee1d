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

    cpu_common::instruction.rs

    The decoded instruction and its operands, with nasm-compatible
    disassembly formatting.

*/

use std::fmt::{Display, Formatter, Result as fmtResult};

use crate::cpu_common::{EffectiveAddress, Mnemonic, Register};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Operand {
    #[default]
    NoOperand,
    Register(Register),
    Memory(EffectiveAddress),
    Immediate(u32),
    /// Branch displacement relative to the end of the instruction.
    RelativeImmediate(i32),
}

impl Operand {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::NoOperand)
    }

    #[inline]
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Memory(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub address: u32,
    pub size: u32,
    pub mnemonic: Mnemonic,
    pub wide: bool,
    pub dst: Operand,
    pub src: Operand,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            address: 0,
            size: 0,
            mnemonic: Mnemonic::MOV,
            wide: false,
            dst: Operand::NoOperand,
            src: Operand::NoOperand,
        }
    }
}

impl Instruction {
    /// Place an operand in the source slot, or in the destination slot if the source is
    /// already occupied.
    pub fn place_operand(&mut self, operand: Operand) {
        if self.src.is_none() {
            self.src = operand;
        }
        else {
            self.dst = operand;
        }
    }

    /// A lone operand always ends up in the destination slot. Idempotent.
    pub fn normalize_operands(&mut self) {
        if self.dst.is_none() && !self.src.is_none() {
            self.dst = self.src;
            self.src = Operand::NoOperand;
        }
    }

    /// Attach a segment override to any memory operand.
    pub fn set_segment_override(&mut self, segment: Option<Register>) {
        for operand in [&mut self.dst, &mut self.src] {
            if let Operand::Memory(ea) = operand {
                ea.segment = segment;
            }
        }
    }

    fn operand_to_string(&self, operand: &Operand, is_dst: bool) -> String {
        match operand {
            Operand::NoOperand => String::new(),
            Operand::Register(reg) => reg.to_string(),
            Operand::Immediate(imm) => format!("{}", imm),
            Operand::RelativeImmediate(rel) => {
                // nasm '$' is the start of this instruction
                let offset = *rel + self.size as i32;
                if offset < 0 {
                    format!("$-{}", offset.unsigned_abs())
                }
                else {
                    format!("$+{}", offset)
                }
            }
            Operand::Memory(ea) => {
                if is_dst {
                    format!("{}{}", if self.wide { "word " } else { "byte " }, ea)
                }
                else {
                    ea.to_string()
                }
            }
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmtResult {
        match self.mnemonic {
            // Segment overrides show up on the memory operand of the next instruction.
            Mnemonic::SEGMENT => return Ok(()),
            Mnemonic::REP | Mnemonic::LOCK => return write!(f, "{} ", self.mnemonic),
            _ => {}
        }

        let (mut dst, mut src) = (&self.dst, &self.src);

        // nasm only accepts the accumulator form of xchg with ax as the first operand
        if self.mnemonic == Mnemonic::XCHG
            && (matches!(dst, Operand::Register(reg) if *reg != Register::AX)
                || matches!(src, Operand::Register(Register::AX)))
        {
            std::mem::swap(&mut dst, &mut src);
        }

        match (dst, src) {
            (Operand::NoOperand, _) => {
                write!(f, "{}", self.mnemonic)?;
                if self.mnemonic.is_string_op() {
                    write!(f, "{}", if self.wide { "w" } else { "b" })?;
                }
                Ok(())
            }
            (dst, Operand::NoOperand) => {
                write!(f, "{} {}", self.mnemonic, self.operand_to_string(dst, true))
            }
            (dst, src) => write!(
                f,
                "{} {}, {}",
                self.mnemonic,
                self.operand_to_string(dst, true),
                self.operand_to_string(src, false)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_common::AddressingBase;

    fn instr(mnemonic: Mnemonic, wide: bool, dst: Operand, src: Operand) -> Instruction {
        Instruction {
            size: 2,
            mnemonic,
            wide,
            dst,
            src,
            ..Default::default()
        }
    }

    #[test]
    fn test_place_and_normalize() {
        let mut i = Instruction::default();
        i.place_operand(Operand::Immediate(5));
        assert_eq!(i.src, Operand::Immediate(5));
        i.place_operand(Operand::Register(Register::BX));
        assert_eq!(i.dst, Operand::Register(Register::BX));

        let mut i = Instruction::default();
        i.src = Operand::Register(Register::CX);
        i.normalize_operands();
        assert_eq!(i.dst, Operand::Register(Register::CX));
        assert!(i.src.is_none());
        let before = i.clone();
        i.normalize_operands();
        assert_eq!(i, before);
    }

    #[test]
    fn test_display_two_operands() {
        let i = instr(
            Mnemonic::MOV,
            true,
            Operand::Register(Register::CX),
            Operand::Register(Register::BX),
        );
        assert_eq!(i.to_string(), "mov cx, bx");

        let i = instr(
            Mnemonic::MOV,
            false,
            Operand::Memory(EffectiveAddress::new(AddressingBase::BpDi, -37)),
            Operand::Immediate(7),
        );
        assert_eq!(i.to_string(), "mov byte [bp + di - 37], 7");

        let i = instr(
            Mnemonic::ADD,
            true,
            Operand::Register(Register::AX),
            Operand::Memory(EffectiveAddress::direct(1000)),
        );
        assert_eq!(i.to_string(), "add ax, [1000]");
    }

    #[test]
    fn test_display_single_and_none() {
        let i = instr(
            Mnemonic::PUSH,
            true,
            Operand::Memory(EffectiveAddress::new(AddressingBase::Bx, 0)),
            Operand::NoOperand,
        );
        assert_eq!(i.to_string(), "push word [bx]");

        let i = instr(Mnemonic::MOVS, true, Operand::NoOperand, Operand::NoOperand);
        assert_eq!(i.to_string(), "movsw");
        let i = instr(Mnemonic::STOS, false, Operand::NoOperand, Operand::NoOperand);
        assert_eq!(i.to_string(), "stosb");
        let i = instr(Mnemonic::CLC, false, Operand::NoOperand, Operand::NoOperand);
        assert_eq!(i.to_string(), "clc");
    }

    #[test]
    fn test_display_prefixes() {
        let i = instr(Mnemonic::REP, false, Operand::NoOperand, Operand::NoOperand);
        assert_eq!(i.to_string(), "rep ");
        let i = instr(
            Mnemonic::SEGMENT,
            false,
            Operand::Register(Register::ES),
            Operand::NoOperand,
        );
        assert_eq!(i.to_string(), "");
    }

    #[test]
    fn test_display_xchg_swap() {
        let i = instr(
            Mnemonic::XCHG,
            true,
            Operand::Register(Register::CX),
            Operand::Register(Register::AX),
        );
        assert_eq!(i.to_string(), "xchg ax, cx");
    }

    #[test]
    fn test_display_relative() {
        let i = instr(Mnemonic::JNE, false, Operand::RelativeImmediate(-4), Operand::NoOperand);
        assert_eq!(i.to_string(), "jne $-2");
        let i = instr(Mnemonic::JMP, false, Operand::RelativeImmediate(6), Operand::NoOperand);
        assert_eq!(i.to_string(), "jmp $+8");
    }

    #[test]
    fn test_segment_override() {
        let mut i = instr(
            Mnemonic::MOV,
            true,
            Operand::Register(Register::AX),
            Operand::Memory(EffectiveAddress::new(AddressingBase::Bx, 0)),
        );
        i.set_segment_override(Some(Register::ES));
        assert_eq!(i.to_string(), "mov ax, es:[bx]");
    }
}
