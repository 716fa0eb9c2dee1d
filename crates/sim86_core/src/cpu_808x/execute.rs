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

    cpu_808x::execute.rs

    Instruction execution. MOV, ADD, SUB and CMP are supported. Each
    executed instruction produces a report of the operand it wrote and the
    flags before and after.

*/

use std::fmt;

use crate::{
    bus::BusInterface,
    cpu_808x::Cpu,
    cpu_common::{alu::Xi, flags_to_string, CpuError, Instruction, Mnemonic, Operand, Register},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteBack {
    Register { register: Register, old: u16, new: u16 },
    Memory { address: u16, wide: bool, old: u16, new: u16 },
}

impl fmt::Display for WriteBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteBack::Register { register, old, new } => {
                write!(f, "{}:0x{:04X}->0x{:04X}", register, old, new)
            }
            WriteBack::Memory {
                address,
                wide: true,
                old,
                new,
            } => write!(f, "[{}]:0x{:04X}->0x{:04X}", address, old, new),
            WriteBack::Memory {
                address,
                wide: false,
                old,
                new,
            } => write!(f, "[{}]:0x{:02X}->0x{:02X}", address, old, new),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub write_back: Option<WriteBack>,
    pub flags_before: u16,
    pub flags_after: u16,
}

impl ExecutionReport {
    pub fn flags_changed(&self) -> bool {
        self.flags_before != self.flags_after
    }
}

/// Formats as `ax:0x0000->0x0001 flags:->PZ`. Either part is omitted if nothing changed.
impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(write_back) = &self.write_back {
            write!(f, "{}", write_back)?;
            if self.flags_changed() {
                write!(f, " ")?;
            }
        }
        if self.flags_changed() {
            write!(
                f,
                "flags:{}->{}",
                flags_to_string(self.flags_before),
                flags_to_string(self.flags_after)
            )?;
        }
        Ok(())
    }
}

impl Cpu {
    fn read_operand(&self, operand: &Operand, wide: bool, bus: &BusInterface) -> Result<u16, CpuError> {
        match operand {
            Operand::Register(reg) => Ok(self.get_register(*reg)),
            Operand::Immediate(imm) => Ok(*imm as u16),
            Operand::Memory(ea) => {
                let address = self.calc_effective_address(ea) as u32;
                if wide {
                    Ok(bus.read_u16(address))
                }
                else {
                    Ok(bus.read_u8(address) as u16)
                }
            }
            Operand::RelativeImmediate(_) | Operand::NoOperand => {
                Err(CpuError::InvalidReadSource(format!("{:?}", operand)))
            }
        }
    }

    fn write_operand(
        &mut self,
        operand: &Operand,
        value: u16,
        wide: bool,
        bus: &mut BusInterface,
    ) -> Result<WriteBack, CpuError> {
        match operand {
            Operand::Register(reg) => {
                let old = self.get_register(*reg);
                self.set_register(*reg, value);
                Ok(WriteBack::Register {
                    register: *reg,
                    old,
                    new: self.get_register(*reg),
                })
            }
            Operand::Memory(ea) => {
                let address = self.calc_effective_address(ea);
                let old = self.read_operand(operand, wide, bus)?;
                let new = if wide {
                    bus.write_u16(address as u32, value);
                    value
                }
                else {
                    bus.write_u8(address as u32, value as u8);
                    value & 0xFF
                };
                Ok(WriteBack::Memory {
                    address,
                    wide,
                    old,
                    new,
                })
            }
            _ => Err(CpuError::InvalidWriteTarget(format!("{:?}", operand))),
        }
    }

    /// Execute a decoded instruction. Prefix instructions must be handled by the caller.
    pub fn execute(&mut self, instruction: &Instruction, bus: &mut BusInterface) -> Result<ExecutionReport, CpuError> {
        let flags_before = self.flags();
        let wide = instruction.wide;

        let write_back = match instruction.mnemonic {
            Mnemonic::MOV => {
                let value = self.read_operand(&instruction.src, wide, bus)?;
                Some(self.write_operand(&instruction.dst, value, wide, bus)?)
            }
            Mnemonic::ADD | Mnemonic::SUB | Mnemonic::CMP => {
                let xi = match instruction.mnemonic {
                    Mnemonic::ADD => Xi::ADD,
                    Mnemonic::SUB => Xi::SUB,
                    _ => Xi::CMP,
                };
                let operand1 = self.read_operand(&instruction.dst, wide, bus)?;
                let operand2 = self.read_operand(&instruction.src, wide, bus)?;
                let result = self.alu_op(xi, operand1, operand2, wide);
                match xi {
                    Xi::CMP => None,
                    _ => Some(self.write_operand(&instruction.dst, result, wide, bus)?),
                }
            }
            mnemonic => return Err(CpuError::UnsupportedOperation(mnemonic)),
        };

        self.instruction_count += 1;
        Ok(ExecutionReport {
            write_back,
            flags_before,
            flags_after: self.flags(),
        })
    }
}
