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

    cpu_808x::register_file.rs

    Register storage. The four general purpose registers are addressable
    as a 16-bit word or as independent high and low bytes.

*/

use std::fmt;

use crate::cpu_common::{flags_to_string, Flag, Register};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneralRegister {
    l: u8,
    h: u8,
}

impl GeneralRegister {
    #[inline(always)]
    pub fn x(&self) -> u16 {
        u16::from_le_bytes([self.l, self.h])
    }
    #[inline(always)]
    pub fn set_x(&mut self, value: u16) {
        [self.l, self.h] = value.to_le_bytes();
    }
    #[inline(always)]
    pub fn h(&self) -> u8 {
        self.h
    }
    #[inline(always)]
    pub fn set_h(&mut self, value: u8) {
        self.h = value;
    }
    #[inline(always)]
    pub fn l(&self) -> u8 {
        self.l
    }
    #[inline(always)]
    pub fn set_l(&mut self, value: u8) {
        self.l = value;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    a: GeneralRegister,
    b: GeneralRegister,
    c: GeneralRegister,
    d: GeneralRegister,
    sp: u16,
    bp: u16,
    si: u16,
    di: u16,
    es: u16,
    cs: u16,
    ss: u16,
    ds: u16,
    flags: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        Default::default()
    }

    /// Read a register. Eight-bit registers are returned zero extended.
    pub fn get(&self, reg: Register) -> u16 {
        match reg {
            Register::AL => self.a.l() as u16,
            Register::AH => self.a.h() as u16,
            Register::BL => self.b.l() as u16,
            Register::BH => self.b.h() as u16,
            Register::CL => self.c.l() as u16,
            Register::CH => self.c.h() as u16,
            Register::DL => self.d.l() as u16,
            Register::DH => self.d.h() as u16,
            Register::AX => self.a.x(),
            Register::BX => self.b.x(),
            Register::CX => self.c.x(),
            Register::DX => self.d.x(),
            Register::SP => self.sp,
            Register::BP => self.bp,
            Register::SI => self.si,
            Register::DI => self.di,
            Register::ES => self.es,
            Register::CS => self.cs,
            Register::SS => self.ss,
            Register::DS => self.ds,
        }
    }

    /// Write a register. Writes to eight-bit registers keep only the low byte of `value`
    /// and leave the other half of the register untouched.
    pub fn set(&mut self, reg: Register, value: u16) {
        let byte = value as u8;
        match reg {
            Register::AL => self.a.set_l(byte),
            Register::AH => self.a.set_h(byte),
            Register::BL => self.b.set_l(byte),
            Register::BH => self.b.set_h(byte),
            Register::CL => self.c.set_l(byte),
            Register::CH => self.c.set_h(byte),
            Register::DL => self.d.set_l(byte),
            Register::DH => self.d.set_h(byte),
            Register::AX => self.a.set_x(value),
            Register::BX => self.b.set_x(value),
            Register::CX => self.c.set_x(value),
            Register::DX => self.d.set_x(value),
            Register::SP => self.sp = value,
            Register::BP => self.bp = value,
            Register::SI => self.si = value,
            Register::DI => self.di = value,
            Register::ES => self.es = value,
            Register::CS => self.cs = value,
            Register::SS => self.ss = value,
            Register::DS => self.ds = value,
        }
    }

    #[inline(always)]
    pub fn flags(&self) -> u16 {
        self.flags
    }

    #[inline(always)]
    pub fn set_flag(&mut self, flag: Flag) {
        self.flags |= flag.mask();
    }

    #[inline(always)]
    pub fn clear_flag(&mut self, flag: Flag) {
        self.flags &= !flag.mask();
    }

    #[inline(always)]
    pub fn set_flag_state(&mut self, flag: Flag, state: bool) {
        if state {
            self.set_flag(flag)
        }
        else {
            self.clear_flag(flag)
        }
    }

    #[inline(always)]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags & flag.mask() != 0
    }
}

/// Register dump in the `0xXXXX (decimal)` form used after execution.
impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DUMP_ORDER: [Register; 12] = [
            Register::AX,
            Register::BX,
            Register::CX,
            Register::DX,
            Register::SP,
            Register::BP,
            Register::SI,
            Register::DI,
            Register::ES,
            Register::CS,
            Register::SS,
            Register::DS,
        ];
        for reg in DUMP_ORDER {
            let value = self.get(reg);
            writeln!(f, "      {}: 0x{:04X} ({})", reg, value, value)?;
        }
        write!(f, "   flags: {}", flags_to_string(self.flags))
    }
}
