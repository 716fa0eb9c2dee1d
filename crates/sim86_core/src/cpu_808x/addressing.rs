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

    cpu_808x::addressing.rs

    Effective address calculation.

*/

use crate::{cpu_808x::Cpu, cpu_common::EffectiveAddress};

impl Cpu {
    /// Sum the base and index registers with the displacement, truncated to 16 bits.
    /// Segment overrides do not relocate the result; memory is flat.
    pub fn calc_effective_address(&self, ea: &EffectiveAddress) -> u16 {
        let (base, index) = ea.base.registers();
        let base = base.map_or(0, |reg| self.get_register(reg));
        let index = index.map_or(0, |reg| self.get_register(reg));

        base.wrapping_add(index).wrapping_add(ea.displacement as u16)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        cpu_808x::Cpu,
        cpu_common::{AddressingBase, EffectiveAddress, Register},
    };

    #[test]
    fn test_calc_effective_address() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::BX, 0x1000);
        cpu.set_register(Register::SI, 0x0020);
        cpu.set_register(Register::BP, 0xFFFF);

        let ea = EffectiveAddress::new(AddressingBase::BxSi, 4);
        assert_eq!(cpu.calc_effective_address(&ea), 0x1024);

        let ea = EffectiveAddress::new(AddressingBase::Bx, -2);
        assert_eq!(cpu.calc_effective_address(&ea), 0x0FFE);

        let ea = EffectiveAddress::new(AddressingBase::Bp, 2);
        assert_eq!(cpu.calc_effective_address(&ea), 0x0001);

        let ea = EffectiveAddress::direct(0x1234);
        assert_eq!(cpu.calc_effective_address(&ea), 0x1234);
    }
}
