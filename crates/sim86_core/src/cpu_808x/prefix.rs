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

    cpu_808x::prefix.rs

    Prefix accumulation. Prefixes decode as standalone instructions; their
    state is held until the next non-prefix instruction consumes it.

*/

use crate::cpu_common::{Instruction, Mnemonic, Operand, Register};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixState {
    pub rep: bool,
    pub lock: bool,
    pub segment_override: Option<Register>,
}

impl PrefixState {
    /// Fold an instruction into the prefix state. Prefix instructions update the state and
    /// return true. Any other instruction receives the pending segment override on its memory
    /// operands, after which the state is cleared.
    pub fn apply(&mut self, instruction: &mut Instruction) -> bool {
        match instruction.mnemonic {
            Mnemonic::REP => self.rep = true,
            Mnemonic::LOCK => self.lock = true,
            Mnemonic::SEGMENT => {
                if let Operand::Register(segment) = instruction.dst {
                    self.segment_override = Some(segment);
                }
            }
            _ => {
                instruction.set_segment_override(self.segment_override);
                *self = PrefixState::default();
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == PrefixState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_common::{AddressingBase, EffectiveAddress};

    fn mov_from_memory() -> Instruction {
        Instruction {
            mnemonic: Mnemonic::MOV,
            wide: true,
            dst: Operand::Register(Register::AX),
            src: Operand::Memory(EffectiveAddress::new(AddressingBase::Bx, 0)),
            ..Default::default()
        }
    }

    fn segment(reg: Register) -> Instruction {
        Instruction {
            mnemonic: Mnemonic::SEGMENT,
            dst: Operand::Register(reg),
            ..Default::default()
        }
    }

    #[test]
    fn test_segment_override_applies_once() {
        let mut state = PrefixState::default();
        let mut prefix = segment(Register::ES);
        assert!(state.apply(&mut prefix));
        assert_eq!(state.segment_override, Some(Register::ES));

        let mut i = mov_from_memory();
        assert!(!state.apply(&mut i));
        assert_eq!(i.to_string(), "mov ax, es:[bx]");
        assert!(state.is_empty());

        let mut i = mov_from_memory();
        state.apply(&mut i);
        assert_eq!(i.to_string(), "mov ax, [bx]");
    }

    #[test]
    fn test_last_segment_override_wins() {
        let mut state = PrefixState::default();
        state.apply(&mut segment(Register::ES));
        state.apply(&mut segment(Register::SS));
        let mut i = mov_from_memory();
        state.apply(&mut i);
        assert_eq!(i.to_string(), "mov ax, ss:[bx]");
    }

    #[test]
    fn test_rep_and_lock_accumulate() {
        let mut state = PrefixState::default();
        let mut rep = Instruction {
            mnemonic: Mnemonic::REP,
            ..Default::default()
        };
        let mut lock = Instruction {
            mnemonic: Mnemonic::LOCK,
            ..Default::default()
        };
        assert!(state.apply(&mut lock));
        assert!(state.apply(&mut rep));
        assert!(state.rep && state.lock);
        assert_eq!(state.segment_override, None);

        let mut movs = Instruction {
            mnemonic: Mnemonic::MOVS,
            wide: true,
            ..Default::default()
        };
        assert!(!state.apply(&mut movs));
        assert!(state.is_empty());
    }
}
