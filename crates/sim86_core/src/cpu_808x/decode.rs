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

    cpu_808x::decode.rs

    Table-driven instruction decoder.

    Decoding an instruction is a two step process. First, each definition in
    the table is tested against a fixed window of instruction bytes. Fields
    are read most significant bit first and may straddle byte boundaries.
    Displacement and immediate bytes depend on fields decoded earlier, so
    they are read in a second pass once all fixed fields are known.

    The first matching definition is then converted into an Instruction by
    resolving register codes and mod/rm codes into operands and placing
    them into the destination and source slots.

*/

use crate::{
    cpu_808x::modrm,
    cpu_common::{DecodeError, Instruction, Mnemonic, Operand, Register},
    inst_table::{InstructionDefinition, InstructionDefinitionTable, InstructionPart},
};

/// The longest 8086 instruction is six bytes.
pub const INSTRUCTION_WINDOW: usize = 6;

/// Raw field values captured while testing a definition. Fields that were never decoded are
/// `None`, which is distinct from a decoded zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedFieldSet {
    pub d: Option<bool>,
    pub w: Option<bool>,
    pub s: Option<bool>,
    pub v: Option<bool>,
    pub z: Option<bool>,
    pub mod_code: Option<u8>,
    pub reg: Option<u8>,
    pub rm: Option<u8>,
    pub sr: Option<u8>,
    pub rm_reg_wide: bool,
    /// Memory displacement, or the absolute offset for direct addressing.
    pub displacement: i32,
    /// Branch displacement from a DISP part.
    pub relative: Option<i32>,
    pub data: Option<u32>,
    /// Absolute address from an ADDR part. Retained, but not converted to an operand.
    pub address: Option<u16>,
}

impl DecodedFieldSet {
    #[inline]
    pub fn wide(&self) -> bool {
        self.w.unwrap_or(false)
    }
}

/// MSB-first bit cursor over the instruction window.
struct BitReader<'a> {
    window: &'a [u8; INSTRUCTION_WINDOW],
    bit_offset: usize,
}

impl<'a> BitReader<'a> {
    fn new(window: &'a [u8; INSTRUCTION_WINDOW]) -> Self {
        Self { window, bit_offset: 0 }
    }

    /// Read up to 8 bits. The field may span two bytes.
    fn read_bits(&mut self, count: usize) -> Result<u8, DecodeError> {
        debug_assert!(count > 0 && count <= 8);
        let end = self.bit_offset + count;
        if end > INSTRUCTION_WINDOW * 8 {
            return Err(DecodeError::WindowOverrun {
                bit_offset: self.bit_offset,
            });
        }

        let byte_idx = self.bit_offset / 8;
        let hi = self.window[byte_idx] as u16;
        let lo = self.window.get(byte_idx + 1).copied().unwrap_or(0) as u16;
        let word = (hi << 8) | lo;
        let shift = 16 - (self.bit_offset % 8) - count;
        let value = (word >> shift) & ((1u16 << count) - 1);

        self.bit_offset = end;
        Ok(value as u8)
    }

    fn read_bit(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bits(1)? != 0)
    }

    fn check_aligned(&self, field: &'static str) -> Result<(), DecodeError> {
        if self.bit_offset % 8 != 0 {
            return Err(DecodeError::UnalignedField {
                field,
                bit_offset: self.bit_offset,
            });
        }
        Ok(())
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        self.check_aligned(field)?;
        self.read_bits(8)
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        let lo = self.read_u8(field)?;
        let hi = self.read_u8(field)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn bytes_consumed(&self) -> usize {
        self.bit_offset.div_ceil(8)
    }
}

/// Test a single definition against the instruction window.
///
/// Returns `Ok(None)` if a literal bit pattern did not match, otherwise the decoded fields and
/// the number of bytes consumed. Errors indicate a malformed definition.
pub fn try_definition(
    def: &InstructionDefinition,
    window: &[u8; INSTRUCTION_WINDOW],
) -> Result<Option<(DecodedFieldSet, usize)>, DecodeError> {
    let mut reader = BitReader::new(window);
    let mut fields = DecodedFieldSet::default();
    let mut has_data = false;
    let mut has_wide_data = false;

    for part in &def.parts {
        match *part {
            InstructionPart::Bits { value, size } => {
                if reader.read_bits(size as usize)? != value {
                    return Ok(None);
                }
            }
            InstructionPart::D => fields.d = Some(reader.read_bit()?),
            InstructionPart::W => fields.w = Some(reader.read_bit()?),
            InstructionPart::S => fields.s = Some(reader.read_bit()?),
            InstructionPart::V => fields.v = Some(reader.read_bit()?),
            InstructionPart::Z => fields.z = Some(reader.read_bit()?),
            InstructionPart::Mod => fields.mod_code = Some(reader.read_bits(2)?),
            InstructionPart::Reg => fields.reg = Some(reader.read_bits(3)?),
            InstructionPart::Rm => fields.rm = Some(reader.read_bits(3)?),
            InstructionPart::Sr => fields.sr = Some(reader.read_bits(2)?),
            InstructionPart::Data => {
                reader.check_aligned("DATA")?;
                has_data = true;
            }
            InstructionPart::DataIfW => {
                reader.check_aligned("DATA_IF_W")?;
                has_wide_data = true;
            }
            InstructionPart::Addr => fields.address = Some(reader.read_u16("ADDR")?),
            InstructionPart::Disp => fields.relative = Some(reader.read_u8("DISP")? as i8 as i32),
            InstructionPart::ImplicitD(d) => fields.d = Some(d),
            InstructionPart::ImplicitW(w) => fields.w = Some(w),
            InstructionPart::ImplicitReg(reg) => fields.reg = Some(reg),
            InstructionPart::ImplicitMod(mod_code) => fields.mod_code = Some(mod_code),
            InstructionPart::ImplicitRm(rm) => fields.rm = Some(rm),
            InstructionPart::RmRegWide => fields.rm_reg_wide = true,
        }
    }

    // Dependent fields, in encoding order: displacement or direct address, then immediate data.
    match (fields.mod_code, fields.rm) {
        (Some(0b01), _) => fields.displacement = reader.read_u8("DISP-LO")? as i8 as i32,
        (Some(0b10), _) => fields.displacement = reader.read_u16("DISP-LO")? as i16 as i32,
        (Some(0b00), Some(0b110)) => fields.displacement = reader.read_u16("DIRECT-ADDRESS")? as i32,
        _ => {}
    }

    if has_data {
        let s = fields.s.unwrap_or(false);
        let lo = reader.read_u8("DATA")?;
        let data = if has_wide_data && fields.wide() && !s {
            let hi = reader.read_u8("DATA_IF_W")?;
            u16::from_le_bytes([lo, hi]) as u32
        }
        else if s && fields.wide() {
            lo as i8 as i16 as u16 as u32
        }
        else {
            lo as u32
        };
        fields.data = Some(data);
    }

    match reader.bytes_consumed() {
        0 => Ok(None),
        size => Ok(Some((fields, size))),
    }
}

/// Decode one instruction from the window using the first matching definition in the table.
/// `address` is the offset the window was read from.
pub fn decode(
    table: &InstructionDefinitionTable,
    window: &[u8; INSTRUCTION_WINDOW],
    address: u32,
) -> Result<Instruction, DecodeError> {
    for def in table.iter() {
        if let Some((fields, size)) = try_definition(def, window)? {
            log::trace!("{:06X}: matched {:?}, {} byte(s)", address, def.mnemonic, size);
            return build_instruction(def.mnemonic, &fields, size, address);
        }
    }

    Err(DecodeError::NoDefinitionFound {
        offset: address,
        bytes: *window,
    })
}

/// Convert decoded fields into typed operands and fill the destination and source slots.
pub fn build_instruction(
    mnemonic: Mnemonic,
    fields: &DecodedFieldSet,
    size: usize,
    address: u32,
) -> Result<Instruction, DecodeError> {
    let wide = fields.wide();
    let mut instruction = Instruction {
        address,
        size: size as u32,
        mnemonic,
        wide,
        ..Default::default()
    };

    let register = match (fields.sr, fields.reg) {
        (Some(sr), _) => Some(modrm::decode_segment_register(sr)?),
        (None, Some(reg)) => Some(modrm::decode_register(reg, wide)?),
        (None, None) => None,
    };
    if let Some(register) = register {
        if fields.d.unwrap_or(false) {
            instruction.dst = Operand::Register(register);
        }
        else {
            instruction.src = Operand::Register(register);
        }
    }

    if let Some(data) = fields.data {
        instruction.place_operand(Operand::Immediate(data));
    }

    if let Some(relative) = fields.relative {
        instruction.place_operand(Operand::RelativeImmediate(relative));
    }

    // Shift and rotate count: CL or an implicit 1
    if let Some(v) = fields.v {
        instruction.src = if v {
            Operand::Register(Register::CL)
        }
        else {
            Operand::Immediate(1)
        };
    }

    if let Some(mod_code) = fields.mod_code {
        let operand = modrm::decode_rm_operand(
            mod_code,
            fields.rm.unwrap_or(0),
            fields.displacement,
            wide || fields.rm_reg_wide,
        )?;
        instruction.place_operand(operand);
    }

    instruction.normalize_operands();
    Ok(instruction)
}
