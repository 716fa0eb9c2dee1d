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

    cpu_common::mnemonic.rs

    The closed set of operations an instruction definition may name.

*/

use strum_macros::{Display, EnumString, IntoStaticStr};

/// Parsed from the upper case names used in definition tables, displayed in lower case
/// for disassembly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mnemonic {
    MOV,
    PUSH,
    POP,
    XCHG,
    IN,
    OUT,
    XLAT,
    LEA,
    LDS,
    LES,
    LAHF,
    SAHF,
    PUSHF,
    POPF,
    ADD,
    ADC,
    INC,
    AAA,
    DAA,
    SUB,
    SBB,
    DEC,
    NEG,
    CMP,
    AAS,
    DAS,
    MUL,
    IMUL,
    AAM,
    DIV,
    IDIV,
    AAD,
    CBW,
    CWD,
    NOT,
    SHL,
    SHR,
    SAR,
    ROL,
    ROR,
    RCL,
    RCR,
    AND,
    TEST,
    OR,
    XOR,
    REP,
    MOVS,
    CMPS,
    SCAS,
    LODS,
    STOS,
    CALL,
    JMP,
    RET,
    JE,
    JL,
    JLE,
    JB,
    JBE,
    JP,
    JO,
    JS,
    JNE,
    JNL,
    JG,
    JNB,
    JA,
    JNP,
    JNO,
    JNS,
    LOOP,
    LOOPZ,
    LOOPNZ,
    JCXZ,
    INT,
    INT3,
    INTO,
    IRET,
    CLC,
    CMC,
    STC,
    CLD,
    STD,
    CLI,
    STI,
    HLT,
    WAIT,
    ESC,
    LOCK,
    SEGMENT,
}

impl Mnemonic {
    /// Prefixes modify the following instruction and are never executed themselves.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Mnemonic::REP | Mnemonic::LOCK | Mnemonic::SEGMENT)
    }

    /// String operations whose disassembly carries a width suffix.
    pub fn is_string_op(&self) -> bool {
        matches!(
            self,
            Mnemonic::MOVS | Mnemonic::CMPS | Mnemonic::SCAS | Mnemonic::LODS | Mnemonic::STOS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mnemonic_parse() {
        assert_eq!(Mnemonic::from_str("MOV"), Ok(Mnemonic::MOV));
        assert_eq!(Mnemonic::from_str("LOOPNZ"), Ok(Mnemonic::LOOPNZ));
        assert_eq!(Mnemonic::from_str("INT3"), Ok(Mnemonic::INT3));
        assert!(Mnemonic::from_str("FOO").is_err());
    }

    #[test]
    fn test_mnemonic_display() {
        assert_eq!(Mnemonic::MOV.to_string(), "mov");
        assert_eq!(Mnemonic::SEGMENT.to_string(), "segment");
        assert!(Mnemonic::LOCK.is_prefix());
        assert!(!Mnemonic::MOVS.is_prefix());
        assert!(Mnemonic::STOS.is_string_op());
    }
}
