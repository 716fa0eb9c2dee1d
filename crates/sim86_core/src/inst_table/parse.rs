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

    inst_table::parse.rs

    Parser for the text form of the definition table. One definition per
    line: an upper case mnemonic followed by whitespace separated parts.
    Blank lines and lines starting with '#' are skipped.

*/

use std::str::FromStr;

use thiserror::Error;

use super::{InstructionDefinition, InstructionPart};
use crate::cpu_common::Mnemonic;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },
    #[error("Line {line}: unknown instruction part '{token}'")]
    UnknownPart { line: usize, token: String },
    #[error("Line {line}: '{mnemonic}' declared without any parts")]
    MissingParts { line: usize, mnemonic: String },
    #[error("Line {line}: bad binary literal '{token}'")]
    BadLiteral { line: usize, token: String },
    #[error("Failed to read instruction table: {0}")]
    Io(#[from] std::io::Error),
}

pub fn parse_table(text: &str) -> Result<Vec<InstructionDefinition>, TableError> {
    let mut definitions = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(mnemonic_token) = tokens.next()
        else {
            continue;
        };
        let mnemonic = Mnemonic::from_str(mnemonic_token).map_err(|_| TableError::UnknownMnemonic {
            line,
            token: mnemonic_token.to_string(),
        })?;

        let parts = tokens
            .map(|token| parse_part(line, token))
            .collect::<Result<Vec<_>, _>>()?;

        if parts.is_empty() {
            return Err(TableError::MissingParts {
                line,
                mnemonic: mnemonic_token.to_string(),
            });
        }

        definitions.push(InstructionDefinition { mnemonic, parts });
    }

    Ok(definitions)
}

/// Parse a binary literal of at most `max_bits` digits.
fn parse_binary(line: usize, token: &str, digits: &str, max_bits: usize) -> Result<u8, TableError> {
    let bad = || TableError::BadLiteral {
        line,
        token: token.to_string(),
    };
    if digits.is_empty() || digits.len() > max_bits || !digits.chars().all(|c| c == '0' || c == '1') {
        return Err(bad());
    }
    u8::from_str_radix(digits, 2).map_err(|_| bad())
}

/// Extract the argument of an implicit part such as `IMP_REG(011)`.
fn implicit_arg<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    token.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')
}

fn parse_part(line: usize, token: &str) -> Result<InstructionPart, TableError> {
    if token.starts_with('0') || token.starts_with('1') {
        let value = parse_binary(line, token, token, 8)?;
        return Ok(InstructionPart::Bits {
            value,
            size: token.len() as u8,
        });
    }

    let part = match token {
        "D" => InstructionPart::D,
        "W" => InstructionPart::W,
        "S" => InstructionPart::S,
        "V" => InstructionPart::V,
        "Z" => InstructionPart::Z,
        "MOD" => InstructionPart::Mod,
        "REG" => InstructionPart::Reg,
        "RM" => InstructionPart::Rm,
        "SR" => InstructionPart::Sr,
        "DATA" => InstructionPart::Data,
        "DATA_IF_W" => InstructionPart::DataIfW,
        "ADDR" => InstructionPart::Addr,
        "DISP" => InstructionPart::Disp,
        "F_RM_REG_WIDE" => InstructionPart::RmRegWide,
        _ => {
            if let Some(arg) = implicit_arg(token, "IMP_D") {
                InstructionPart::ImplicitD(parse_binary(line, token, arg, 1)? == 1)
            }
            else if let Some(arg) = implicit_arg(token, "IMP_W") {
                InstructionPart::ImplicitW(parse_binary(line, token, arg, 1)? == 1)
            }
            else if let Some(arg) = implicit_arg(token, "IMP_REG") {
                InstructionPart::ImplicitReg(parse_binary(line, token, arg, 3)?)
            }
            else if let Some(arg) = implicit_arg(token, "IMP_MOD") {
                InstructionPart::ImplicitMod(parse_binary(line, token, arg, 2)?)
            }
            else if let Some(arg) = implicit_arg(token, "IMP_RM") {
                InstructionPart::ImplicitRm(parse_binary(line, token, arg, 3)?)
            }
            else {
                return Err(TableError::UnknownPart {
                    line,
                    token: token.to_string(),
                });
            }
        }
    };

    Ok(part)
}
