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

    --------------------------------------------------------------------------

    sim86_config::bpaf_config::mod.rs

    Command line argument definitions.

*/

use std::path::PathBuf;

use bpaf::{Bpaf, Parser};

/// Parse a byte given either as decimal or as hex with a `0x` prefix.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte value '{}': {}", s, e))
}

fn terminator_arg() -> impl Parser<Option<u8>> {
    bpaf::long("terminator")
        .help("Byte value that marks the end of the program, decimal or 0x-prefixed hex")
        .argument::<String>("BYTE")
        .parse(|s| parse_byte(&s))
        .optional()
}

#[derive(Debug, Clone, Default, Bpaf)]
#[bpaf(options, version, generate(cli_args))]
pub struct CmdLineArgs {
    /// Path to a configuration file to use instead of sim86.toml
    #[bpaf(long("config_file"), long("configfile"))]
    pub config_file: Option<PathBuf>,

    /// Execute the program instead of disassembling it
    #[bpaf(long, switch)]
    pub exec: bool,

    /// Load the instruction definition table from a file
    #[bpaf(long)]
    pub table: Option<PathBuf>,

    /// Write the listing or trace to a file instead of the console
    #[bpaf(long("trace_file"), long("tracefile"))]
    pub trace_file: Option<PathBuf>,

    #[bpaf(external(terminator_arg))]
    pub terminator: Option<u8>,

    /// Don't print the final register state after execution
    #[bpaf(long("no_dump"), long("nodump"), switch)]
    pub no_dump: bool,

    /// Program image to load at offset 0
    #[bpaf(positional("PROGRAM"))]
    pub program: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("0x0F"), Ok(0x0F));
        assert_eq!(parse_byte("0Xf4"), Ok(0xF4));
        assert_eq!(parse_byte("15"), Ok(15));
        assert_eq!(parse_byte("255"), Ok(255));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0x100").is_err());
        assert!(parse_byte("0x").is_err());
        assert!(parse_byte("0F").is_err());
    }

    fn parse_args(args: &[&str]) -> Result<CmdLineArgs, bpaf::ParseFailure> {
        cli_args().run_inner(bpaf::Args::from(args))
    }

    #[test]
    fn test_terminator_from_command_line() {
        let args = parse_args(&["--terminator", "0xF4", "prog.bin"]).unwrap();
        assert_eq!(args.terminator, Some(0xF4));

        let args = parse_args(&["--terminator", "12", "prog.bin"]).unwrap();
        assert_eq!(args.terminator, Some(12));

        let args = parse_args(&["prog.bin"]).unwrap();
        assert_eq!(args.terminator, None);

        assert!(parse_args(&["--terminator", "0x1FF", "prog.bin"]).is_err());
    }
}
