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


    sim86_config::lib.rs

    Reads sim86's configuration file and overlays command line arguments.

*/

//! The `sim86_config` crate parses sim86's TOML configuration file and overlays command line
//! arguments on top of it. Command line arguments always take priority over the file.
//! A missing default configuration file is not an error; every setting has a default.

mod bpaf_config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_derive::Deserialize;

pub use bpaf_config::{cli_args, CmdLineArgs};
pub use sim86_core::{bus::DEFAULT_MEMORY_SIZE, machine::DEFAULT_TERMINATOR};

pub const DEFAULT_CONFIG_FILE: &str = "sim86.toml";

const fn _default_true() -> bool {
    true
}
const fn _default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}
const fn _default_terminator() -> u8 {
    DEFAULT_TERMINATOR
}

#[derive(Debug, Deserialize)]
pub struct Emulator {
    #[serde(default = "_default_memory_size")]
    pub memory_size: usize,
    #[serde(default = "_default_terminator")]
    pub terminator: u8,
    pub instruction_table: Option<PathBuf>,
    pub trace_file: Option<PathBuf>,
    #[serde(default = "_default_true")]
    pub dump_registers: bool,

    // Only set from the command line
    #[serde(skip)]
    pub exec: bool,
    #[serde(skip)]
    pub program: Option<PathBuf>,
}

impl Default for Emulator {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            terminator: DEFAULT_TERMINATOR,
            instruction_table: None,
            trace_file: None,
            dump_registers: true,
            exec: false,
            program: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFileParams {
    #[serde(default)]
    pub emulator: Emulator,
}

impl ConfigFileParams {
    pub fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(table) = shell_args.table {
            self.emulator.instruction_table = Some(table);
        }
        if let Some(trace_file) = shell_args.trace_file {
            self.emulator.trace_file = Some(trace_file);
        }
        if let Some(terminator) = shell_args.terminator {
            self.emulator.terminator = terminator;
        }

        self.emulator.exec |= shell_args.exec;
        self.emulator.dump_registers &= !shell_args.no_dump;

        if !shell_args.program.as_os_str().is_empty() {
            self.emulator.program = Some(shell_args.program);
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.emulator.memory_size == 0 {
            bail!("emulator.memory_size must be greater than 0");
        }
        Ok(())
    }
}

/// Parse a TOML configuration string and overlay command line arguments.
pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;

    // Command line arguments override config file arguments
    toml_args.overlay(shell_args);
    toml_args.validate()?;

    log::debug!("Resolved configuration: {:?}", toml_args);
    Ok(toml_args)
}

/// Read the command line, then the TOML configuration file it names (or `default_path`), and
/// overlay the arguments on the file. Only an explicitly named config file is required to exist.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    log::debug!("Reading command line arguments...");
    let shell_args = cli_args().run();
    resolve_config(default_path, shell_args)
}

/// Resolve configuration for already-parsed command line arguments.
pub fn resolve_config<P>(default_path: P, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    // Allow configuration file path to be overridden by command line argument 'config_file'
    let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
        std::fs::read_to_string(configfile_path)
            .with_context(|| format!("Couldn't read config file {}", configfile_path.display()))?
    }
    else if default_path.as_ref().exists() {
        std::fs::read_to_string(default_path.as_ref())
            .with_context(|| format!("Couldn't read config file {}", default_path.as_ref().display()))?
    }
    else {
        log::debug!(
            "No config file at {}, using defaults",
            default_path.as_ref().display()
        );
        String::new()
    };

    read_config(toml_string, shell_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(program: &str) -> CmdLineArgs {
        CmdLineArgs {
            program: PathBuf::from(program),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_match_machine_config() {
        let config = read_config("", args("listing.bin")).unwrap();
        let machine = sim86_core::MachineConfig::default();
        assert_eq!(config.emulator.memory_size, machine.memory_size);
        assert_eq!(config.emulator.terminator, machine.terminator);
    }

    #[test]
    fn test_defaults_from_empty_config() {
        let config = read_config("", args("listing.bin")).unwrap();
        assert_eq!(config.emulator.memory_size, DEFAULT_MEMORY_SIZE);
        assert_eq!(config.emulator.terminator, 0x0F);
        assert!(config.emulator.dump_registers);
        assert!(!config.emulator.exec);
        assert_eq!(config.emulator.instruction_table, None);
        assert_eq!(config.emulator.program, Some(PathBuf::from("listing.bin")));
    }

    #[test]
    fn test_config_file_values() {
        let toml = r#"
            [emulator]
            memory_size = 65536
            terminator = 0xF4
            instruction_table = "tables/8086.txt"
            trace_file = "trace.log"
            dump_registers = false
        "#;
        let config = read_config(toml, args("a.bin")).unwrap();
        assert_eq!(config.emulator.memory_size, 65536);
        assert_eq!(config.emulator.terminator, 0xF4);
        assert_eq!(config.emulator.instruction_table, Some(PathBuf::from("tables/8086.txt")));
        assert_eq!(config.emulator.trace_file, Some(PathBuf::from("trace.log")));
        assert!(!config.emulator.dump_registers);
    }

    #[test]
    fn test_command_line_overrides_file() {
        let toml = r#"
            [emulator]
            terminator = 0xF4
            trace_file = "trace.log"
        "#;
        let shell_args = CmdLineArgs {
            exec: true,
            terminator: Some(0xCC),
            trace_file: Some(PathBuf::from("other.log")),
            table: Some(PathBuf::from("custom.txt")),
            no_dump: true,
            ..args("b.bin")
        };
        let config = read_config(toml, shell_args).unwrap();
        assert!(config.emulator.exec);
        assert_eq!(config.emulator.terminator, 0xCC);
        assert_eq!(config.emulator.trace_file, Some(PathBuf::from("other.log")));
        assert_eq!(config.emulator.instruction_table, Some(PathBuf::from("custom.txt")));
        assert!(!config.emulator.dump_registers);
        assert_eq!(config.emulator.program, Some(PathBuf::from("b.bin")));
    }

    #[test]
    fn test_zero_memory_rejected() {
        let toml = "[emulator]\nmemory_size = 0\n";
        assert!(read_config(toml, args("a.bin")).is_err());
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(read_config("[emulator\n", args("a.bin")).is_err());
        assert!(read_config("[emulator]\nterminator = 300\n", args("a.bin")).is_err());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let config = resolve_config("/nonexistent/sim86.toml", args("a.bin")).unwrap();
        assert_eq!(config.emulator.memory_size, DEFAULT_MEMORY_SIZE);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let shell_args = CmdLineArgs {
            config_file: Some(PathBuf::from("/nonexistent/custom.toml")),
            ..args("a.bin")
        };
        assert!(resolve_config(DEFAULT_CONFIG_FILE, shell_args).is_err());
    }
}
