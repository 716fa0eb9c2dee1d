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


    sim86_headless::lib.rs

    Command line frontend. Resolves configuration, loads the program and
    runs it in disassembly or execution mode.

*/

//! sim86 headless front-end main library component.

#![forbid(unsafe_code)]

use std::path::Path;

use anyhow::{anyhow, Context};
use colored::Colorize;

use sim86_config::{ConfigFileParams, DEFAULT_CONFIG_FILE};
use sim86_core::{
    machine::{Machine, MachineConfig, RunMode},
    InstructionDefinitionTable,
    TraceLogger,
};

pub fn run() {
    env_logger::init();

    // Resolve the configuration by parsing the configuration toml and merging it with command line arguments.
    let config = match sim86_config::read_config_file(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };

    let mut trace_logger = match make_trace_logger(&config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{}", format!("{:#}", e).red());
            std::process::exit(1);
        }
    };

    let result = run_program(&config, &mut trace_logger);
    trace_logger.flush();

    if let Err(e) = result {
        eprintln!("{}", format!("{:#}", e).red());
        std::process::exit(1);
    }
}

fn make_trace_logger(config: &ConfigFileParams) -> Result<TraceLogger, anyhow::Error> {
    match &config.emulator.trace_file {
        Some(path) => TraceLogger::from_filename(path)
            .with_context(|| format!("Couldn't create trace file {}", path.display())),
        None => Ok(TraceLogger::Console),
    }
}

fn load_table(path: Option<&Path>) -> Result<InstructionDefinitionTable, anyhow::Error> {
    match path {
        Some(path) => InstructionDefinitionTable::from_file(path)
            .with_context(|| format!("Couldn't load instruction table {}", path.display())),
        None => InstructionDefinitionTable::bundled().context("Couldn't parse bundled instruction table"),
    }
}

/// Load and run the configured program, writing the listing or execution trace to `trace_logger`.
pub fn run_program(config: &ConfigFileParams, trace_logger: &mut TraceLogger) -> Result<(), anyhow::Error> {
    let emu = &config.emulator;

    let program_path = emu.program.as_ref().ok_or_else(|| anyhow!("No program specified"))?;
    let program =
        std::fs::read(program_path).with_context(|| format!("Couldn't read program {}", program_path.display()))?;

    let table = load_table(emu.instruction_table.as_deref())?;
    log::debug!("Using instruction table with {} definitions", table.len());

    let mut machine = Machine::new(
        MachineConfig {
            memory_size: emu.memory_size,
            terminator: emu.terminator,
        },
        table,
    );
    machine.load_program(&program);

    let mode = if emu.exec { RunMode::Execute } else { RunMode::Disassemble };

    match mode {
        RunMode::Disassemble => {
            trace_logger.println(format!("; {} disassembly:", program_path.display()));
            trace_logger.println("bits 16");
        }
        RunMode::Execute => {
            trace_logger.println(format!("--- {} execution ---", program_path.display()));
        }
    }

    let count = machine
        .run(mode, trace_logger)
        .with_context(|| format!("Fatal error at offset {:06X}", machine.ip()))?;
    log::debug!("Processed {} instructions", count);

    if mode == RunMode::Execute && emu.dump_registers {
        trace_logger.println("");
        trace_logger.println("Final registers:");
        trace_logger.println(machine.cpu().registers().to_string());
        trace_logger.println(format!("      ip: 0x{:04X} ({})", machine.ip(), machine.ip()));
    }

    Ok(())
}
