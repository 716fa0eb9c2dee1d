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


    tests/machine_tests.rs

    Runs hand-assembled programs through the Machine using the bundled
    instruction table.

*/

use sim86_core::{
    cpu_common::{CpuError, DecodeError, Flag, Register},
    machine::{Machine, MachineConfig, RunMode},
    InstructionDefinitionTable,
    TraceLogger,
};

fn new_machine(program: &[u8]) -> Machine {
    let mut machine = Machine::new(
        MachineConfig {
            memory_size: 0x10000,
            ..Default::default()
        },
        InstructionDefinitionTable::bundled().unwrap(),
    );
    machine.load_program(program);
    machine
}

fn run(program: &[u8], mode: RunMode) -> (Machine, String) {
    let mut machine = new_machine(program);
    let mut logger = TraceLogger::Buffer(String::new());
    machine.run(mode, &mut logger).unwrap();
    let listing = logger.buffer().unwrap().to_string();
    (machine, listing)
}

#[test]
fn test_disassemble_mov_forms() {
    #[rustfmt::skip]
    let program = [
        0x89, 0xDE,                 // mov si, bx
        0x88, 0xC6,                 // mov dh, al
        0xB1, 0x0C,                 // mov cl, 12
        0x8A, 0x00,                 // mov al, [bx + si]
        0x8B, 0x56, 0x00,           // mov dx, [bp]
        0x8A, 0x60, 0x04,           // mov ah, [bx + si + 4]
        0x8A, 0x80, 0x87, 0x13,     // mov al, [bx + si + 4999]
        0x89, 0x0B,                 // mov word [bp + di], cx
        0x8B, 0x41, 0xDB,           // mov ax, [bx + di - 37]
        0xC6, 0x03, 0x07,           // mov byte [bp + di], 7
        0xA1, 0xFB, 0x09,           // mov ax, [2555]
        0x8E, 0xD8,                 // mov ds, ax
    ];
    let (machine, listing) = run(&program, RunMode::Disassemble);

    let expected = [
        "mov si, bx",
        "mov dh, al",
        "mov cl, 12",
        "mov al, [bx + si]",
        "mov dx, [bp]",
        "mov ah, [bx + si + 4]",
        "mov al, [bx + si + 4999]",
        "mov word [bp + di], cx",
        "mov ax, [bx + di - 37]",
        "mov byte [bp + di], 7",
        "mov ax, [2555]",
        "mov ds, ax",
    ];
    assert_eq!(listing.lines().collect::<Vec<_>>(), expected);
    assert_eq!(machine.ip() as usize, program.len());
    // Nothing executes when disassembling.
    assert_eq!(machine.cpu().get_register(Register::CL), 0);
}

#[test]
fn test_disassemble_mixed_forms() {
    #[rustfmt::skip]
    let program = [
        0x03, 0x18,                     // add bx, [bx + si]
        0x83, 0x82, 0xE8, 0x03, 0x1D,   // add word [bp + si + 1000], 29
        0x83, 0xFE, 0x02,               // cmp si, 2
        0xFF, 0x32,                     // push word [bp + si]
        0x1F,                           // pop ds
        0x93,                           // xchg ax, bx
        0xEC,                           // in al, dx
        0xE7, 0x2C,                     // out 44, ax
        0xD1, 0xE0,                     // shl ax, 1
        0xD3, 0xEB,                     // shr bx, cl
        0xF3, 0xAB,                     // rep stosw
        0xA8, 0x05,                     // test al, 5
        0x8D, 0x5A, 0x0C,               // lea bx, [bp + si + 12]
        0xCD, 0x21,                     // int 33
        0xC2, 0x08, 0x00,               // ret 8
        0xF8,                           // clc
        0x75, 0xFE,                     // jne $+0
        0xE2, 0xF8,                     // loop $-6
    ];
    let (_, listing) = run(&program, RunMode::Disassemble);

    let expected = [
        "add bx, [bx + si]",
        "add word [bp + si + 1000], 29",
        "cmp si, 2",
        "push word [bp + si]",
        "pop ds",
        "xchg ax, bx",
        "in al, dx",
        "out 44, ax",
        "shl ax, 1",
        "shr bx, cl",
        "rep stosw",
        "test al, 5",
        "lea bx, [bp + si + 12]",
        "int 33",
        "ret 8",
        "clc",
        "jne $+0",
        "loop $-6",
    ];
    assert_eq!(listing.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_execute_memory_and_flags() {
    #[rustfmt::skip]
    let program = [
        0xBB, 0xE8, 0x03,               // mov bx, 1000
        0xC7, 0x47, 0x04, 0x0A, 0x00,   // mov word [bx + 4], 10
        0x8B, 0x4F, 0x04,               // mov cx, [bx + 4]
        0x83, 0xE9, 0x03,               // sub cx, 3
        0x83, 0xF9, 0x07,               // cmp cx, 7
        0x83, 0xC1, 0xF9,               // add cx, -7
    ];
    let (machine, listing) = run(&program, RunMode::Execute);

    let expected = [
        "mov bx, 1000 ; bx:0x0000->0x03E8",
        "mov word [bx + 4], 10 ; [1004]:0x0000->0x000A",
        "mov cx, [bx + 4] ; cx:0x0000->0x000A",
        "sub cx, 3 ; cx:0x000A->0x0007",
        "cmp cx, 7 ; flags:->PZ",
        "add cx, 65529 ; cx:0x0007->0x0000 flags:PZ->CPAZ",
    ];
    assert_eq!(listing.lines().collect::<Vec<_>>(), expected);

    let cpu = machine.cpu();
    assert_eq!(cpu.get_register(Register::BX), 1000);
    assert_eq!(cpu.get_register(Register::CX), 0);
    assert_eq!(machine.bus().read_u16(1004), 10);
    assert!(cpu.get_flag(Flag::Carry));
    assert!(cpu.get_flag(Flag::Zero));
    assert!(!cpu.get_flag(Flag::Overflow));
    assert_eq!(cpu.instruction_count(), 6);
}

#[test]
fn test_execute_byte_borrow() {
    #[rustfmt::skip]
    let program = [
        0xB0, 0x01, // mov al, 1
        0x2C, 0x02, // sub al, 2
    ];
    let (machine, listing) = run(&program, RunMode::Execute);

    assert_eq!(
        listing.lines().collect::<Vec<_>>(),
        ["mov al, 1 ; al:0x0000->0x0001", "sub al, 2 ; al:0x0001->0x00FF flags:->CPAS"]
    );
    let cpu = machine.cpu();
    assert_eq!(cpu.get_register(Register::AX), 0x00FF);
    assert!(cpu.get_flag(Flag::Sign));
    assert!(!cpu.get_flag(Flag::Zero));
    assert!(!cpu.get_flag(Flag::Overflow));
}

#[test]
fn test_register_dump() {
    #[rustfmt::skip]
    let program = [
        0xB8, 0x34, 0x12,   // mov ax, 0x1234
        0xB0, 0xFF,         // mov al, 255
        0xBC, 0x00, 0x01,   // mov sp, 256
    ];
    let (machine, _) = run(&program, RunMode::Execute);

    let dump = machine.cpu().registers().to_string();
    assert!(dump.contains("      ax: 0x12FF (4863)"));
    assert!(dump.contains("      sp: 0x0100 (256)"));
    assert!(dump.ends_with("   flags: "));
}

#[test]
fn test_fatal_decode_stops_run() {
    #[rustfmt::skip]
    let program = [
        0xB8, 0x01, 0x00,   // mov ax, 1
        0x60,               // undefined on the 8086
        0xB8, 0x02, 0x00,   // mov ax, 2
    ];
    let mut machine = new_machine(&program);
    let mut logger = TraceLogger::Buffer(String::new());
    let err = machine.run(RunMode::Execute, &mut logger).unwrap_err();

    assert!(matches!(
        err,
        CpuError::Decode(DecodeError::NoDefinitionFound { offset: 3, .. })
    ));
    assert_eq!(logger.buffer(), Some("mov ax, 1 ; ax:0x0000->0x0001\n"));
    assert_eq!(machine.cpu().get_register(Register::AX), 1);
}

#[test]
fn test_independent_machines() {
    let (a, _) = run(&[0xB8, 0x01, 0x00], RunMode::Execute);
    let (b, _) = run(&[0xBB, 0x02, 0x00], RunMode::Execute);
    assert_eq!(a.cpu().get_register(Register::AX), 1);
    assert_eq!(a.cpu().get_register(Register::BX), 0);
    assert_eq!(b.cpu().get_register(Register::AX), 0);
    assert_eq!(b.cpu().get_register(Register::BX), 2);
}
