//! Instruction model
//!
//! Every one of the 256 opcode values has a descriptor, the undocumented
//! ("illegal") ones included. Opcodes that jam the processor carry the
//! `KIL` placeholder mnemonic and no cycle count.

use core::fmt;

use bitflags::bitflags;

/// Addressing modes of the 6510.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Implied or accumulator, no operand
    Implied,
    /// `#$00`
    Immediate,
    /// `$00`
    Zeropage,
    /// `$00,X`
    ZeropageX,
    /// `$00,Y`
    ZeropageY,
    /// `($00,X)`
    Xindirect,
    /// `($00),Y`
    IndirectY,
    /// `$0000`
    Absolute,
    /// `$0000,X`
    AbsoluteX,
    /// `$0000,Y`
    AbsoluteY,
    /// `($0000)`, only used by `JMP`
    Indirect,
    /// Signed 8-bit offset from the address of the next instruction
    Relative,
}

impl AddressMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_size(&self) -> usize {
        match self {
            AddressMode::Implied => 0,
            AddressMode::Immediate
            | AddressMode::Zeropage
            | AddressMode::ZeropageX
            | AddressMode::ZeropageY
            | AddressMode::Xindirect
            | AddressMode::IndirectY
            | AddressMode::Relative => 1,
            AddressMode::Absolute
            | AddressMode::AbsoluteX
            | AddressMode::AbsoluteY
            | AddressMode::Indirect => 2,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            AddressMode::Implied => "",
            AddressMode::Immediate => "imm",
            AddressMode::Zeropage => "zp",
            AddressMode::ZeropageX => "zpx",
            AddressMode::ZeropageY => "zpy",
            AddressMode::Xindirect => "izx",
            AddressMode::IndirectY => "izy",
            AddressMode::Absolute => "abs",
            AddressMode::AbsoluteX => "abx",
            AddressMode::AbsoluteY => "aby",
            AddressMode::Indirect => "ind",
            AddressMode::Relative => "rel",
        }
    }
}

impl fmt::Display for AddressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

bitflags! {
    /// Control-flow classification of an instruction. Only drives
    /// code discovery, nothing here models execution.
    pub struct InsnFlags : u8 {
        /// Reads or writes the memory at its operand address
        const DATA = 0x01;
        /// May change the program counter to its operand address
        const JUMP = 0x02;
        /// Control never falls through to the next instruction
        const BLOCK_END = 0x04;
    }
}

/// Instruction descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insn {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub mode: AddressMode,
    /// Base cycle cost, zero for the jamming opcodes
    pub cycles: u8,
    /// One more cycle when the effective address crosses a page
    pub page_penalty: bool,
    pub flags: InsnFlags,
}

/// Placeholder mnemonic for the opcodes that halt the processor.
pub const HALT_MNEMONIC: &str = "KIL";

const DATA_MNEMONICS: [&str; 20] = [
    "ORA", "AND", "EOR", "ADC", "SBC", "CMP", "CPX", "CPY", "DEC", "INC", "ASL", "ROL", "LSR",
    "ROR", "LDA", "STA", "LDX", "STX", "LDY", "STY",
];

const JUMP_MNEMONICS: [&str; 10] = [
    "BPL", "BMI", "BVC", "BVS", "BCC", "BCS", "BNE", "BEQ", "JSR", "JMP",
];

const BLOCK_END_MNEMONICS: [&str; 4] = ["BRK", "RTI", "RTS", "JMP"];

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn contains(names: &[&str], name: &str) -> bool {
    let mut i = 0;
    while i < names.len() {
        if str_eq(names[i], name) {
            return true;
        }
        i += 1;
    }
    false
}

const fn insn(
    opcode: u8,
    mnemonic: &'static str,
    mode: AddressMode,
    cycles: u8,
    page_penalty: bool,
) -> Insn {
    let mut bits = 0;
    if contains(&DATA_MNEMONICS, mnemonic) {
        bits |= InsnFlags::DATA.bits();
    }
    if contains(&JUMP_MNEMONICS, mnemonic) {
        bits |= InsnFlags::JUMP.bits();
    }
    if contains(&BLOCK_END_MNEMONICS, mnemonic) {
        bits |= InsnFlags::BLOCK_END.bits();
    }

    Insn {
        opcode,
        mnemonic,
        mode,
        cycles,
        page_penalty,
        flags: InsnFlags::from_bits_truncate(bits),
    }
}

use self::AddressMode as M;

/// Index is the opcode.
static INSNS: [Insn; 256] = [
    // 0x00-0x0F
    insn(0x00, "BRK", M::Implied, 7, false),
    insn(0x01, "ORA", M::Xindirect, 6, false),
    insn(0x02, "KIL", M::Implied, 0, false),
    insn(0x03, "SLO", M::Xindirect, 8, false),
    insn(0x04, "NOP", M::Zeropage, 3, false),
    insn(0x05, "ORA", M::Zeropage, 3, false),
    insn(0x06, "ASL", M::Zeropage, 5, false),
    insn(0x07, "SLO", M::Zeropage, 5, false),
    insn(0x08, "PHP", M::Implied, 3, false),
    insn(0x09, "ORA", M::Immediate, 2, false),
    insn(0x0A, "ASL", M::Implied, 2, false),
    insn(0x0B, "ANC", M::Immediate, 2, false),
    insn(0x0C, "NOP", M::Absolute, 4, false),
    insn(0x0D, "ORA", M::Absolute, 4, false),
    insn(0x0E, "ASL", M::Absolute, 6, false),
    insn(0x0F, "SLO", M::Absolute, 6, false),
    // 0x10-0x1F
    insn(0x10, "BPL", M::Relative, 2, true),
    insn(0x11, "ORA", M::IndirectY, 5, true),
    insn(0x12, "KIL", M::Implied, 0, false),
    insn(0x13, "SLO", M::IndirectY, 8, false),
    insn(0x14, "NOP", M::ZeropageX, 4, false),
    insn(0x15, "ORA", M::ZeropageX, 4, false),
    insn(0x16, "ASL", M::ZeropageX, 6, false),
    insn(0x17, "SLO", M::ZeropageX, 6, false),
    insn(0x18, "CLC", M::Implied, 2, false),
    insn(0x19, "ORA", M::AbsoluteY, 4, true),
    insn(0x1A, "NOP", M::Implied, 2, false),
    insn(0x1B, "SLO", M::AbsoluteY, 7, false),
    insn(0x1C, "NOP", M::AbsoluteX, 4, true),
    insn(0x1D, "ORA", M::AbsoluteX, 4, true),
    insn(0x1E, "ASL", M::AbsoluteX, 7, false),
    insn(0x1F, "SLO", M::AbsoluteX, 7, false),
    // 0x20-0x2F
    insn(0x20, "JSR", M::Absolute, 6, false),
    insn(0x21, "AND", M::Xindirect, 6, false),
    insn(0x22, "KIL", M::Implied, 0, false),
    insn(0x23, "RLA", M::Xindirect, 8, false),
    insn(0x24, "BIT", M::Zeropage, 3, false),
    insn(0x25, "AND", M::Zeropage, 3, false),
    insn(0x26, "ROL", M::Zeropage, 5, false),
    insn(0x27, "RLA", M::Zeropage, 5, false),
    insn(0x28, "PLP", M::Implied, 4, false),
    insn(0x29, "AND", M::Immediate, 2, false),
    insn(0x2A, "ROL", M::Implied, 2, false),
    insn(0x2B, "ANC", M::Immediate, 2, false),
    insn(0x2C, "BIT", M::Absolute, 4, false),
    insn(0x2D, "AND", M::Absolute, 4, false),
    insn(0x2E, "ROL", M::Absolute, 6, false),
    insn(0x2F, "RLA", M::Absolute, 6, false),
    // 0x30-0x3F
    insn(0x30, "BMI", M::Relative, 2, true),
    insn(0x31, "AND", M::IndirectY, 5, true),
    insn(0x32, "KIL", M::Implied, 0, false),
    insn(0x33, "RLA", M::IndirectY, 8, false),
    insn(0x34, "NOP", M::ZeropageX, 4, false),
    insn(0x35, "AND", M::ZeropageX, 4, false),
    insn(0x36, "ROL", M::ZeropageX, 6, false),
    insn(0x37, "RLA", M::ZeropageX, 6, false),
    insn(0x38, "SEC", M::Implied, 2, false),
    insn(0x39, "AND", M::AbsoluteY, 4, true),
    insn(0x3A, "NOP", M::Implied, 2, false),
    insn(0x3B, "RLA", M::AbsoluteY, 7, false),
    insn(0x3C, "NOP", M::AbsoluteX, 4, true),
    insn(0x3D, "AND", M::AbsoluteX, 4, true),
    insn(0x3E, "ROL", M::AbsoluteX, 7, false),
    insn(0x3F, "RLA", M::AbsoluteX, 7, false),
    // 0x40-0x4F
    insn(0x40, "RTI", M::Implied, 6, false),
    insn(0x41, "EOR", M::Xindirect, 6, false),
    insn(0x42, "KIL", M::Implied, 0, false),
    insn(0x43, "SRE", M::Xindirect, 8, false),
    insn(0x44, "NOP", M::Zeropage, 3, false),
    insn(0x45, "EOR", M::Zeropage, 3, false),
    insn(0x46, "LSR", M::Zeropage, 5, false),
    insn(0x47, "SRE", M::Zeropage, 5, false),
    insn(0x48, "PHA", M::Implied, 3, false),
    insn(0x49, "EOR", M::Immediate, 2, false),
    insn(0x4A, "LSR", M::Implied, 2, false),
    insn(0x4B, "ALR", M::Immediate, 2, false),
    insn(0x4C, "JMP", M::Absolute, 3, false),
    insn(0x4D, "EOR", M::Absolute, 4, false),
    insn(0x4E, "LSR", M::Absolute, 6, false),
    insn(0x4F, "SRE", M::Absolute, 6, false),
    // 0x50-0x5F
    insn(0x50, "BVC", M::Relative, 2, true),
    insn(0x51, "EOR", M::IndirectY, 5, true),
    insn(0x52, "KIL", M::Implied, 0, false),
    insn(0x53, "SRE", M::IndirectY, 8, false),
    insn(0x54, "NOP", M::ZeropageX, 4, false),
    insn(0x55, "EOR", M::ZeropageX, 4, false),
    insn(0x56, "LSR", M::ZeropageX, 6, false),
    insn(0x57, "SRE", M::ZeropageX, 6, false),
    insn(0x58, "CLI", M::Implied, 2, false),
    insn(0x59, "EOR", M::AbsoluteY, 4, true),
    insn(0x5A, "NOP", M::Implied, 2, false),
    insn(0x5B, "SRE", M::AbsoluteY, 7, false),
    insn(0x5C, "NOP", M::AbsoluteX, 4, true),
    insn(0x5D, "EOR", M::AbsoluteX, 4, true),
    insn(0x5E, "LSR", M::AbsoluteX, 7, false),
    insn(0x5F, "SRE", M::AbsoluteX, 7, false),
    // 0x60-0x6F
    insn(0x60, "RTS", M::Implied, 6, false),
    insn(0x61, "ADC", M::Xindirect, 6, false),
    insn(0x62, "KIL", M::Implied, 0, false),
    insn(0x63, "RRA", M::Xindirect, 8, false),
    insn(0x64, "NOP", M::Zeropage, 3, false),
    insn(0x65, "ADC", M::Zeropage, 3, false),
    insn(0x66, "ROR", M::Zeropage, 5, false),
    insn(0x67, "RRA", M::Zeropage, 5, false),
    insn(0x68, "PLA", M::Implied, 4, false),
    insn(0x69, "ADC", M::Immediate, 2, false),
    insn(0x6A, "ROR", M::Implied, 2, false),
    insn(0x6B, "ARR", M::Immediate, 2, false),
    insn(0x6C, "JMP", M::Indirect, 5, false),
    insn(0x6D, "ADC", M::Absolute, 4, false),
    insn(0x6E, "ROR", M::Absolute, 6, false),
    insn(0x6F, "RRA", M::Absolute, 6, false),
    // 0x70-0x7F
    insn(0x70, "BVS", M::Relative, 2, true),
    insn(0x71, "ADC", M::IndirectY, 5, true),
    insn(0x72, "KIL", M::Implied, 0, false),
    insn(0x73, "RRA", M::IndirectY, 8, false),
    insn(0x74, "NOP", M::ZeropageX, 4, false),
    insn(0x75, "ADC", M::ZeropageX, 4, false),
    insn(0x76, "ROR", M::ZeropageX, 6, false),
    insn(0x77, "RRA", M::ZeropageX, 6, false),
    insn(0x78, "SEI", M::Implied, 2, false),
    insn(0x79, "ADC", M::AbsoluteY, 4, true),
    insn(0x7A, "NOP", M::Implied, 2, false),
    insn(0x7B, "RRA", M::AbsoluteY, 7, false),
    insn(0x7C, "NOP", M::AbsoluteX, 4, true),
    insn(0x7D, "ADC", M::AbsoluteX, 4, true),
    insn(0x7E, "ROR", M::AbsoluteX, 7, false),
    insn(0x7F, "RRA", M::AbsoluteX, 7, false),
    // 0x80-0x8F
    insn(0x80, "NOP", M::Immediate, 2, false),
    insn(0x81, "STA", M::Xindirect, 6, false),
    insn(0x82, "NOP", M::Immediate, 2, false),
    insn(0x83, "SAX", M::Xindirect, 6, false),
    insn(0x84, "STY", M::Zeropage, 3, false),
    insn(0x85, "STA", M::Zeropage, 3, false),
    insn(0x86, "STX", M::Zeropage, 3, false),
    insn(0x87, "SAX", M::Zeropage, 3, false),
    insn(0x88, "DEY", M::Implied, 2, false),
    insn(0x89, "NOP", M::Immediate, 2, false),
    insn(0x8A, "TXA", M::Implied, 2, false),
    insn(0x8B, "XAA", M::Immediate, 2, false),
    insn(0x8C, "STY", M::Absolute, 4, false),
    insn(0x8D, "STA", M::Absolute, 4, false),
    insn(0x8E, "STX", M::Absolute, 4, false),
    insn(0x8F, "SAX", M::Absolute, 4, false),
    // 0x90-0x9F
    insn(0x90, "BCC", M::Relative, 2, true),
    insn(0x91, "STA", M::IndirectY, 6, false),
    insn(0x92, "KIL", M::Implied, 0, false),
    insn(0x93, "AHX", M::IndirectY, 6, false),
    insn(0x94, "STY", M::ZeropageX, 4, false),
    insn(0x95, "STA", M::ZeropageX, 4, false),
    insn(0x96, "STX", M::ZeropageY, 4, false),
    insn(0x97, "SAX", M::ZeropageY, 4, false),
    insn(0x98, "TYA", M::Implied, 2, false),
    insn(0x99, "STA", M::AbsoluteY, 5, false),
    insn(0x9A, "TXS", M::Implied, 2, false),
    insn(0x9B, "TAS", M::AbsoluteY, 5, false),
    insn(0x9C, "SHY", M::AbsoluteX, 5, false),
    insn(0x9D, "STA", M::AbsoluteX, 5, false),
    insn(0x9E, "SHX", M::AbsoluteY, 5, false),
    insn(0x9F, "AHX", M::AbsoluteY, 5, false),
    // 0xA0-0xAF
    insn(0xA0, "LDY", M::Immediate, 2, false),
    insn(0xA1, "LDA", M::Xindirect, 6, false),
    insn(0xA2, "LDX", M::Immediate, 2, false),
    insn(0xA3, "LAX", M::Xindirect, 6, false),
    insn(0xA4, "LDY", M::Zeropage, 3, false),
    insn(0xA5, "LDA", M::Zeropage, 3, false),
    insn(0xA6, "LDX", M::Zeropage, 3, false),
    insn(0xA7, "LAX", M::Zeropage, 3, false),
    insn(0xA8, "TAY", M::Implied, 2, false),
    insn(0xA9, "LDA", M::Immediate, 2, false),
    insn(0xAA, "TAX", M::Implied, 2, false),
    insn(0xAB, "LAX", M::Immediate, 2, false),
    insn(0xAC, "LDY", M::Absolute, 4, false),
    insn(0xAD, "LDA", M::Absolute, 4, false),
    insn(0xAE, "LDX", M::Absolute, 4, false),
    insn(0xAF, "LAX", M::Absolute, 4, false),
    // 0xB0-0xBF
    insn(0xB0, "BCS", M::Relative, 2, true),
    insn(0xB1, "LDA", M::IndirectY, 5, true),
    insn(0xB2, "KIL", M::Implied, 0, false),
    insn(0xB3, "LAX", M::IndirectY, 5, true),
    insn(0xB4, "LDY", M::ZeropageX, 4, false),
    insn(0xB5, "LDA", M::ZeropageX, 4, false),
    insn(0xB6, "LDX", M::ZeropageY, 4, false),
    insn(0xB7, "LAX", M::ZeropageY, 4, false),
    insn(0xB8, "CLV", M::Implied, 2, false),
    insn(0xB9, "LDA", M::AbsoluteY, 4, true),
    insn(0xBA, "TSX", M::Implied, 2, false),
    insn(0xBB, "LAS", M::AbsoluteY, 4, true),
    insn(0xBC, "LDY", M::AbsoluteX, 4, true),
    insn(0xBD, "LDA", M::AbsoluteX, 4, true),
    insn(0xBE, "LDX", M::AbsoluteY, 4, true),
    insn(0xBF, "LAX", M::AbsoluteY, 4, true),
    // 0xC0-0xCF
    insn(0xC0, "CPY", M::Immediate, 2, false),
    insn(0xC1, "CMP", M::Xindirect, 6, false),
    insn(0xC2, "NOP", M::Immediate, 2, false),
    insn(0xC3, "DCP", M::Xindirect, 8, false),
    insn(0xC4, "CPY", M::Zeropage, 3, false),
    insn(0xC5, "CMP", M::Zeropage, 3, false),
    insn(0xC6, "DEC", M::Zeropage, 5, false),
    insn(0xC7, "DCP", M::Zeropage, 5, false),
    insn(0xC8, "INY", M::Implied, 2, false),
    insn(0xC9, "CMP", M::Immediate, 2, false),
    insn(0xCA, "DEX", M::Implied, 2, false),
    insn(0xCB, "AXS", M::Immediate, 2, false),
    insn(0xCC, "CPY", M::Absolute, 4, false),
    insn(0xCD, "CMP", M::Absolute, 4, false),
    insn(0xCE, "DEC", M::Absolute, 6, false),
    insn(0xCF, "DCP", M::Absolute, 6, false),
    // 0xD0-0xDF
    insn(0xD0, "BNE", M::Relative, 2, true),
    insn(0xD1, "CMP", M::IndirectY, 5, true),
    insn(0xD2, "KIL", M::Implied, 0, false),
    insn(0xD3, "DCP", M::IndirectY, 8, false),
    insn(0xD4, "NOP", M::ZeropageX, 4, false),
    insn(0xD5, "CMP", M::ZeropageX, 4, false),
    insn(0xD6, "DEC", M::ZeropageX, 6, false),
    insn(0xD7, "DCP", M::ZeropageX, 6, false),
    insn(0xD8, "CLD", M::Implied, 2, false),
    insn(0xD9, "CMP", M::AbsoluteY, 4, true),
    insn(0xDA, "NOP", M::Implied, 2, false),
    insn(0xDB, "DCP", M::AbsoluteY, 7, false),
    insn(0xDC, "NOP", M::AbsoluteX, 4, true),
    insn(0xDD, "CMP", M::AbsoluteX, 4, true),
    insn(0xDE, "DEC", M::AbsoluteX, 7, false),
    insn(0xDF, "DCP", M::AbsoluteX, 7, false),
    // 0xE0-0xEF
    insn(0xE0, "CPX", M::Immediate, 2, false),
    insn(0xE1, "SBC", M::Xindirect, 6, false),
    insn(0xE2, "NOP", M::Immediate, 2, false),
    insn(0xE3, "ISC", M::Xindirect, 8, false),
    insn(0xE4, "CPX", M::Zeropage, 3, false),
    insn(0xE5, "SBC", M::Zeropage, 3, false),
    insn(0xE6, "INC", M::Zeropage, 5, false),
    insn(0xE7, "ISC", M::Zeropage, 5, false),
    insn(0xE8, "INX", M::Implied, 2, false),
    insn(0xE9, "SBC", M::Immediate, 2, false),
    insn(0xEA, "NOP", M::Implied, 2, false),
    insn(0xEB, "SBC", M::Immediate, 2, false),
    insn(0xEC, "CPX", M::Absolute, 4, false),
    insn(0xED, "SBC", M::Absolute, 4, false),
    insn(0xEE, "INC", M::Absolute, 6, false),
    insn(0xEF, "ISC", M::Absolute, 6, false),
    // 0xF0-0xFF
    insn(0xF0, "BEQ", M::Relative, 2, true),
    insn(0xF1, "SBC", M::IndirectY, 5, true),
    insn(0xF2, "KIL", M::Implied, 0, false),
    insn(0xF3, "ISC", M::IndirectY, 8, false),
    insn(0xF4, "NOP", M::ZeropageX, 4, false),
    insn(0xF5, "SBC", M::ZeropageX, 4, false),
    insn(0xF6, "INC", M::ZeropageX, 6, false),
    insn(0xF7, "ISC", M::ZeropageX, 6, false),
    insn(0xF8, "SED", M::Implied, 2, false),
    insn(0xF9, "SBC", M::AbsoluteY, 4, true),
    insn(0xFA, "NOP", M::Implied, 2, false),
    insn(0xFB, "ISC", M::AbsoluteY, 7, false),
    insn(0xFC, "NOP", M::AbsoluteX, 4, true),
    insn(0xFD, "SBC", M::AbsoluteX, 4, true),
    insn(0xFE, "INC", M::AbsoluteX, 7, false),
    insn(0xFF, "ISC", M::AbsoluteX, 7, false),
];

impl Insn {
    /// Opcode plus operand bytes.
    pub const fn size(&self) -> usize {
        1 + self.mode.operand_size()
    }

    pub fn is_halt(&self) -> bool {
        self.mnemonic == HALT_MNEMONIC
    }
}

impl fmt::Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        if self.mode != AddressMode::Implied {
            write!(f, " {}", self.mode)?;
        }
        if self.cycles > 0 {
            write!(f, " {}", self.cycles)?;
            if self.page_penalty {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

pub fn decode_insn(opcode: u8) -> &'static Insn {
    &INSNS[opcode as usize]
}

/// Finds the opcode for the mnemonic and the addressing mode. When
/// several undocumented opcodes share the pair, the lowest one wins.
pub fn encode_insn(mnemonic: &str, mode: AddressMode) -> Option<u8> {
    INSNS
        .iter()
        .find(|insn| insn.mode == mode && insn.mnemonic.eq_ignore_ascii_case(mnemonic))
        .map(|insn| insn.opcode)
}

/// All descriptors in opcode order.
pub fn opcode_table() -> impl Iterator<Item = &'static Insn> {
    INSNS.iter()
}

/// Raw opcode byte with the queries code discovery needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
    #[inline]
    pub fn insn(&self) -> &'static Insn {
        decode_insn(self.0)
    }

    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        self.insn().mnemonic
    }

    #[inline]
    pub fn addr_mode(&self) -> AddressMode {
        self.insn().mode
    }

    #[inline]
    pub fn operand_size(&self) -> usize {
        self.insn().mode.operand_size()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.insn().size()
    }

    #[inline]
    pub fn is_memory_access(&self) -> bool {
        self.insn().flags.contains(InsnFlags::DATA)
    }

    #[inline]
    pub fn is_control_transfer(&self) -> bool {
        self.insn().flags.contains(InsnFlags::JUMP)
    }

    #[inline]
    pub fn is_block_terminator(&self) -> bool {
        self.insn().flags.contains(InsnFlags::BLOCK_END)
    }

    #[inline]
    pub fn is_halt(&self) -> bool {
        self.insn().is_halt()
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode(value)
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        value.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
