//! Disassembly listing
//!
//! One line per instruction for code, and hex dumps with PETSCII glyphs,
//! [`BYTES_PER_LINE`] bytes a line, for everything else:
//!
//! ```text
//! 0801: .word $080B
//! 0803: .basic $0A $00 $9E $32 $30 $36 $31 $00	...2061.
//! 080B: .word $0000
//! 080D: LDA #$00
//! 080F: STA $D020
//! 0812: RTS
//! ```

use core::fmt;
use core::ops::Range;

use crate::insns::AddressMode;
use crate::insns::Opcode;
use crate::petscii::Charset;
use crate::prg::ProgramImage;
use crate::prg::SegmentTag;

pub const BYTES_PER_LINE: usize = 8;

/// Text rendering of a classified program. Never modifies the program.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    prg: &'a ProgramImage,
    charset: Charset,
}

impl<'a> Listing<'a> {
    pub fn new(prg: &'a ProgramImage) -> Self {
        Self {
            prg,
            charset: Charset::default(),
        }
    }

    /// Character set for the glyph column.
    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Writes the instruction at `offset` and returns the offset of the
    /// next one.
    fn write_insn(&self, f: &mut fmt::Formatter<'_>, offset: usize) -> Result<usize, fmt::Error> {
        let data = self.prg.data();
        let opcode = Opcode(data[offset]);
        let end = offset + opcode.size();
        if end > data.len() {
            self.write_dump(f, offset..data.len(), ".byte")?;
            return Ok(data.len());
        }

        write!(f, "{:04X}: {}", self.prg.offset_to_address(offset), opcode)?;
        let arg8 = || data[offset + 1];
        let arg16 = || self.prg.read_u16(offset + 1);
        match opcode.addr_mode() {
            AddressMode::Implied => {}
            AddressMode::Immediate => write!(f, " #${:02X}", arg8())?,
            AddressMode::Zeropage => write!(f, " ${:02X}", arg8())?,
            AddressMode::ZeropageX => write!(f, " ${:02X},X", arg8())?,
            AddressMode::ZeropageY => write!(f, " ${:02X},Y", arg8())?,
            AddressMode::Xindirect => write!(f, " (${:02X},X)", arg8())?,
            AddressMode::IndirectY => write!(f, " (${:02X}),Y", arg8())?,
            AddressMode::Absolute => write!(f, " ${:04X}", arg16())?,
            AddressMode::AbsoluteX => write!(f, " ${:04X},X", arg16())?,
            AddressMode::AbsoluteY => write!(f, " ${:04X},Y", arg16())?,
            AddressMode::Indirect => write!(f, " (${:04X})", arg16())?,
            AddressMode::Relative => write!(f, " #{}", arg8() as i8)?,
        }
        writeln!(f)?;

        Ok(end)
    }

    fn write_dump(
        &self,
        f: &mut fmt::Formatter<'_>,
        offsets: Range<usize>,
        label: &str,
    ) -> fmt::Result {
        let data = self.prg.data();
        let mut from = offsets.start;
        while from < offsets.end {
            write!(f, "{:04X}: {}", self.prg.offset_to_address(from), label)?;
            for pos in from..from + BYTES_PER_LINE {
                if pos < offsets.end {
                    write!(f, " ${:02X}", data[pos])?;
                } else {
                    f.write_str("    ")?;
                }
            }
            f.write_str("\t")?;
            for pos in from..from + BYTES_PER_LINE {
                if pos < offsets.end {
                    write!(f, "{}", self.charset.glyph(data[pos]))?;
                } else {
                    f.write_str(" ")?;
                }
            }
            writeln!(f)?;
            from += BYTES_PER_LINE;
        }

        Ok(())
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self.prg.tags();
        let mut pc = 0;
        while pc < tags.len() {
            match tags[pc] {
                SegmentTag::Code => pc = self.write_insn(f, pc)?,
                SegmentTag::AddressHeader
                    if tags.get(pc + 1) == Some(&SegmentTag::AddressHeader) =>
                {
                    writeln!(
                        f,
                        "{:04X}: .word ${:04X}",
                        self.prg.offset_to_address(pc),
                        self.prg.read_u16(pc)
                    )?;
                    pc += 2;
                }
                tag => {
                    let end = tags[pc..]
                        .iter()
                        .position(|t| *t != tag)
                        .map_or(tags.len(), |n| pc + n);
                    let label = match tag {
                        SegmentTag::BasicStub => ".basic",
                        SegmentTag::Unmarked => ".none",
                        _ => ".byte",
                    };
                    self.write_dump(f, pc..end, label)?;
                    pc = end;
                }
            }
        }

        Ok(())
    }
}
