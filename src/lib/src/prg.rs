//! PRG program image
//!
//! A PRG file is a little-endian load address followed by the bytes
//! to place there. Programs started with `RUN` begin with a one-line
//! BASIC stub (`10 SYS 2061` or similar), and the machine code follows
//! the stub's end-of-program marker.
//!
//! Loading classifies every byte of the image. Code is discovered by
//! walking the instructions reachable from the entry point without
//! executing anything. Branch and jump targets inside the image are
//! queued on a worklist, and operands of absolute memory accesses are
//! marked as data. Indirect jump targets are never followed, and
//! whatever is not proven to be code ends up as data.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use log::debug;
use log::trace;

use crate::insns::AddressMode;
use crate::insns::Opcode;

/// Load address, BASIC next-line pointer, end-of-program marker
/// and at least one byte of code.
pub const MIN_PRG_SIZE: usize = 7;

/// Size of the load address preceding the image.
pub const LOAD_ADDRESS_SIZE: usize = 2;

/// The image must fit into the 64 KiB address space.
pub const ADDRESS_SPACE_SIZE: usize = u16::MAX as usize + 1;

/// Classification of an image byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentTag {
    /// Not classified yet, never left after loading
    #[default]
    Unmarked,
    /// BASIC link pointer or the end-of-program marker
    AddressHeader,
    /// Tokenized BASIC line
    BasicStub,
    /// Part of a reachable instruction
    Code,
    /// Anything else
    Data,
}

/// What is wrong with the BASIC stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubFault {
    /// The next-line pointer leaves no room for the end-of-program marker
    LinkOutOfBounds(u16),
    /// The word at the next-line pointer is not zero
    MissingTerminator(u16),
}

/// Load errors. Every one of them rejects the whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer bytes than [`MIN_PRG_SIZE`]
    TooShort { len: usize },
    /// The image runs past the end of the address space
    TooLarge { load: u16, len: usize },
    /// The BASIC stub is inconsistent
    MalformedStub(StubFault),
    /// Address below the load address
    AddressUnderflow { addr: u16, load: u16 },
    /// Address at or past the end of the image
    AddressOverflow { addr: u16, end: usize },
    /// Operand bytes of the instruction at `addr` run past the image
    TruncatedInstruction { addr: u16, opcode: u8 },
    /// The operand of the instruction at `addr` can't be resolved
    UnsupportedAddressingMode {
        addr: u16,
        opcode: u8,
        mode: AddressMode,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::TooShort { len } => write!(
                f,
                "data too short: {} bytes, need at least {}",
                len, MIN_PRG_SIZE
            ),
            ParseError::TooLarge { load, len } => write!(
                f,
                "{} bytes loaded at ${:04X} do not fit into memory",
                len, load
            ),
            ParseError::MalformedStub(StubFault::LinkOutOfBounds(link)) => {
                write!(f, "BASIC next line ${:04X} out of bounds", link)
            }
            ParseError::MalformedStub(StubFault::MissingTerminator(word)) => {
                write!(f, "BASIC next line is ${:04X}, expected $0000", word)
            }
            ParseError::AddressUnderflow { addr, load } => {
                write!(f, "address ${:04X} underflow ${:04X}", addr, load)
            }
            ParseError::AddressOverflow { addr, end } => {
                write!(f, "address ${:04X} overflow ${:04X}", addr, end)
            }
            ParseError::TruncatedInstruction { addr, opcode } => {
                write!(f, "{:04X}: {}: truncated code", addr, Opcode(opcode))
            }
            ParseError::UnsupportedAddressingMode { addr, opcode, mode } => write!(
                f,
                "{:04X}: {}: {} not supported",
                addr,
                Opcode(opcode),
                mode
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Run of equally tagged bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tag: SegmentTag,
    pub offsets: Range<usize>,
}

/// Byte counts per tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub unmarked: usize,
    pub address_header: usize,
    pub basic_stub: usize,
    pub code: usize,
    pub data: usize,
}

/// Loaded and classified program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImage {
    load: u16,
    /// The BASIC entry point first, then the extra ones
    entries: Vec<u16>,
    data: Vec<u8>,
    tags: Vec<SegmentTag>,
}

impl ProgramImage {
    /// Loads a PRG file and classifies its bytes.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with_entries(raw, &[])
    }

    /// Same as [`ProgramImage::parse`], code discovery also starts
    /// from the given addresses.
    pub fn parse_with_entries(raw: &[u8], entries: &[u16]) -> Result<Self, ParseError> {
        if raw.len() < MIN_PRG_SIZE {
            return Err(ParseError::TooShort { len: raw.len() });
        }
        let load = u16::from_le_bytes([raw[0], raw[1]]);
        let data = raw[LOAD_ADDRESS_SIZE..].to_vec();
        if load as usize + data.len() > ADDRESS_SPACE_SIZE {
            return Err(ParseError::TooLarge {
                load,
                len: data.len(),
            });
        }

        let mut prg = Self {
            load,
            entries: Vec::with_capacity(1 + entries.len()),
            tags: vec![SegmentTag::Unmarked; data.len()],
            data,
        };

        let entry = prg.parse_basic_stub()?;
        prg.entries.push(entry);
        prg.entries.extend_from_slice(entries);

        prg.segment()?;

        Ok(prg)
    }

    /// Tags the link pointer, the stub and the end marker, and returns
    /// the address right after the marker.
    fn parse_basic_stub(&mut self) -> Result<u16, ParseError> {
        self.tags[0] = SegmentTag::AddressHeader;
        self.tags[1] = SegmentTag::AddressHeader;

        let link = self.read_u16(0);
        let next = self
            .address_to_offset(link)
            .map_err(|_| ParseError::MalformedStub(StubFault::LinkOutOfBounds(link)))?;
        if next < 2 || next + 2 >= self.len() {
            return Err(ParseError::MalformedStub(StubFault::LinkOutOfBounds(link)));
        }
        self.tags[2..next].fill(SegmentTag::BasicStub);

        let terminator = self.read_u16(next);
        if terminator != 0 {
            return Err(ParseError::MalformedStub(StubFault::MissingTerminator(
                terminator,
            )));
        }
        self.tags[next] = SegmentTag::AddressHeader;
        self.tags[next + 1] = SegmentTag::AddressHeader;

        Ok(self.offset_to_address(next + 2))
    }

    /// Classifies the bytes not classified yet. Running it again over
    /// a classified image changes nothing.
    pub fn segment(&mut self) -> Result<(), ParseError> {
        let entries = self.entries.clone();
        self.discover_code(entries)?;

        // An unmarked byte right after an instruction is taken as
        // more code. Might start a walk in a table following the code.
        for offset in 1..self.len() {
            if self.tags[offset] == SegmentTag::Unmarked
                && self.tags[offset - 1] == SegmentTag::Code
            {
                self.discover_code([self.offset_to_address(offset)])?;
            }
        }

        for tag in self.tags.iter_mut() {
            if *tag == SegmentTag::Unmarked {
                *tag = SegmentTag::Data;
            }
        }

        Ok(())
    }

    fn discover_code<I>(&mut self, seeds: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut pending: VecDeque<u16> = seeds.into_iter().collect();
        while let Some(addr) = pending.pop_front() {
            self.walk_code(addr, &mut pending)?;
        }

        Ok(())
    }

    /// Tags the instructions from `addr` on until a block end or an
    /// already classified byte, queueing the branch targets.
    fn walk_code(&mut self, addr: u16, pending: &mut VecDeque<u16>) -> Result<(), ParseError> {
        let mut offset = self.address_to_offset(addr)?;
        if self.tags[offset] == SegmentTag::Unmarked {
            debug!("walking code from ${:04X}", addr);
        }

        while offset < self.len() && self.tags[offset] == SegmentTag::Unmarked {
            let opcode = Opcode(self.data[offset]);
            let size = opcode.size();
            let pc = self.offset_to_address(offset);
            if offset + size > self.len() {
                return Err(ParseError::TruncatedInstruction {
                    addr: pc,
                    opcode: opcode.0,
                });
            }
            trace!("${:04X}: {}", pc, opcode.insn());

            // Operand bytes overlapping classified bytes keep their tag
            for tag in &mut self.tags[offset..offset + size] {
                if *tag == SegmentTag::Unmarked {
                    *tag = SegmentTag::Code;
                }
            }

            match opcode.addr_mode() {
                AddressMode::Relative => {
                    let displacement = self.data[offset + 1] as i8;
                    let target = (offset + size) as isize + displacement as isize;
                    if target < 0 || target as usize >= self.len() {
                        debug!("${:04X}: {} target outside the image", pc, opcode);
                    } else if opcode.is_control_transfer() {
                        pending.push_back(self.offset_to_address(target as usize));
                    }
                }
                AddressMode::Absolute | AddressMode::AbsoluteX | AddressMode::AbsoluteY => {
                    let operand = self.read_u16(offset + 1);
                    match self.address_to_offset(operand) {
                        Ok(_) if opcode.is_control_transfer() => pending.push_back(operand),
                        Ok(target) => {
                            if opcode.is_memory_access()
                                && self.tags[target] == SegmentTag::Unmarked
                            {
                                self.tags[target] = SegmentTag::Data;
                            }
                        }
                        Err(_) => {
                            debug!("${:04X}: {} ${:04X} outside the image", pc, opcode, operand)
                        }
                    }
                }
                AddressMode::Indirect => {
                    let operand = self.read_u16(offset + 1);
                    if self.address_to_offset(operand).is_ok() {
                        return Err(ParseError::UnsupportedAddressingMode {
                            addr: pc,
                            opcode: opcode.0,
                            mode: AddressMode::Indirect,
                        });
                    }
                    debug!("${:04X}: {} (${:04X}) outside the image", pc, opcode, operand);
                }
                AddressMode::Implied
                | AddressMode::Immediate
                | AddressMode::Zeropage
                | AddressMode::ZeropageX
                | AddressMode::ZeropageY
                | AddressMode::Xindirect
                | AddressMode::IndirectY => {}
            }

            offset += size;
            if opcode.is_block_terminator() {
                break;
            }
        }

        Ok(())
    }

    /// Maps a memory address to an offset into the image.
    pub fn address_to_offset(&self, addr: u16) -> Result<usize, ParseError> {
        if addr < self.load {
            return Err(ParseError::AddressUnderflow {
                addr,
                load: self.load,
            });
        }
        let offset = (addr - self.load) as usize;
        if offset >= self.len() {
            return Err(ParseError::AddressOverflow {
                addr,
                end: self.load as usize + self.len(),
            });
        }

        Ok(offset)
    }

    /// Maps an offset into the image to its memory address.
    #[inline]
    pub fn offset_to_address(&self, offset: usize) -> u16 {
        self.load.wrapping_add(offset as u16)
    }

    #[inline]
    pub(crate) fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    #[inline]
    pub fn load_address(&self) -> u16 {
        self.load
    }

    /// Address following the BASIC stub.
    #[inline]
    pub fn entry_address(&self) -> u16 {
        self.entries[0]
    }

    #[inline]
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn tags(&self) -> &[SegmentTag] {
        &self.tags
    }

    #[inline]
    pub fn tag(&self, offset: usize) -> Option<SegmentTag> {
        self.tags.get(offset).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximal runs of equally tagged bytes, in image order.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            tags: &self.tags,
            pos: 0,
        }
    }

    pub fn summary(&self) -> TagSummary {
        let mut summary = TagSummary::default();
        for tag in &self.tags {
            match tag {
                SegmentTag::Unmarked => summary.unmarked += 1,
                SegmentTag::AddressHeader => summary.address_header += 1,
                SegmentTag::BasicStub => summary.basic_stub += 1,
                SegmentTag::Code => summary.code += 1,
                SegmentTag::Data => summary.data += 1,
            }
        }

        summary
    }
}

/// Iterator returned by [`ProgramImage::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    tags: &'a [SegmentTag],
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let start = self.pos;
        let tag = *self.tags.get(start)?;
        let end = self.tags[start..]
            .iter()
            .position(|t| *t != tag)
            .map_or(self.tags.len(), |n| start + n);
        self.pos = end;

        Some(Segment {
            tag,
            offsets: start..end,
        })
    }
}
