#![cfg(test)]

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::*;

const LOAD: u16 = 0x0801;
const ENTRY: u16 = 0x080d;

/// `10 SYS 2061` followed by the end-of-program marker
const BASIC_STUB: [u8; 12] = [
    0x0b, 0x08, 0x0a, 0x00, 0x9e, 0x32, 0x30, 0x36, 0x31, 0x00, 0x00, 0x00,
];

fn prg_file(code: &[u8]) -> Vec<u8> {
    let mut bytes = LOAD.to_le_bytes().to_vec();
    bytes.extend_from_slice(&BASIC_STUB);
    bytes.extend_from_slice(code);
    bytes
}

fn op(mnemonic: &str, mode: AddressMode) -> u8 {
    encode_insn(mnemonic, mode).unwrap()
}

fn lo(addr: u16) -> u8 {
    addr as u8
}

fn hi(addr: u16) -> u8 {
    (addr >> 8) as u8
}

fn tag_at(prg: &ProgramImage, addr: u16) -> SegmentTag {
    prg.tag(prg.address_to_offset(addr).unwrap()).unwrap()
}

struct XorShift(u32);

impl XorShift {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn byte(&mut self) -> u8 {
        self.next() as u8
    }

    fn below(&mut self, n: usize) -> usize {
        self.next() as usize % n
    }
}

#[test]
fn test_minimal_program() {
    let prg = ProgramImage::parse(&[0x01, 0x08, 0x03, 0x08, 0x00, 0x00, 0x60]).unwrap();

    assert_eq!(prg.load_address(), 0x0801);
    assert_eq!(prg.entry_address(), 0x0805);
    assert_eq!(prg.len(), 5);
    assert_eq!(
        prg.tags(),
        &[
            SegmentTag::AddressHeader,
            SegmentTag::AddressHeader,
            SegmentTag::AddressHeader,
            SegmentTag::AddressHeader,
            SegmentTag::Code,
        ]
    );
}

#[test]
fn test_link_past_the_end() {
    // The link points at $0807, past the five bytes of the image.
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x07, 0x08, 0x00, 0x00, 0x60]),
        Err(ParseError::MalformedStub(StubFault::LinkOutOfBounds(0x0807)))
    );
}

#[test]
fn test_too_short() {
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x03, 0x08, 0x00, 0x00]),
        Err(ParseError::TooShort { len: 6 })
    );
    assert_eq!(
        ProgramImage::parse(&[]),
        Err(ParseError::TooShort { len: 0 })
    );
}

#[test]
fn test_too_large() {
    let mut bytes = Vec::from([0xf0, 0xff]);
    bytes.resize(2 + 0x11, 0xea);
    assert_eq!(
        ProgramImage::parse(&bytes),
        Err(ParseError::TooLarge {
            load: 0xfff0,
            len: 0x11
        })
    );
}

#[test]
fn test_malformed_stub() {
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x03, 0x08, 0x01, 0x00, 0x60]),
        Err(ParseError::MalformedStub(StubFault::MissingTerminator(
            0x0001
        )))
    );
    // Link into the pointer itself
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x02, 0x08, 0x00, 0x00, 0x60]),
        Err(ParseError::MalformedStub(StubFault::LinkOutOfBounds(0x0802)))
    );
    // Link below the load address
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x00, 0x04, 0x00, 0x00, 0x60]),
        Err(ParseError::MalformedStub(StubFault::LinkOutOfBounds(0x0400)))
    );
    // No room for code after the marker
    assert_eq!(
        ProgramImage::parse(&[0x01, 0x08, 0x04, 0x08, 0x00, 0x00, 0x00]),
        Err(ParseError::MalformedStub(StubFault::LinkOutOfBounds(0x0804)))
    );
}

#[test]
fn test_basic_stub_layout() {
    let program = [
        op("LDA", AddressMode::Immediate),
        0x00,
        op("STA", AddressMode::Absolute),
        0x20,
        0xd0,
        op("RTS", AddressMode::Implied),
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    assert_eq!(prg.entry_address(), ENTRY);
    assert_eq!(prg.entries(), &[ENTRY]);
    let segments: Vec<Segment> = prg.segments().collect();
    assert_eq!(
        segments,
        [
            Segment {
                tag: SegmentTag::AddressHeader,
                offsets: 0..2
            },
            Segment {
                tag: SegmentTag::BasicStub,
                offsets: 2..10
            },
            Segment {
                tag: SegmentTag::AddressHeader,
                offsets: 10..12
            },
            Segment {
                tag: SegmentTag::Code,
                offsets: 12..18
            },
        ]
    );
    assert_eq!(
        prg.summary(),
        TagSummary {
            unmarked: 0,
            address_header: 4,
            basic_stub: 8,
            code: 6,
            data: 0,
        }
    );
}

#[test]
fn test_truncated_instruction() {
    let program = [op("LDA", AddressMode::Absolute), 0x00];
    assert_eq!(
        ProgramImage::parse(&prg_file(&program)),
        Err(ParseError::TruncatedInstruction {
            addr: ENTRY,
            opcode: 0xad
        })
    );

    let program = [op("NOP", AddressMode::Implied), op("BNE", AddressMode::Relative)];
    assert_eq!(
        ProgramImage::parse(&prg_file(&program)),
        Err(ParseError::TruncatedInstruction {
            addr: ENTRY + 1,
            opcode: 0xd0
        })
    );
}

#[test]
fn test_references_outside_the_image() {
    let program = [
        op("JSR", AddressMode::Absolute),
        lo(0xffd2),
        hi(0xffd2),
        op("LDA", AddressMode::Absolute),
        lo(0x0400),
        hi(0x0400),
        op("JMP", AddressMode::Absolute),
        lo(0x0400),
        hi(0x0400),
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    assert_eq!(prg.summary().code, program.len());
    assert_eq!(prg.summary().data, 0);
}

#[test]
fn test_branch_outside_the_image() {
    let program = [
        op("BNE", AddressMode::Relative),
        0x80,
        op("BEQ", AddressMode::Relative),
        0x7f,
        op("RTS", AddressMode::Implied),
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    assert_eq!(prg.summary().code, program.len());
    assert_eq!(prg.summary().data, 0);
}

#[test]
fn test_branch_target_behind_data() {
    let program = [
        op("LDA", AddressMode::Absolute), // $080D
        lo(0x0813),
        hi(0x0813),
        op("BNE", AddressMode::Relative), // $0810
        0x02,
        op("RTS", AddressMode::Implied), // $0812
        0x02,                            // $0813
        op("INX", AddressMode::Implied), // $0814
        op("RTS", AddressMode::Implied), // $0815
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    for addr in 0x080d..=0x0812 {
        assert_eq!(tag_at(&prg, addr), SegmentTag::Code);
    }
    assert_eq!(tag_at(&prg, 0x0813), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0814), SegmentTag::Code);
    assert_eq!(tag_at(&prg, 0x0815), SegmentTag::Code);
}

#[test]
fn test_jump_target_behind_data() {
    let program = [
        op("LDA", AddressMode::Absolute), // $080D
        lo(0x0813),
        hi(0x0813),
        op("JMP", AddressMode::Absolute), // $0810
        lo(0x0814),
        hi(0x0814),
        0xff,                            // $0813
        op("RTS", AddressMode::Implied), // $0814
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    assert_eq!(tag_at(&prg, 0x0813), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0814), SegmentTag::Code);
}

#[test]
fn test_unreferenced_bytes_after_code() {
    // Bytes following code are walked as code, bytes following data
    // stay data.
    let program = [
        op("STA", AddressMode::Absolute), // $080D
        lo(0x0811),
        hi(0x0811),
        op("RTS", AddressMode::Implied), // $0810
        0x41,                            // $0811
        0x42,                            // $0812
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    assert_eq!(tag_at(&prg, 0x0811), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0812), SegmentTag::Data);

    let program = [
        op("RTS", AddressMode::Implied),
        op("NOP", AddressMode::Implied),
        op("RTS", AddressMode::Implied),
        0x42,
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    assert_eq!(prg.summary().code, program.len());
}

#[test]
fn test_indirect_jump() {
    let program = [
        op("JMP", AddressMode::Indirect),
        lo(0x0314),
        hi(0x0314),
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    assert_eq!(prg.summary().code, 3);

    let program = [
        op("JMP", AddressMode::Indirect),
        lo(0x0810),
        hi(0x0810),
        lo(ENTRY),
        hi(ENTRY),
    ];
    assert_eq!(
        ProgramImage::parse(&prg_file(&program)),
        Err(ParseError::UnsupportedAddressingMode {
            addr: ENTRY,
            opcode: 0x6c,
            mode: AddressMode::Indirect
        })
    );
}

#[test]
fn test_extra_entries() {
    let program = [
        op("LDA", AddressMode::Absolute), // $080D
        lo(0x0811),
        hi(0x0811),
        op("RTS", AddressMode::Implied), // $0810
        0xff,                            // $0811
        op("INX", AddressMode::Implied), // $0812
        op("RTI", AddressMode::Implied), // $0813
    ];
    let bytes = prg_file(&program);

    let prg = ProgramImage::parse(&bytes).unwrap();
    assert_eq!(tag_at(&prg, 0x0812), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0813), SegmentTag::Data);

    let prg = ProgramImage::parse_with_entries(&bytes, &[0x0812]).unwrap();
    assert_eq!(prg.entries(), &[ENTRY, 0x0812]);
    assert_eq!(tag_at(&prg, 0x0811), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0812), SegmentTag::Code);
    assert_eq!(tag_at(&prg, 0x0813), SegmentTag::Code);

    assert_eq!(
        ProgramImage::parse_with_entries(&bytes, &[0x0400]),
        Err(ParseError::AddressUnderflow {
            addr: 0x0400,
            load: LOAD
        })
    );
    assert_eq!(
        ProgramImage::parse_with_entries(&bytes, &[0x0814]),
        Err(ParseError::AddressOverflow {
            addr: 0x0814,
            end: 0x0814
        })
    );
}

#[test]
fn test_address_mapping() {
    let program = [op("RTS", AddressMode::Implied), 0xea, 0xea, 0xea];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    let end = LOAD + prg.len() as u16;

    for addr in LOAD..end {
        let offset = prg.address_to_offset(addr).unwrap();
        assert_eq!(offset, (addr - LOAD) as usize);
        assert_eq!(prg.offset_to_address(offset), addr);
    }
    assert_eq!(
        prg.address_to_offset(LOAD - 1),
        Err(ParseError::AddressUnderflow {
            addr: LOAD - 1,
            load: LOAD
        })
    );
    assert_eq!(
        prg.address_to_offset(end),
        Err(ParseError::AddressOverflow {
            addr: end,
            end: end as usize
        })
    );
    assert_eq!(prg.tag(prg.len()), None);
}

#[test]
fn test_segment_is_idempotent() {
    let program = [
        op("LDX", AddressMode::Immediate),
        0x00,
        op("LDA", AddressMode::AbsoluteX), // $080F
        lo(0x081a),
        hi(0x081a),
        op("JSR", AddressMode::Absolute), // $0812
        lo(0xffd2),
        hi(0xffd2),
        op("INX", AddressMode::Implied), // $0815
        op("BNE", AddressMode::Relative), // $0816
        0xf7,
        op("RTS", AddressMode::Implied), // $0818
        0x00,                            // $0819
        0x48,                            // $081A
        0x49,
        0x00,
    ];
    let mut prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    let before = prg.clone();

    prg.segment().unwrap();
    assert_eq!(prg, before);
    assert_eq!(tag_at(&prg, 0x081a), SegmentTag::Data);
    assert_eq!(tag_at(&prg, 0x0819), SegmentTag::Code);
}

#[test]
fn test_random_programs() {
    let mut rng = XorShift(0x6510_c64d);

    for _ in 0..2000 {
        let len = 1 + rng.below(48);
        let program: Vec<u8> = (0..len).map(|_| rng.byte()).collect();
        match ProgramImage::parse(&prg_file(&program)) {
            Ok(mut prg) => {
                assert_eq!(prg.summary().unmarked, 0);
                assert_eq!(tag_at(&prg, ENTRY), SegmentTag::Code);
                let entry = prg.address_to_offset(ENTRY).unwrap();
                assert_eq!(prg.tags()[..2], [SegmentTag::AddressHeader; 2]);
                assert_eq!(prg.tags()[2..entry - 2], [SegmentTag::BasicStub; 8]);
                assert_eq!(prg.tags()[entry - 2..entry], [SegmentTag::AddressHeader; 2]);

                let before = prg.clone();
                prg.segment().unwrap();
                assert_eq!(prg, before);
            }
            Err(e) => assert!(
                matches!(
                    e,
                    ParseError::TruncatedInstruction { .. }
                        | ParseError::UnsupportedAddressingMode { .. }
                ),
                "{:?}",
                e
            ),
        }
    }
}

#[test]
fn test_stub_bytes_are_never_code() {
    let mut rng = XorShift(0xbeef);

    for _ in 0..500 {
        let stub_len = rng.below(40);
        let link = LOAD + 2 + stub_len as u16;
        let mut bytes = LOAD.to_le_bytes().to_vec();
        bytes.extend_from_slice(&link.to_le_bytes());
        bytes.extend((0..stub_len).map(|_| rng.byte()));
        bytes.extend_from_slice(&[0x00, 0x00, op("RTS", AddressMode::Implied)]);

        let prg = ProgramImage::parse(&bytes).unwrap();
        assert_eq!(prg.entry_address(), link + 2);
        assert_eq!(
            prg.summary(),
            TagSummary {
                unmarked: 0,
                address_header: 4,
                basic_stub: stub_len,
                code: 1,
                data: 0,
            }
        );
    }
}

#[test]
fn test_listing() {
    let program = [
        op("LDA", AddressMode::Immediate),
        0x00,
        op("STA", AddressMode::Absolute),
        0x20,
        0xd0,
        op("BNE", AddressMode::Relative),
        0xfb,
        op("RTS", AddressMode::Implied),
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    assert_eq!(
        Listing::new(&prg).to_string(),
        concat!(
            "0801: .word $080B\n",
            "0803: .basic $0A $00 $9E $32 $30 $36 $31 $00\t...2061.\n",
            "080B: .word $0000\n",
            "080D: LDA #$00\n",
            "080F: STA $D020\n",
            "0812: BNE #-5\n",
            "0814: RTS\n",
        )
    );
}

#[test]
fn test_listing_operands() {
    let program = [
        op("LDX", AddressMode::Immediate),
        0x10,
        op("LDA", AddressMode::Zeropage),
        0x02,
        op("LDA", AddressMode::ZeropageX),
        0x80,
        op("LDX", AddressMode::ZeropageY),
        0x81,
        op("LDA", AddressMode::Xindirect),
        0x20,
        op("STA", AddressMode::IndirectY),
        0xfb,
        op("LDA", AddressMode::AbsoluteX),
        0x00,
        0xc0,
        op("LDA", AddressMode::AbsoluteY),
        0x00,
        0xc0,
        op("BCC", AddressMode::Relative),
        0x00,
        op("JMP", AddressMode::Indirect),
        0x14,
        0x03,
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    let listing = Listing::new(&prg).to_string();
    let code: Vec<&str> = listing.lines().skip(3).collect();

    assert_eq!(
        code,
        [
            "080D: LDX #$10",
            "080F: LDA $02",
            "0811: LDA $80,X",
            "0813: LDX $81,Y",
            "0815: LDA ($20,X)",
            "0817: STA ($FB),Y",
            "0819: LDA $C000,X",
            "081C: LDA $C000,Y",
            "081F: BCC #0",
            "0821: JMP ($0314)",
        ]
    );
}

#[test]
fn test_listing_data() {
    let program = [
        op("LDA", AddressMode::Absolute),
        lo(0x0811),
        hi(0x0811),
        op("RTS", AddressMode::Implied),
        0x41,
        0x42,
    ];
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();

    let shifted = Listing::new(&prg).to_string();
    assert_eq!(
        shifted.lines().last(),
        Some("0811: .byte $41 $42                        \tab      ")
    );

    let unshifted = Listing::new(&prg).charset(Charset::Unshifted).to_string();
    assert_eq!(
        unshifted.lines().last(),
        Some("0811: .byte $41 $42                        \tAB      ")
    );
}

#[test]
fn test_listing_wraps_data() {
    let mut program = Vec::from([
        op("LDA", AddressMode::Absolute),
        lo(0x0811),
        hi(0x0811),
        op("RTS", AddressMode::Implied),
    ]);
    program.extend(0x30..0x3a);
    let prg = ProgramImage::parse(&prg_file(&program)).unwrap();
    let listing = Listing::new(&prg).to_string();
    let data: Vec<&str> = listing.lines().skip(5).collect();

    assert_eq!(
        data,
        [
            "0811: .byte $30 $31 $32 $33 $34 $35 $36 $37\t01234567",
            "0819: .byte $38 $39                        \t89      ",
        ]
    );
}
