//! PETSCII display glyphs
//!
//! Only used to show data bytes next to their hex dump. Codes without
//! a printable glyph map to `'\0'` in the tables.

/// Character set the screen is switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Power-on set, uppercase letters and graphics
    Unshifted,
    /// "Business mode" with lowercase and uppercase letters
    #[default]
    Shifted,
}

/// Shown for the codes with no glyph.
pub const NON_PRINTABLE: char = '.';

const fn unshifted() -> [char; 256] {
    let mut t = ['\0'; 256];
    let mut c = 0x20;
    while c < 0x60 {
        t[c] = c as u8 as char;
        c += 1;
    }
    t[0x5c] = '£';
    t[0x5e] = '\u{2191}';
    t[0x5f] = '\u{2190}';
    t
}

const fn shifted() -> [char; 256] {
    let mut t = unshifted();
    let mut c = 0x41;
    while c <= 0x5a {
        t[c] = (c as u8 + 0x20) as char;
        // Uppercase moved up to 0x61..=0x7a
        t[c + 0x20] = c as u8 as char;
        c += 1;
    }
    t[0x60] = '\u{2500}';

    // 0xc0..=0xdf repeat 0x60..=0x7f
    let mut c = 0x60;
    while c < 0x80 {
        t[c + 0x60] = t[c];
        c += 1;
    }
    t
}

static UNSHIFTED: [char; 256] = unshifted();
static SHIFTED: [char; 256] = shifted();

impl Charset {
    pub fn table(&self) -> &'static [char; 256] {
        match self {
            Charset::Unshifted => &UNSHIFTED,
            Charset::Shifted => &SHIFTED,
        }
    }

    /// Glyph for the code, or [`NON_PRINTABLE`].
    pub fn glyph(&self, code: u8) -> char {
        match self.table()[code as usize] {
            '\0' => NON_PRINTABLE,
            c => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unshifted_is_uppercase() {
        let cs = Charset::Unshifted;
        assert_eq!(cs.glyph(0x41), 'A');
        assert_eq!(cs.glyph(0x5a), 'Z');
        assert_eq!(cs.glyph(0x20), ' ');
        assert_eq!(cs.glyph(0x5c), '£');
        assert_eq!(cs.glyph(0x5e), '↑');
        assert_eq!(cs.glyph(0x61), '.');
        assert_eq!(cs.glyph(0x00), '.');
        assert_eq!(cs.glyph(0xc1), '.');
    }

    #[test]
    fn shifted_has_both_cases() {
        let cs = Charset::default();
        assert_eq!(cs, Charset::Shifted);
        assert_eq!(cs.glyph(0x41), 'a');
        assert_eq!(cs.glyph(0x5a), 'z');
        assert_eq!(cs.glyph(0x61), 'A');
        assert_eq!(cs.glyph(0x7a), 'Z');
        assert_eq!(cs.glyph(0x60), '─');
        assert_eq!(cs.glyph(0x7b), '.');
        assert_eq!(cs.glyph(0xc1), 'A');
        assert_eq!(cs.glyph(0xd0), 'P');
        assert_eq!(cs.glyph(0x31), '1');
        assert_eq!(cs.glyph(0x9e), '.');
    }
}
