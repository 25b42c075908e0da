//! Static disassembler for MOS 6510 PRG programs

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod insns;
mod listing;
mod petscii;
mod prg;
mod tests;

pub use crate::insns::*;
pub use crate::listing::*;
pub use crate::petscii::*;
pub use crate::prg::*;
