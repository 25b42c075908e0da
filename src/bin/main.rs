use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use clap_num::maybe_hex;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CharsetArg {
    Shifted,
    Unshifted,
}

impl From<CharsetArg> for prg6510::Charset {
    fn from(value: CharsetArg) -> Self {
        match value {
            CharsetArg::Shifted => prg6510::Charset::Shifted,
            CharsetArg::Unshifted => prg6510::Charset::Unshifted,
        }
    }
}

/// Disassembles a C64 PRG file, telling code from data
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// PRG file to disassemble
    #[arg(required_unless_present = "opcodes")]
    file: Option<PathBuf>,

    /// Character set for the data glyphs
    #[arg(long, value_enum, default_value_t = CharsetArg::Shifted)]
    charset: CharsetArg,

    /// More code entry points, e.g. interrupt handlers
    #[arg(short, long, value_parser = maybe_hex::<u16>)]
    entry: Vec<u16>,

    /// Write the listing here instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the opcode table and exit
    #[arg(long)]
    opcodes: bool,
}

fn print_opcodes() {
    for insn in prg6510::opcode_table() {
        println!("{:02X}:\t{}", insn.opcode, insn);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.opcodes {
        print_opcodes();
        return Ok(());
    }
    let file = args.file.context("no PRG file given")?;

    let raw = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let prg = prg6510::ProgramImage::parse_with_entries(&raw, &args.entry)
        .with_context(|| format!("parsing {}", file.display()))?;

    let summary = prg.summary();
    log::info!(
        "{}: load ${:04X}, entry ${:04X}, {} code bytes, {} data bytes, {} stub bytes",
        file.display(),
        prg.load_address(),
        prg.entry_address(),
        summary.code,
        summary.data,
        summary.basic_stub
    );

    let listing = prg6510::Listing::new(&prg)
        .charset(args.charset.into())
        .to_string();
    match args.output {
        Some(path) => {
            fs::write(&path, listing).with_context(|| format!("writing {}", path.display()))?
        }
        None => std::io::stdout()
            .lock()
            .write_all(listing.as_bytes())
            .context("writing the listing")?,
    }

    Ok(())
}
