use std::path::PathBuf;

use argh::FromArgs;
use log::LevelFilter;

use crate::attrs::{FinderMode, ShiftMode};
use crate::hdl::Dialect;

/// HDL generator for combinational primitives.
#[derive(FromArgs)]
pub struct Opts {
    /// primitive identifier (BitAdder, BitFinder, Shifter, BITSELECTOR)
    #[argh(positional)]
    pub primitive: String,

    /// target dialect (verilog or vhdl)
    #[argh(option, short = 'd', default = "Dialect::Verilog")]
    pub dialect: Dialect,

    /// operand bit width
    #[argh(option, short = 'w', default = "8")]
    pub width: u64,

    /// number of operands (BitAdder)
    #[argh(option)]
    pub inputs: Option<u64>,

    /// group width (BITSELECTOR)
    #[argh(option)]
    pub group: Option<u64>,

    /// scan policy (BitFinder): low-one, high-one, low-zero, high-zero
    #[argh(option)]
    pub finder_mode: Option<FinderMode>,

    /// shift behavior (Shifter): logical-left, rotate-left, logical-right,
    /// arithmetic-right, rotate-right
    #[argh(option)]
    pub shift_mode: Option<ShiftMode>,

    /// output file
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}
