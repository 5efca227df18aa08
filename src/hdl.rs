//! HDL dialects and signal descriptors.

use std::fmt;

use strum_macros::{EnumString, IntoStaticStr};

/// Target HDL text style.
///
/// VHDL bodies use concurrent signal assignments, Verilog bodies behavioral
/// blocks. The dialect only changes body text; port, parameter and wire
/// lists are dialect-independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
    Vhdl,
    Verilog,
}

/// A signal at the module boundary. Direction is implied by whether the port
/// appears in a generator's input or output list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub width: u64,
}

impl Port {
    pub fn new<N: Into<String>>(name: N, width: u64) -> Port {
        Port {
            name: name.into(),
            width,
        }
    }
}

/// A signal internal to the generated module body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    pub name: String,
    pub width: u64,
}

impl Wire {
    pub fn new<N: Into<String>>(name: N, width: u64) -> Wire {
        Wire {
            name: name.into(),
            width,
        }
    }
}

/// A compile-time module parameter. The synthetic id is negative,
/// distinguishing parameters from non-negative pin indices in the mapping
/// layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub id: i32,
}

impl Parameter {
    pub const fn new(name: &'static str, id: i32) -> Parameter {
        Parameter { name, id }
    }
}

/// Formats a declaration range for a `width`-bit signal, e.g. `[7:0]` for
/// Verilog or `(7 DOWNTO 0)` for VHDL.
pub fn range(dialect: Dialect, width: u64) -> String {
    match dialect {
        Dialect::Verilog => format!("[{}:0]", width - 1),
        Dialect::Vhdl => format!("({} DOWNTO 0)", width - 1),
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dialect::Vhdl => write!(f, "VHDL"),
            Dialect::Verilog => write!(f, "Verilog"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_names_parse() {
        assert_eq!("verilog".parse(), Ok(Dialect::Verilog));
        assert_eq!("vhdl".parse(), Ok(Dialect::Vhdl));
        assert!("systemc".parse::<Dialect>().is_err());
    }

    #[test]
    fn declaration_ranges() {
        assert_eq!(range(Dialect::Verilog, 8), "[7:0]");
        assert_eq!(range(Dialect::Vhdl, 4), "(3 DOWNTO 0)");
    }
}
