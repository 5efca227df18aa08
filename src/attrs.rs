//! Per-instance component configuration.
//!
//! An [`AttributeSet`] is built once per placed component and read, never
//! mutated, by the generators. Attribute validity (widths and counts of at
//! least 1, modes from the closed per-primitive enumerations) is enforced at
//! construction, so a generator holding an `AttributeSet` can derive widths
//! without re-checking.

use strum_macros::{EnumString, IntoStaticStr};

use crate::utils::Diagnostic;

/// Scan policy of the priority bit finder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FinderMode {
    /// Lowest-order `1` bit.
    LowOne,
    /// Highest-order `1` bit.
    HighOne,
    /// Lowest-order `0` bit.
    LowZero,
    /// Highest-order `0` bit.
    HighZero,
}

impl FinderMode {
    /// Integer encoding consumed by the generated text. The values are fixed
    /// by the emitted comparison chain; `HighZero` is the fallthrough arm and
    /// keeps its historical encoding of 4.
    pub fn encode(self) -> u64 {
        match self {
            FinderMode::LowOne => 0,
            FinderMode::HighOne => 1,
            FinderMode::LowZero => 2,
            FinderMode::HighZero => 4,
        }
    }

    /// The bit value searched for.
    pub fn target(self) -> u64 {
        match self {
            FinderMode::LowOne | FinderMode::HighOne => 1,
            FinderMode::LowZero | FinderMode::HighZero => 0,
        }
    }
}

/// Shift or rotate behavior of the barrel shifter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ShiftMode {
    LogicalLeft,
    RotateLeft,
    LogicalRight,
    ArithmeticRight,
    RotateRight,
}

impl ShiftMode {
    /// Integer encoding consumed by the generated text; any value outside
    /// 0..=4 behaves as pass-through in the emitted mux.
    pub fn encode(self) -> u64 {
        match self {
            ShiftMode::LogicalLeft => 0,
            ShiftMode::RotateLeft => 1,
            ShiftMode::LogicalRight => 2,
            ShiftMode::ArithmeticRight => 3,
            ShiftMode::RotateRight => 4,
        }
    }
}

/// Immutable per-instance configuration read by the generators.
#[derive(Clone, Debug)]
pub struct AttributeSet {
    width: u64,
    inputs: Option<u64>,
    group: Option<u64>,
    finder_mode: Option<FinderMode>,
    shift_mode: Option<ShiftMode>,
}

fn invalid(what: &str) -> Diagnostic {
    Diagnostic::error()
        .with_message("invalid attribute")
        .with_note(format!("{} must be at least 1", what))
}

fn missing(what: &str) -> Diagnostic {
    Diagnostic::error()
        .with_message("invalid attribute")
        .with_note(format!("{} is not set for this component", what))
}

impl AttributeSet {
    pub fn new(width: u64) -> Result<AttributeSet, Diagnostic> {
        if width < 1 {
            return Err(invalid("bit width"));
        }

        Ok(AttributeSet {
            width,
            inputs: None,
            group: None,
            finder_mode: None,
            shift_mode: None,
        })
    }

    pub fn with_inputs(mut self, inputs: u64) -> Result<AttributeSet, Diagnostic> {
        if inputs < 1 {
            return Err(invalid("input count"));
        }

        self.inputs = Some(inputs);
        Ok(self)
    }

    pub fn with_group(mut self, group: u64) -> Result<AttributeSet, Diagnostic> {
        if group < 1 {
            return Err(invalid("group width"));
        }

        self.group = Some(group);
        Ok(self)
    }

    pub fn with_finder_mode(mut self, mode: FinderMode) -> AttributeSet {
        self.finder_mode = Some(mode);
        self
    }

    pub fn with_shift_mode(mut self, mode: ShiftMode) -> AttributeSet {
        self.shift_mode = Some(mode);
        self
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn inputs(&self) -> Result<u64, Diagnostic> {
        self.inputs.ok_or_else(|| missing("input count"))
    }

    pub fn group(&self) -> Result<u64, Diagnostic> {
        self.group.ok_or_else(|| missing("group width"))
    }

    pub fn finder_mode(&self) -> Result<FinderMode, Diagnostic> {
        self.finder_mode.ok_or_else(|| missing("finder mode"))
    }

    pub fn shift_mode(&self) -> Result<ShiftMode, Diagnostic> {
        self.shift_mode.ok_or_else(|| missing("shift mode"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_encodings() {
        assert_eq!(FinderMode::LowOne.encode(), 0);
        assert_eq!(FinderMode::HighOne.encode(), 1);
        assert_eq!(FinderMode::LowZero.encode(), 2);
        assert_eq!(FinderMode::HighZero.encode(), 4);

        assert_eq!(ShiftMode::LogicalLeft.encode(), 0);
        assert_eq!(ShiftMode::RotateLeft.encode(), 1);
        assert_eq!(ShiftMode::LogicalRight.encode(), 2);
        assert_eq!(ShiftMode::ArithmeticRight.encode(), 3);
        assert_eq!(ShiftMode::RotateRight.encode(), 4);
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("high-one".parse(), Ok(FinderMode::HighOne));
        assert_eq!("rotate-right".parse(), Ok(ShiftMode::RotateRight));
        assert!("sideways".parse::<ShiftMode>().is_err());
    }

    #[test]
    fn attribute_validation() {
        assert!(AttributeSet::new(0).is_err());
        assert!(AttributeSet::new(8).unwrap().with_inputs(0).is_err());
        assert!(AttributeSet::new(8).unwrap().with_group(0).is_err());

        let attrs = AttributeSet::new(8).unwrap();
        assert_eq!(attrs.width(), 8);
        assert!(attrs.inputs().is_err());
        assert!(attrs.finder_mode().is_err());

        let attrs = attrs.with_inputs(3).unwrap();
        assert_eq!(attrs.inputs().unwrap(), 3);
    }
}
