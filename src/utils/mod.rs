pub mod bits;
pub mod diagnostics;

pub use diagnostics::{Diagnostic, Reporter};
