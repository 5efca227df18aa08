//! The generator contract and the primitive catalog.
//!
//! Each primitive is a zero-sized, stateless value implementing
//! [`HdlGenerator`]; all artifacts are derived fresh from the attribute set
//! on every call, so a single generator serves any number of placed
//! components, concurrently if the driver wishes.

mod bit_adder;
mod bit_finder;
mod bit_selector;
mod shifter;

pub use bit_adder::BitAdder;
pub use bit_finder::BitFinder;
pub use bit_selector::BitSelector;
pub use shifter::Shifter;

use std::any::Any;
use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::attrs::AttributeSet;
use crate::hdl::{Dialect, Parameter, Port, Wire};
use crate::netlist::{NetBinding, Netlist};
use crate::utils::Diagnostic;

/// Translates one primitive configuration into HDL text and the metadata
/// binding that text into the surrounding netlist.
pub trait HdlGenerator: Sync {
    /// Stable name used for module naming and registry lookup.
    fn identifier(&self) -> &'static str;

    /// Logical grouping for generated files; not semantically load-bearing.
    fn subdirectory(&self) -> &'static str;

    /// Whether this generator can emit valid text for the dialect under the
    /// given attributes. Callers check this before requesting a body.
    fn supports_dialect(&self, dialect: Dialect, attrs: &AttributeSet) -> bool;

    fn inputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic>;

    fn outputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic>;

    fn wires(&self, _attrs: &AttributeSet) -> Result<Vec<Wire>, Diagnostic> {
        Ok(Vec::new())
    }

    /// Parameter names and synthetic ids; values are per-instance.
    fn parameters(&self, _attrs: &AttributeSet) -> SmallVec<[Parameter; 1]> {
        SmallVec::new()
    }

    /// Concrete parameter values for one placed instance.
    fn parameter_values(
        &self,
        _attrs: &AttributeSet,
    ) -> Result<BTreeMap<&'static str, u64>, Diagnostic> {
        Ok(BTreeMap::new())
    }

    /// Binds port names to nets by pin index. The context is type-erased;
    /// anything other than a [`PlacedComponent`](crate::netlist::PlacedComponent)
    /// yields an empty map.
    fn port_bindings(
        &self,
        nets: &dyn Netlist,
        ctx: &dyn Any,
    ) -> BTreeMap<String, NetBinding>;

    /// The module body, one line per element. An unsupported dialect yields
    /// an empty body after a warning to the log sink.
    fn body(
        &self,
        dialect: Dialect,
        attrs: &AttributeSet,
    ) -> Result<Vec<String>, Diagnostic>;
}

/// The fixed primitive catalog.
pub static ALL: [&dyn HdlGenerator; 4] =
    [&BitAdder, &BitFinder, &Shifter, &BitSelector];

/// Looks up a generator by its stable identifier.
pub fn lookup(identifier: &str) -> Option<&'static dyn HdlGenerator> {
    ALL.iter()
        .copied()
        .find(|generator| generator.identifier() == identifier)
}

/// Warns that a body was requested for a dialect the generator does not
/// support. The emitted body is empty in that case.
fn warn_unsupported(identifier: &str, dialect: Dialect) {
    log::warn!("{} does not support {} output", identifier, dialect);
}
