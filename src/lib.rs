//! Stateless HDL generation for a fixed catalog of combinational
//! primitives.
//!
//! Each generator in [`generators`] turns an immutable [`attrs::AttributeSet`]
//! into the per-instance artifacts an assembly driver needs: port, wire and
//! parameter lists, per-instance parameter values, port-to-net bindings
//! obtained from the netlist collaborator, and the module body text itself.
//! Generators hold no state; every request is derived fresh from the
//! attributes.

pub mod attrs;
pub mod generators;
pub mod hdl;
pub mod netlist;
pub mod opts;
pub mod utils;

pub use generators::HdlGenerator;
