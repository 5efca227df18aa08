//! Priority bit finder: reports the index of the first bit matching a
//! target value under one of four scan policies, plus a `Present` flag.
//!
//! The emitted sweep assigns on every match rather than stopping at the
//! first one; the sweep direction is chosen per mode so that the last
//! assignment to execute is the intended first match. The "low" modes sweep
//! high to low, the "high" modes low to high.

use std::any::Any;
use std::collections::BTreeMap;

use smallvec::{smallvec, SmallVec};

use super::{warn_unsupported, HdlGenerator};
use crate::attrs::AttributeSet;
use crate::hdl::{Dialect, Parameter, Port};
use crate::netlist::{map_net, NetBinding, Netlist, PlacedComponent};
use crate::utils::bits::index_width;
use crate::utils::Diagnostic;

const MODE_PARAM: Parameter = Parameter::new("BitFinderMode", -1);

const PRESENT_PIN: usize = 0;
const RESULT_PIN: usize = 1;
const DATA_PIN: usize = 2;

pub struct BitFinder;

impl BitFinder {
    fn sweep(lines: &mut Vec<String>, width: u64, target: u64, descending: bool) {
        let positions: Vec<u64> = if descending {
            (0..width).rev().collect()
        } else {
            (0..width).collect()
        };

        for i in positions {
            lines.push(format!(
                "         temp = DataA[{}] == {} ? {} : temp;",
                i, target, i
            ));
        }
    }
}

impl HdlGenerator for BitFinder {
    fn identifier(&self) -> &'static str {
        "BitFinder"
    }

    fn subdirectory(&self) -> &'static str {
        "arithmetic"
    }

    fn supports_dialect(&self, dialect: Dialect, _attrs: &AttributeSet) -> bool {
        dialect == Dialect::Verilog
    }

    fn inputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        Ok(vec![Port::new("DataA", attrs.width())])
    }

    fn outputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        Ok(vec![
            Port::new("Result", index_width(attrs.width())),
            Port::new("Present", 1),
        ])
    }

    fn parameters(&self, _attrs: &AttributeSet) -> SmallVec<[Parameter; 1]> {
        smallvec![MODE_PARAM]
    }

    fn parameter_values(
        &self,
        attrs: &AttributeSet,
    ) -> Result<BTreeMap<&'static str, u64>, Diagnostic> {
        let mode = attrs.finder_mode()?;

        Ok(BTreeMap::from([(MODE_PARAM.name, mode.encode())]))
    }

    fn port_bindings(
        &self,
        nets: &dyn Netlist,
        ctx: &dyn Any,
    ) -> BTreeMap<String, NetBinding> {
        let mut map = BTreeMap::new();

        let Some(component) = ctx.downcast_ref::<PlacedComponent>() else {
            return map;
        };

        map_net(&mut map, nets, component, "Present", PRESENT_PIN);
        map_net(&mut map, nets, component, "Result", RESULT_PIN);
        map_net(&mut map, nets, component, "DataA", DATA_PIN);

        map
    }

    fn body(
        &self,
        dialect: Dialect,
        attrs: &AttributeSet,
    ) -> Result<Vec<String>, Diagnostic> {
        let width = attrs.width();
        let output_bits = index_width(width);
        attrs.finder_mode()?;

        let mut lines = Vec::new();

        if !self.supports_dialect(dialect, attrs) {
            warn_unsupported(self.identifier(), dialect);
            return Ok(lines);
        }

        lines.push(String::new());
        lines.push(String::new());
        lines.push(format!("   reg [{}:0] temp;", output_bits - 1));
        lines.push(String::new());
        lines.push("   always @(*) begin".to_owned());
        lines.push("      temp = 0;".to_owned());
        lines.push("      if (BitFinderMode == 0) begin".to_owned());
        Self::sweep(&mut lines, width, 1, true);
        lines.push("      end".to_owned());
        lines.push("      else if (BitFinderMode == 1) begin".to_owned());
        Self::sweep(&mut lines, width, 1, false);
        lines.push("      end".to_owned());
        lines.push("      else if (BitFinderMode == 2) begin".to_owned());
        Self::sweep(&mut lines, width, 0, true);
        lines.push("      end".to_owned());
        lines.push("      else begin".to_owned());
        Self::sweep(&mut lines, width, 0, false);
        lines.push("      end".to_owned());
        lines.push("   end".to_owned());
        lines.push(
            "   assign Present = (BitFinderMode < 2) ? |DataA : |(~DataA);"
                .to_owned(),
        );
        lines.push("   assign Result = temp;".to_owned());

        Ok(lines)
    }
}
