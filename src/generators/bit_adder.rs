//! Reduction adder: sums the population of every bit plane across N
//! operands, which is plain unsigned addition of the operands expressed in
//! the shape of a hardware summation tree.

use std::any::Any;
use std::collections::BTreeMap;

use super::{warn_unsupported, HdlGenerator};
use crate::attrs::AttributeSet;
use crate::hdl::{Dialect, Port};
use crate::netlist::{map_net, NetBinding, Netlist, PlacedComponent};
use crate::utils::bits::sum_width;
use crate::utils::Diagnostic;

/// Pin 0 is `Result`; pins 1..=N carry `In0..In<N-1>`.
const RESULT_PIN: usize = 0;
const FIRST_INPUT_PIN: usize = 1;

pub struct BitAdder;

impl HdlGenerator for BitAdder {
    fn identifier(&self) -> &'static str {
        "BitAdder"
    }

    fn subdirectory(&self) -> &'static str {
        "arithmetic"
    }

    fn supports_dialect(&self, dialect: Dialect, _attrs: &AttributeSet) -> bool {
        dialect == Dialect::Verilog
    }

    fn inputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        let width = attrs.width();

        Ok((0..attrs.inputs()?)
            .map(|i| Port::new(format!("In{}", i), width))
            .collect())
    }

    fn outputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        let width = sum_width(attrs.width(), attrs.inputs()?);

        Ok(vec![Port::new("Result", width)])
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
        let Ok(inputs) = component.attrs.inputs() else {
            log::warn!("BitAdder component {} has no input count", component.id);
            return map;
        };

        map_net(&mut map, nets, component, "Result", RESULT_PIN);
        for i in 0..inputs as usize {
            map_net(
                &mut map,
                nets,
                component,
                &format!("In{}", i),
                FIRST_INPUT_PIN + i,
            );
        }

        map
    }

    fn body(
        &self,
        dialect: Dialect,
        attrs: &AttributeSet,
    ) -> Result<Vec<String>, Diagnostic> {
        let width = attrs.width();
        let inputs = attrs.inputs()?;
        let output_bits = sum_width(width, inputs);

        let mut lines = Vec::new();

        if !self.supports_dialect(dialect, attrs) {
            warn_unsupported(self.identifier(), dialect);
            return Ok(lines);
        }

        lines.push(String::new());
        lines.push(format!("   reg [{}:0] temp;", output_bits - 1));
        lines.push("   integer i;".to_owned());
        lines.push(String::new());
        lines.push("   always @(*) begin".to_owned());
        lines.push("      temp = 0;".to_owned());
        lines.push(format!("      for (i = 0; i<{}; i = i + 1) begin", width));
        for i in 0..inputs {
            lines.push(format!("         temp = temp + In{}[i];", i));
        }
        lines.push("      end".to_owned());
        lines.push("   end".to_owned());
        lines.push("   assign Result = temp;".to_owned());

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::IndexedNets;

    fn attrs(width: u64, inputs: u64) -> AttributeSet {
        AttributeSet::new(width)
            .unwrap()
            .with_inputs(inputs)
            .unwrap()
    }

    #[test]
    fn port_lists() {
        let attrs = attrs(4, 3);

        let inputs = BitAdder.inputs(&attrs).unwrap();
        assert_eq!(
            inputs,
            vec![
                Port::new("In0", 4),
                Port::new("In1", 4),
                Port::new("In2", 4),
            ]
        );

        // Max sum 12 needs four bits.
        let outputs = BitAdder.outputs(&attrs).unwrap();
        assert_eq!(outputs, vec![Port::new("Result", 4)]);

        assert!(BitAdder.wires(&attrs).unwrap().is_empty());
        assert!(BitAdder.parameters(&attrs).is_empty());

        // Same attribute set, same ordered results.
        assert_eq!(inputs, BitAdder.inputs(&attrs).unwrap());
        assert_eq!(outputs, BitAdder.outputs(&attrs).unwrap());
    }

    #[test]
    fn missing_input_count_fails() {
        let attrs = AttributeSet::new(4).unwrap();

        assert!(BitAdder.inputs(&attrs).is_err());
        assert!(BitAdder.body(Dialect::Verilog, &attrs).is_err());
    }

    #[test]
    fn body_accumulates_every_operand() {
        let body = BitAdder.body(Dialect::Verilog, &attrs(4, 3)).unwrap();

        assert_eq!(body[1], "   reg [3:0] temp;");
        assert_eq!(body[6], "      for (i = 0; i<4; i = i + 1) begin");
        assert_eq!(body[7], "         temp = temp + In0[i];");
        assert_eq!(body[8], "         temp = temp + In1[i];");
        assert_eq!(body[9], "         temp = temp + In2[i];");
        assert_eq!(body.last().unwrap(), "   assign Result = temp;");
    }

    #[test]
    fn vhdl_is_unsupported() {
        let attrs = attrs(4, 3);

        assert!(!BitAdder.supports_dialect(Dialect::Vhdl, &attrs));
        assert!(BitAdder.body(Dialect::Vhdl, &attrs).unwrap().is_empty());
    }

    #[test]
    fn bindings_follow_the_pin_table() {
        let nets = IndexedNets::new(vec![
            NetBinding::net("s_net_0"),
            NetBinding::net("s_net_1"),
            NetBinding::slice("s_bus_2", 3, 0),
        ]);
        let component = PlacedComponent {
            id: 7,
            attrs: attrs(4, 2),
        };

        let map = BitAdder.port_bindings(&nets, &component);

        assert_eq!(map["Result"], NetBinding::net("s_net_0"));
        assert_eq!(map["In0"], NetBinding::net("s_net_1"));
        assert_eq!(map["In1"], NetBinding::slice("s_bus_2", 3, 0));
    }

    #[test]
    fn unrecognized_context_yields_no_bindings() {
        let nets = IndexedNets::new(vec![NetBinding::net("s_net_0")]);

        assert!(BitAdder.port_bindings(&nets, &"not a component").is_empty());
    }
}
