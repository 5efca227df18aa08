//! Bit-group selector: picks one contiguous group of `group` bits out of
//! the input vector, addressed by `Sel`.
//!
//! The input is padded with zeros up to `2^select_bits` equal groups so the
//! case table is uniform; a select value addressing the padded region reads
//! zeros. The `default` arm returns the lowest-order group.

use std::any::Any;
use std::collections::BTreeMap;

use super::{warn_unsupported, HdlGenerator};
use crate::attrs::AttributeSet;
use crate::hdl::{Dialect, Port, Wire};
use crate::netlist::{map_net, NetBinding, Netlist, PlacedComponent};
use crate::utils::bits::{extended_width, select_width};
use crate::utils::Diagnostic;

const DATA_OUT_PIN: usize = 0;
const DATA_IN_PIN: usize = 1;
const SEL_PIN: usize = 2;

pub struct BitSelector;

impl HdlGenerator for BitSelector {
    fn identifier(&self) -> &'static str {
        "BITSELECTOR"
    }

    fn subdirectory(&self) -> &'static str {
        "plexers"
    }

    fn supports_dialect(&self, dialect: Dialect, _attrs: &AttributeSet) -> bool {
        dialect == Dialect::Verilog
    }

    fn inputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        let input_bits = attrs.width();
        let select_bits = select_width(input_bits, attrs.group()?);

        Ok(vec![
            Port::new("DataIn", input_bits),
            Port::new("Sel", select_bits),
        ])
    }

    fn outputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        Ok(vec![Port::new("DataOut", attrs.group()?)])
    }

    fn wires(&self, attrs: &AttributeSet) -> Result<Vec<Wire>, Diagnostic> {
        let group = attrs.group()?;
        let select_bits = select_width(attrs.width(), group);

        Ok(vec![Wire::new(
            "s_extended_vector",
            extended_width(select_bits, group),
        )])
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

        map_net(&mut map, nets, component, "DataIn", DATA_IN_PIN);
        map_net(&mut map, nets, component, "Sel", SEL_PIN);
        map_net(&mut map, nets, component, "DataOut", DATA_OUT_PIN);

        map
    }

    fn body(
        &self,
        dialect: Dialect,
        attrs: &AttributeSet,
    ) -> Result<Vec<String>, Diagnostic> {
        let input_bits = attrs.width();
        let group = attrs.group()?;
        let select_bits = select_width(input_bits, group);
        let extended_bits = extended_width(select_bits, group);

        let mut lines = Vec::new();

        if !self.supports_dialect(dialect, attrs) {
            warn_unsupported(self.identifier(), dialect);
            return Ok(lines);
        }

        if group > 1 {
            lines.push(format!("   reg[{}:0] temp;", group - 1));
            if extended_bits > input_bits {
                lines.push(format!(
                    "   assign s_extended_vector[{}:{}] = 0;",
                    extended_bits - 1,
                    input_bits
                ));
            }
            lines.push(format!(
                "   assign s_extended_vector[{}:0] = DataIn;",
                input_bits - 1
            ));
            lines.push("   always @(*) begin".to_owned());
            lines.push("      case (Sel)".to_owned());
            for i in 0..1 << select_bits {
                lines.push(format!(
                    "         {}'d{}: temp = s_extended_vector[{}:{}];",
                    select_bits,
                    i,
                    (i + 1) * group - 1,
                    i * group
                ));
            }
            lines.push(format!(
                "         default: temp = s_extended_vector[{}:0];",
                group - 1
            ));
            lines.push("      endcase".to_owned());
            lines.push("   end".to_owned());
            lines.push("   assign DataOut = temp;".to_owned());
        } else {
            lines.push("   reg temp;".to_owned());
            lines.push("   always @(*) begin".to_owned());
            lines.push("      case (Sel)".to_owned());
            for i in 0..1 << select_bits {
                lines.push(format!(
                    "         {}'d{}: temp = DataIn[{}];",
                    select_bits, i, i
                ));
            }
            lines.push("         default: temp = DataIn[0];".to_owned());
            lines.push("      endcase".to_owned());
            lines.push("   end".to_owned());
            lines.push("   assign DataOut = temp;".to_owned());
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::IndexedNets;

    fn attrs(input_bits: u64, group: u64) -> AttributeSet {
        AttributeSet::new(input_bits)
            .unwrap()
            .with_group(group)
            .unwrap()
    }

    /// Evaluates the emitted case table on a concrete input: the extended
    /// vector is the input zero-padded to `2^select_bits` groups.
    fn model(input_bits: u64, group: u64, data: u64, sel: u64) -> u64 {
        let select_bits = select_width(input_bits, group);
        let extended = data & ((1u64 << input_bits) - 1);

        if sel < (1 << select_bits) {
            (extended >> (sel * group)) & ((1u64 << group) - 1)
        } else {
            extended & ((1u64 << group) - 1)
        }
    }

    #[test]
    fn port_and_wire_lists() {
        // Ten bits in groups of four: three real groups, two select bits,
        // sixteen extended bits.
        let attrs = attrs(10, 4);

        assert_eq!(
            BitSelector.inputs(&attrs).unwrap(),
            vec![Port::new("DataIn", 10), Port::new("Sel", 2)]
        );
        assert_eq!(
            BitSelector.outputs(&attrs).unwrap(),
            vec![Port::new("DataOut", 4)]
        );
        assert_eq!(
            BitSelector.wires(&attrs).unwrap(),
            vec![Wire::new("s_extended_vector", 16)]
        );
        assert!(BitSelector.parameters(&attrs).is_empty());
    }

    #[test]
    fn padded_region_reads_zero() {
        // Selecting index 3 of a 10-bit input in groups of 4 lands entirely
        // in the padding.
        assert_eq!(model(10, 4, 0x3ff, 3), 0);
        assert_eq!(model(10, 4, 0x2ab, 0), 0xb);
        assert_eq!(model(10, 4, 0x2ab, 2), 0x2);
    }

    #[test]
    fn body_cases_slice_the_extended_vector() {
        let body = BitSelector.body(Dialect::Verilog, &attrs(10, 4)).unwrap();

        assert_eq!(body[0], "   reg[3:0] temp;");
        assert_eq!(body[1], "   assign s_extended_vector[15:10] = 0;");
        assert_eq!(body[2], "   assign s_extended_vector[9:0] = DataIn;");
        assert!(body.contains(
            &"         2'd0: temp = s_extended_vector[3:0];".to_owned()
        ));
        assert!(body.contains(
            &"         2'd3: temp = s_extended_vector[15:12];".to_owned()
        ));
        assert!(body.contains(
            &"         default: temp = s_extended_vector[3:0];".to_owned()
        ));
    }

    #[test]
    fn exact_fit_has_no_padding_assign() {
        // Eight bits in groups of four fill both groups exactly.
        let body = BitSelector.body(Dialect::Verilog, &attrs(8, 4)).unwrap();

        assert_eq!(body[0], "   reg[3:0] temp;");
        assert_eq!(body[1], "   assign s_extended_vector[7:0] = DataIn;");
    }

    #[test]
    fn single_bit_groups_index_the_input_directly() {
        let body = BitSelector.body(Dialect::Verilog, &attrs(8, 1)).unwrap();

        assert_eq!(body[0], "   reg temp;");
        assert!(body.contains(&"         3'd5: temp = DataIn[5];".to_owned()));
        assert!(body.contains(&"         default: temp = DataIn[0];".to_owned()));
    }

    #[test]
    fn vhdl_is_unsupported() {
        let attrs = attrs(10, 4);

        assert!(!BitSelector.supports_dialect(Dialect::Vhdl, &attrs));
        assert!(BitSelector.body(Dialect::Vhdl, &attrs).unwrap().is_empty());
    }

    #[test]
    fn bindings_follow_the_pin_table() {
        let nets = IndexedNets::new(vec![
            NetBinding::net("s_out"),
            NetBinding::slice("s_bus", 9, 0),
            NetBinding::net("s_sel"),
        ]);
        let component = PlacedComponent {
            id: 1,
            attrs: attrs(10, 4),
        };

        let map = BitSelector.port_bindings(&nets, &component);

        assert_eq!(map["DataOut"], NetBinding::net("s_out"));
        assert_eq!(map["DataIn"], NetBinding::slice("s_bus", 9, 0));
        assert_eq!(map["Sel"], NetBinding::net("s_sel"));
    }
}
