//! Interface to the surrounding netlist graph.
//!
//! The netlist itself (component discovery, wiring, design-rule checks) is
//! an external collaborator; the generators only ask it which net is wired
//! to a given pin index of a placed component. The pin-index-to-port-name
//! correspondence is part of each generator's contract and is kept in
//! constant tables next to the generator code.

use std::collections::BTreeMap;

use crate::attrs::AttributeSet;
use crate::hdl::Dialect;

/// The net, or inclusive sub-range of a bus net, wired to a pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetBinding {
    pub net: String,
    pub range: Option<(u64, u64)>,
}

impl NetBinding {
    pub fn net<N: Into<String>>(net: N) -> NetBinding {
        NetBinding {
            net: net.into(),
            range: None,
        }
    }

    pub fn slice<N: Into<String>>(net: N, hi: u64, lo: u64) -> NetBinding {
        NetBinding {
            net: net.into(),
            range: Some((hi, lo)),
        }
    }

    /// Renders the binding in the dialect's slice notation, most-significant
    /// bit first, both ends inclusive.
    pub fn render(&self, dialect: Dialect) -> String {
        match self.range {
            None => self.net.clone(),
            Some((hi, lo)) => match dialect {
                Dialect::Verilog => format!("{}[{}:{}]", self.net, hi, lo),
                Dialect::Vhdl => {
                    format!("{}({} DOWNTO {})", self.net, hi, lo)
                }
            },
        }
    }
}

/// A component placed in the surrounding design. This is the instance
/// context recognized by `port_bindings`; any other context yields an empty
/// binding map.
#[derive(Clone, Debug)]
pub struct PlacedComponent {
    pub id: usize,
    pub attrs: AttributeSet,
}

/// Supplies the net wired to a pin of a placed component. Queried once per
/// port per instance; results are never cached across instances.
pub trait Netlist {
    fn net_at(&self, component: &PlacedComponent, pin: usize) -> Option<NetBinding>;
}

/// Inserts the binding for one port, warning about unconnected pins.
pub fn map_net(
    map: &mut BTreeMap<String, NetBinding>,
    nets: &dyn Netlist,
    component: &PlacedComponent,
    name: &str,
    pin: usize,
) {
    match nets.net_at(component, pin) {
        Some(binding) => {
            map.insert(name.to_owned(), binding);
        }
        None => {
            log::warn!(
                "pin {} ({}) of component {} is not connected",
                pin,
                name,
                component.id
            );
        }
    }
}

/// Pin-indexed net table. The real collaborator sits in the surrounding
/// design tool; this implementation backs the tests.
#[derive(Default)]
pub struct IndexedNets {
    pins: Vec<NetBinding>,
}

impl IndexedNets {
    pub fn new(pins: Vec<NetBinding>) -> IndexedNets {
        IndexedNets { pins }
    }
}

impl Netlist for IndexedNets {
    fn net_at(&self, _component: &PlacedComponent, pin: usize) -> Option<NetBinding> {
        self.pins.get(pin).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_rendering() {
        let whole = NetBinding::net("s_bus_12");
        assert_eq!(whole.render(Dialect::Verilog), "s_bus_12");
        assert_eq!(whole.render(Dialect::Vhdl), "s_bus_12");

        let slice = NetBinding::slice("s_bus_12", 7, 4);
        assert_eq!(slice.render(Dialect::Verilog), "s_bus_12[7:4]");
        assert_eq!(slice.render(Dialect::Vhdl), "s_bus_12(7 DOWNTO 4)");
    }
}
