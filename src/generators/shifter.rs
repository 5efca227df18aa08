//! Barrel shifter: shifts or rotates a `width`-bit operand under one of
//! five modes, selected by the `ShifterMode` parameter.
//!
//! The VHDL body is a binary shift tree of `shift_amount_width(width)`
//! stages. Stage `k` shifts by exactly 0 or `2^k` positions and always
//! operates on stage `k - 1`'s result, so the stages compose into the full
//! amount. The bits shifted in per stage come from the mode: zero for
//! logical shifts, the sign bit for arithmetic right, the complement end of
//! the current intermediate for rotates. The Verilog body instead uses the
//! native shift operators, realizing rotates as one shift of the doubled
//! operand `{DataA, DataA}` followed by half-selection.

use std::any::Any;
use std::collections::BTreeMap;

use smallvec::{smallvec, SmallVec};

use super::HdlGenerator;
use crate::attrs::AttributeSet;
use crate::hdl::{Dialect, Parameter, Port, Wire};
use crate::netlist::{map_net, NetBinding, Netlist, PlacedComponent};
use crate::utils::bits::shift_amount_width;
use crate::utils::Diagnostic;

const MODE_PARAM: Parameter = Parameter::new("ShifterMode", -1);

const DATA_PIN: usize = 0;
const AMOUNT_PIN: usize = 1;
const RESULT_PIN: usize = 2;

pub struct Shifter;

impl Shifter {
    fn banner(dialect: Dialect) -> Vec<String> {
        match dialect {
            Dialect::Vhdl => vec![
                "   -----------------------------------------------------------------------------".to_owned(),
                "   --- ShifterMode represents when:                                          ---".to_owned(),
                "   --- 0 : Logical Shift Left                                                ---".to_owned(),
                "   --- 1 : Rotate Left                                                       ---".to_owned(),
                "   --- 2 : Logical Shift Right                                               ---".to_owned(),
                "   --- 3 : Arithmetic Shift Right                                            ---".to_owned(),
                "   --- 4 : Rotate Right                                                      ---".to_owned(),
                "   -----------------------------------------------------------------------------".to_owned(),
            ],
            Dialect::Verilog => vec![
                "   /***************************************************************************".to_owned(),
                "    ** ShifterMode represents when:                                          **".to_owned(),
                "    ** 0 : Logical Shift Left                                                **".to_owned(),
                "    ** 1 : Rotate Left                                                       **".to_owned(),
                "    ** 2 : Logical Shift Right                                               **".to_owned(),
                "    ** 3 : Arithmetic Shift Right                                            **".to_owned(),
                "    ** 4 : Rotate Right                                                      **".to_owned(),
                "    ***************************************************************************/".to_owned(),
            ],
        }
    }

    /// One stage of the VHDL shift tree. Stage `k` muxes on bit `k` of the
    /// shift amount between the previous stage's result and that result
    /// shifted by `2^k`, with the mode-dependent shift-in wired to the
    /// vacated end.
    fn vhdl_stage(lines: &mut Vec<String>, stage: u64, width: u64) {
        let amount = 1u64 << stage;

        lines.push(
            "   -----------------------------------------------------------------------------".to_owned(),
        );
        lines.push(format!(
            "   --- Here stage {} of the binary shift tree is defined                     ---",
            stage
        ));
        lines.push(
            "   -----------------------------------------------------------------------------".to_owned(),
        );
        lines.push(String::new());

        if stage == 0 {
            lines.push(format!(
                "   s_stage_0_shiftin <= DataA({}) WHEN ShifterMode = 1 OR ShifterMode = 3 ELSE",
                width - 1
            ));
            lines.push(
                "                        DataA(0) WHEN ShifterMode = 4 ELSE '0';".to_owned(),
            );
            lines.push(String::new());
            lines.push("   s_stage_0_result  <= DataA".to_owned());
            if width == 2 {
                lines.push("                           WHEN ShiftAmount = '0' ELSE".to_owned());
            } else {
                lines.push("                           WHEN ShiftAmount(0) = '0' ELSE".to_owned());
            }
            lines.push(format!(
                "                        DataA({} DOWNTO 0)&s_stage_0_shiftin",
                width - 2
            ));
            lines.push(
                "                           WHEN ShifterMode = 0 OR ShifterMode = 1 ELSE".to_owned(),
            );
            lines.push(format!(
                "                        s_stage_0_shiftin&DataA({} DOWNTO 1);",
                width - 1
            ));
            lines.push(String::new());
        } else {
            lines.push(format!(
                "   s_stage_{}_shiftin <= s_stage_{}_result( {} DOWNTO {} ) WHEN ShifterMode = 1 ELSE",
                stage,
                stage - 1,
                width - 1,
                width - amount
            ));
            lines.push(format!(
                "                        (OTHERS => s_stage_{}_result({})) WHEN ShifterMode = 3 ELSE",
                stage - 1,
                width - 1
            ));
            lines.push(format!(
                "                        s_stage_{}_result( {} DOWNTO 0 ) WHEN ShifterMode = 4 ELSE",
                stage - 1,
                amount - 1
            ));
            lines.push("                        (OTHERS => '0');".to_owned());
            lines.push(String::new());
            lines.push(format!(
                "   s_stage_{}_result  <= s_stage_{}_result",
                stage,
                stage - 1
            ));
            lines.push(format!(
                "                           WHEN ShiftAmount({}) = '0' ELSE",
                stage
            ));
            lines.push(format!(
                "                        s_stage_{}_result( {} DOWNTO 0 )&s_stage_{}_shiftin",
                stage - 1,
                width - amount - 1,
                stage
            ));
            lines.push(
                "                           WHEN ShifterMode = 0 OR ShifterMode = 1 ELSE".to_owned(),
            );
            lines.push(format!(
                "                        s_stage_{}_shiftin&s_stage_{}_result( {} DOWNTO {} );",
                stage,
                stage - 1,
                width - 1,
                amount
            ));
            lines.push(String::new());
        }
    }
}

impl HdlGenerator for Shifter {
    fn identifier(&self) -> &'static str {
        "Shifter"
    }

    fn subdirectory(&self) -> &'static str {
        "arithmetic"
    }

    fn supports_dialect(&self, _dialect: Dialect, _attrs: &AttributeSet) -> bool {
        true
    }

    fn inputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        let width = attrs.width();

        Ok(vec![
            Port::new("DataA", width),
            Port::new("ShiftAmount", shift_amount_width(width)),
        ])
    }

    fn outputs(&self, attrs: &AttributeSet) -> Result<Vec<Port>, Diagnostic> {
        Ok(vec![Port::new("Result", attrs.width())])
    }

    fn wires(&self, attrs: &AttributeSet) -> Result<Vec<Wire>, Diagnostic> {
        let width = attrs.width();
        let stages = shift_amount_width(width);

        Ok((0..stages)
            .flat_map(|stage| {
                [
                    Wire::new(format!("s_stage_{}_result", stage), width),
                    Wire::new(format!("s_stage_{}_shiftin", stage), 1 << stage),
                ]
            })
            .collect())
    }

    fn parameters(&self, _attrs: &AttributeSet) -> SmallVec<[Parameter; 1]> {
        smallvec![MODE_PARAM]
    }

    fn parameter_values(
        &self,
        attrs: &AttributeSet,
    ) -> Result<BTreeMap<&'static str, u64>, Diagnostic> {
        let mode = attrs.shift_mode()?;

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

        map_net(&mut map, nets, component, "DataA", DATA_PIN);
        map_net(&mut map, nets, component, "ShiftAmount", AMOUNT_PIN);
        map_net(&mut map, nets, component, "Result", RESULT_PIN);

        map
    }

    fn body(
        &self,
        dialect: Dialect,
        attrs: &AttributeSet,
    ) -> Result<Vec<String>, Diagnostic> {
        let width = attrs.width();
        attrs.shift_mode()?;

        let mut lines = Self::banner(dialect);

        match dialect {
            Dialect::Vhdl => {
                lines.push(String::new());
                lines.push(String::new());

                if width == 1 {
                    lines.push("   Result <= DataA WHEN ShifterMode = 1 OR".to_owned());
                    lines.push("                        ShifterMode = 3 OR".to_owned());
                    lines.push(
                        "                        ShifterMode = 4 ELSE DataA AND NOT(ShiftAmount);"
                            .to_owned(),
                    );
                } else {
                    let stages = shift_amount_width(width);

                    for stage in 0..stages {
                        Self::vhdl_stage(&mut lines, stage, width);
                    }

                    lines.push(
                        "   -----------------------------------------------------------------------------".to_owned(),
                    );
                    lines.push(
                        "   --- Here we assign the result                                             ---".to_owned(),
                    );
                    lines.push(
                        "   -----------------------------------------------------------------------------".to_owned(),
                    );
                    lines.push(String::new());
                    lines.push(format!("   Result <= s_stage_{}_result;", stages - 1));
                    lines.push(String::new());
                }
            }
            Dialect::Verilog => {
                lines.push(String::new());
                lines.push(String::new());
                lines.push(format!(
                    "   wire [{}:0] left_rotate = {{DataA, DataA}} << ShiftAmount;",
                    2 * width
                ));
                lines.push(format!(
                    "   wire [{}:0] right_rotate = {{DataA, DataA}} >> ShiftAmount;",
                    2 * width
                ));
                lines.push(String::new());
                lines.push(String::new());
                lines.push(
                    "   assign Result = (ShifterMode == 0) ? DataA << ShiftAmount :".to_owned(),
                );
                lines.push(format!(
                    "                   (ShifterMode == 1) ? left_rotate[{}:{}] :",
                    2 * width - 1,
                    width
                ));
                lines.push(
                    "                   (ShifterMode == 2) ? DataA >> ShiftAmount :".to_owned(),
                );
                lines.push(
                    "                   (ShifterMode == 3) ? DataA >>> ShiftAmount :".to_owned(),
                );
                lines.push(format!(
                    "                   (ShifterMode == 4) ? right_rotate[{}:0] : DataA;",
                    width - 1
                ));
            }
        }

        Ok(lines)
    }
}
