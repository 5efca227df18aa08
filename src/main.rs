use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use itertools::Itertools;

use hdlgen::attrs::AttributeSet;
use hdlgen::generators::{self, HdlGenerator};
use hdlgen::hdl::{range, Dialect};
use hdlgen::opts::Opts;
use hdlgen::utils::{Diagnostic, Reporter};

fn build_attrs(opts: &Opts) -> Result<AttributeSet, Diagnostic> {
    let mut attrs = AttributeSet::new(opts.width)?;

    if let Some(inputs) = opts.inputs {
        attrs = attrs.with_inputs(inputs)?;
    }
    if let Some(group) = opts.group {
        attrs = attrs.with_group(group)?;
    }
    if let Some(mode) = opts.finder_mode {
        attrs = attrs.with_finder_mode(mode);
    }
    if let Some(mode) = opts.shift_mode {
        attrs = attrs.with_shift_mode(mode);
    }

    Ok(attrs)
}

fn vhdl_type(width: u64) -> String {
    if width == 1 {
        "std_logic".to_owned()
    } else {
        format!("std_logic_vector({} DOWNTO 0)", width - 1)
    }
}

/// Assembles a complete module definition from the generator's artifacts.
/// This is driver-side glue; the library only produces the pieces.
fn write_module(
    out: &mut dyn Write,
    generator: &dyn HdlGenerator,
    dialect: Dialect,
    attrs: &AttributeSet,
) -> Result<(), Diagnostic> {
    let name = generator.identifier();
    let inputs = generator.inputs(attrs)?;
    let outputs = generator.outputs(attrs)?;
    let wires = generator.wires(attrs)?;
    let values = generator.parameter_values(attrs)?;
    let body = generator.body(dialect, attrs)?;

    match dialect {
        Dialect::Verilog => {
            let ports = inputs
                .iter()
                .map(|port| (port, "input"))
                .chain(outputs.iter().map(|port| (port, "output")))
                .map(|(port, direction)| {
                    if port.width == 1 {
                        format!("      {} {}", direction, port.name)
                    } else {
                        format!(
                            "      {} {} {}",
                            direction,
                            range(dialect, port.width),
                            port.name
                        )
                    }
                })
                .join(",\n");

            writeln!(out, "module {}(", name)?;
            writeln!(out, "{} );", ports)?;

            for parameter in generator.parameters(attrs) {
                writeln!(
                    out,
                    "   parameter {} = {};",
                    parameter.name, values[parameter.name]
                )?;
            }
            for wire in &wires {
                if wire.width == 1 {
                    writeln!(out, "   wire {};", wire.name)?;
                } else {
                    writeln!(
                        out,
                        "   wire {} {};",
                        range(dialect, wire.width),
                        wire.name
                    )?;
                }
            }

            for line in &body {
                writeln!(out, "{}", line)?;
            }
            writeln!(out, "endmodule")?;
        }
        Dialect::Vhdl => {
            writeln!(out, "ENTITY {} IS", name)?;

            let parameters = generator.parameters(attrs);
            if !parameters.is_empty() {
                let generics = parameters
                    .iter()
                    .map(|parameter| {
                        format!(
                            "{} : INTEGER := {}",
                            parameter.name, values[parameter.name]
                        )
                    })
                    .join(";\n             ");

                writeln!(out, "   GENERIC ( {} );", generics)?;
            }

            let ports = inputs
                .iter()
                .map(|port| (port, "IN "))
                .chain(outputs.iter().map(|port| (port, "OUT")))
                .map(|(port, direction)| {
                    format!("{} : {} {}", port.name, direction, vhdl_type(port.width))
                })
                .join(";\n          ");

            writeln!(out, "   PORT ( {} );", ports)?;
            writeln!(out, "END {};", name)?;
            writeln!(out)?;
            writeln!(out, "ARCHITECTURE rtl OF {} IS", name)?;
            for wire in &wires {
                writeln!(out, "   SIGNAL {} : {};", wire.name, vhdl_type(wire.width))?;
            }
            writeln!(out, "BEGIN")?;
            for line in &body {
                writeln!(out, "{}", line)?;
            }
            writeln!(out, "END rtl;")?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    let mut reporter = Reporter::new();

    let Some(generator) = generators::lookup(&opts.primitive) else {
        let known = generators::ALL
            .iter()
            .map(|generator| generator.identifier())
            .join(", ");

        reporter.emit(
            &Diagnostic::error()
                .with_message(format!("unknown primitive `{}`", opts.primitive))
                .with_note(format!("known primitives: {}", known)),
        );

        return ExitCode::FAILURE;
    };

    let attrs = match build_attrs(&opts) {
        Ok(attrs) => attrs,
        Err(err) => {
            reporter.emit(&err);

            return ExitCode::FAILURE;
        }
    };

    if !generator.supports_dialect(opts.dialect, &attrs) {
        reporter.emit(
            &Diagnostic::error().with_message(format!(
                "{} cannot be generated as {}",
                generator.identifier(),
                opts.dialect
            )),
        );

        return ExitCode::FAILURE;
    }

    let mut out: Box<dyn Write> = match &opts.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                reporter.emit(&Diagnostic::from(err));

                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdout()),
    };

    if let Err(err) = write_module(&mut out, generator, opts.dialect, &attrs) {
        reporter.emit(&err);

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
