use core::fmt::{self, Display};
use std::io::{self, Write};

use crate::measurement::Measurement;

/// Console report for one measurement, both lines in a single block.
pub struct Report<'a>(pub &'a Measurement);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ambient Light Luminance : {:.2} lux", self.0.luminance)?;
        writeln!(f, "Proximity of the Device : {:.2}", self.0.proximity)
    }
}

/// Placeholder lines for a failed read in monitor mode.
pub const ERROR_REPORT: &str =
    "Ambient Light Luminance : Error\nProximity of the Device : Error\n";

/// Renders both lines first, then writes them in one call.
pub fn emit<W: Write>(out: &mut W, measurement: &Measurement) -> io::Result<()> {
    let rendered = Report(measurement).to_string();
    out.write_all(rendered.as_bytes())?;
    out.flush()
}
