use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::dashboard::Dashboard;
use crate::data::features::{FeatureVector, Field, FieldKind};
use crate::error::Result;
use crate::utils::input::{get_input, parse_command, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Rerender,
    Help,
    Quit,
}

/// Interactive redraw loop: holds the current inputs and re-runs the whole
/// render pass after every accepted change.
pub struct Session<'a> {
    dashboard: &'a Dashboard,
    features: FeatureVector,
}

impl<'a> Session<'a> {
    pub fn new(dashboard: &'a Dashboard, initial: FeatureVector) -> Self {
        Session {
            dashboard,
            features: initial,
        }
    }

    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    pub fn apply(&mut self, command: Command) -> Step {
        match command {
            Command::Set(field, value) => {
                self.features.set(field, value);
                debug!(%field, requested = value, applied = self.features.get(field), "input changed");
                Step::Rerender
            }
            Command::Reset => {
                self.features = FeatureVector::default();
                Step::Rerender
            }
            Command::Show => Step::Rerender,
            Command::Help => Step::Help,
            Command::Quit => Step::Quit,
        }
    }

    /// Renders once, then reads commands until `quit` or end of input.
    ///
    /// A failed render is reported and the loop keeps going; terminal I/O
    /// errors end it.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> Result<()> {
        self.draw(writer)?;
        writeln!(writer, "Type `help` for commands.")?;

        while let Some(line) = get_input(reader, writer, "> ")? {
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(writer, "{e}")?;
                    continue;
                }
            };
            match self.apply(command) {
                Step::Rerender => self.draw(writer)?,
                Step::Help => self.help(writer)?,
                Step::Quit => break,
            }
        }
        Ok(())
    }

    fn draw<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self.dashboard.render(&self.features) {
            Ok(report) => write!(writer, "{report}")?,
            Err(e) => {
                warn!(error = %e, "render aborted");
                writeln!(writer, "Error: {e}")?;
            }
        }
        Ok(())
    }

    fn help<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Set a value with `<field>=<value>`, e.g. `rainfall=120`.")?;
        writeln!(writer, "Other commands: show, reset, help, quit.")?;
        for field in Field::ALL {
            let spec = field.spec();
            let value = self.features.get(field);
            match spec.kind {
                FieldKind::Integer => writeln!(
                    writer,
                    "  {:<12} {:<18} {:.0}..{:.0}  current {value:.0}",
                    spec.name, spec.label, spec.min, spec.max
                )?,
                FieldKind::Slider => writeln!(
                    writer,
                    "  {:<12} {:<18} {:.1}..{:.1}  current {value:.2}",
                    spec.name, spec.label, spec.min, spec.max
                )?,
            }
        }
        Ok(())
    }
}
