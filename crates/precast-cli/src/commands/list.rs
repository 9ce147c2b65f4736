//! Implementation of the `precast list` command.

use precast_core::domain::{Axis, catalog};

use crate::{cli::ListArgs, error::CliResult, output::OutputManager};

/// Execute the `precast list` command: print the stack catalog, optionally
/// restricted to one axis.
pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let axes: Vec<Axis> = match args.axis {
        Some(axis) => vec![axis.into()],
        None => Axis::ALL.to_vec(),
    };

    for axis in axes {
        output.header(&format!("{axis}"))?;
        for option in catalog::options(axis) {
            let default_marker = if option.id == catalog::default_id(axis) {
                " (default)"
            } else {
                ""
            };
            output.print(&format!(
                "  {:<18} {}{}",
                option.id, option.description, default_marker
            ))?;
        }
        output.print("")?;
    }

    Ok(())
}
