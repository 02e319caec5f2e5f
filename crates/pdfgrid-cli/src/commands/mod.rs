pub mod attendance;
pub mod convert;
pub mod preview;
pub mod roster;

use pdfgrid_core::config::{self, GridOptions};
use pdfgrid_core::error::GridError;

use crate::GridArgs;

pub const DEFAULT_STORE: &str = ".pdfgrid";

/// Options from the config file (or defaults), overridden by flags.
pub fn resolve_options(args: &GridArgs) -> Result<GridOptions, GridError> {
    let mut options = match &args.config {
        Some(path) => config::load_options(path)?,
        None => GridOptions::default(),
    };
    if let Some(t) = args.column_threshold {
        options.column_threshold = t;
    }
    if let Some(t) = args.row_threshold {
        options.row_threshold = t;
    }
    if let Some(ref name) = args.sheet {
        options.sheet_name = name.clone();
    }
    config::validate_options(&options)?;
    Ok(options)
}
