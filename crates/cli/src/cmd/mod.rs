pub mod eval;
pub mod render;
pub mod vars;

use std::fs;
use std::path::Path;

use calcdown_core::{Parameters, Values};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

pub(crate) fn load_parameters(path: &Path) -> Result<Parameters> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read parameter file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .wrap_err_with(|| format!("failed to parse parameter file {}", path.display()))
}

pub(crate) fn load_values(path: Option<&Path>) -> Result<Values> {
    let Some(path) = path else {
        return Ok(Values::new());
    };
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read values file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .wrap_err_with(|| format!("failed to parse values file {}", path.display()))
}
