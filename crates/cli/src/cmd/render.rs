use std::fs;

use calcdown_core::Session;
use calcdown_formula::FormulaBackend;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::debug;

use crate::RenderArgs;
use crate::cmd::{load_parameters, load_values};
use crate::math::KatexMarkup;

pub fn run(args: &RenderArgs) -> Result<()> {
    let template = fs::read_to_string(&args.template)
        .wrap_err_with(|| format!("failed to read template {}", args.template.display()))?;
    let parameters = load_parameters(&args.params)?;
    let values = load_values(args.values.as_deref())?;

    debug!(parameters = parameters.len(), values = values.len(), "rendering template");

    let backend = FormulaBackend::new();
    let math = KatexMarkup;
    let session = Session::new(&parameters, &values, &math).with_backend(&backend);
    let html = session.render_template(&template)?;

    match &args.output {
        Some(path) => fs::write(path, html)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{html}"),
    }
    Ok(())
}
