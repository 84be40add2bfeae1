use calcdown_core::Session;
use calcdown_formula::FormulaBackend;
use color_eyre::Result;

use crate::EvalArgs;
use crate::cmd::{load_parameters, load_values};
use crate::math::KatexMarkup;

pub fn run(args: &EvalArgs) -> Result<()> {
    let parameters = load_parameters(&args.params)?;
    let values = load_values(args.values.as_deref())?;

    let backend = FormulaBackend::new();
    let math = KatexMarkup;
    let session = Session::new(&parameters, &values, &math).with_backend(&backend);

    let rendered = session.evaluate(&args.name)?;
    println!("{rendered}");
    Ok(())
}
