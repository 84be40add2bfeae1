use std::fs;

use calcdown_core::extract_variables;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use crate::VarsArgs;
use crate::cmd::load_parameters;

pub fn run(args: &VarsArgs) -> Result<()> {
    let template = fs::read_to_string(&args.template)
        .wrap_err_with(|| format!("failed to read template {}", args.template.display()))?;
    let names = extract_variables(&template)?;

    let Some(params_path) = &args.params else {
        for name in &names {
            println!("{name}");
        }
        return Ok(());
    };

    let parameters = load_parameters(params_path)?;
    let mut undeclared = Vec::new();
    for name in &names {
        if parameters.contains_key(name) {
            println!("{name}");
        } else {
            println!("{name} (undeclared)");
            undeclared.push(name);
        }
    }

    // YAML stubs an author can paste to declare what is missing.
    if !undeclared.is_empty() {
        println!();
        println!("# declare missing parameters:");
        for name in undeclared {
            println!("{name}:");
            println!("  type: input");
            println!("  inputType: number");
            println!("  default: 0");
        }
    }

    Ok(())
}
