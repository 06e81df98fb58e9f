use crate::args::FingerprintArgs;
use httpsig::key;
use miette::{Context, IntoDiagnostic};

pub fn do_it(args: FingerprintArgs) -> miette::Result<()> {
    let key = key::load(&args.path, args.format.into(), args.passphrase.as_deref())
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load {}", args.path.display()))?;

    let algorithms = key
        .algorithms()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    println!("{} ({})", key.id(), algorithms.join(", "));

    Ok(())
}
