use crate::{args::VerifyArgs, config::Configuration, util};
use httpsig::Authorization;

pub fn do_it(args: VerifyArgs) -> miette::Result<()> {
    let config = Configuration::load(&args.request.config)?;
    let Some(authorization) = Authorization::parse(&args.authorization) else {
        miette::bail!("Malformed authorization header {}", util::error_kaomoji());
    };

    let verifier = config.verifier()?;
    let content = args.request.content(&config.ignore_headers(), false)?;
    let is_valid = verifier.verify(&config.challenge(), &content, Some(&authorization));

    if !is_valid {
        miette::bail!("{}", util::verdict(false));
    }

    println!("{}", util::verdict(true));

    Ok(())
}
