use crate::{args::SignArgs, config::Configuration, util::error_kaomoji};
use httpsig::{Challenge, Signer};
use tracing::info;

pub fn do_it(args: SignArgs) -> miette::Result<()> {
    let config = Configuration::load(&args.request.config)?;
    let challenge = match args.challenge {
        Some(ref header) => {
            let Some(challenge) = Challenge::parse(header) else {
                miette::bail!("Malformed challenge header {}", error_kaomoji());
            };
            challenge
        }
        None => config.challenge(),
    };

    let mut signer = Signer::new(config.signer_keychain()?);
    signer.rotate_keys(&challenge)?;

    let content = args.request.content(&[], true)?;
    let authorization = signer.sign(&content)?;
    info!(key_id = authorization.key_id(), algorithm = %authorization.algorithm(), "signed request");

    if let Some(date) = content.header("date") {
        println!("Date: {date}");
    }
    println!("Authorization: {}", authorization.header_value());

    Ok(())
}
