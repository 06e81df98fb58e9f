use crate::{
    args::HeaderKind,
    util::{error_kaomoji, success_kaomoji},
};
use httpsig::{Authorization, Challenge};

pub fn do_it(header: &str, kind: HeaderKind) -> miette::Result<()> {
    match kind {
        HeaderKind::Authorization => {
            let Some(authorization) = Authorization::parse(header) else {
                miette::bail!("Malformed authorization header {}", error_kaomoji());
            };

            println!("key ID:    {}", authorization.key_id());
            println!("algorithm: {}", authorization.algorithm());
            println!("headers:   {}", authorization.headers().join(" "));
            println!("signature: {} bytes", authorization.signature().len());
        }
        HeaderKind::Challenge => {
            let Some(challenge) = Challenge::parse(header) else {
                miette::bail!("Malformed challenge header {}", error_kaomoji());
            };

            println!("realm:      {}", challenge.realm());
            println!("headers:    {}", challenge.headers().join(" "));
            let algorithms = challenge
                .algorithms()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            println!("algorithms: {}", algorithms.join(" "));
        }
    }

    println!("✅ Header is valid! {}", success_kaomoji());

    Ok(())
}
