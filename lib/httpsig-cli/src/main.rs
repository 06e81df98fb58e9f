use self::{
    args::{ToolArgs, ToolSubcommand},
    config::Configuration,
};
use clap::Parser;
use miette::IntoDiagnostic;
use std::env;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    Layer, Registry,
};

mod args;
mod config;
mod fingerprint;
mod parse_header;
mod sign;
mod util;
mod verify;

fn initialise_logging() -> miette::Result<()> {
    let env_filter = env::var("RUST_LOG")
        .into_diagnostic()
        .and_then(|targets| targets.parse().into_diagnostic())
        .unwrap_or_else(|_| Targets::default().with_default(LevelFilter::INFO));

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber).into_diagnostic()
}

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    initialise_logging()?;

    let args = ToolArgs::parse();
    match args.subcommand {
        ToolSubcommand::Challenge(args) => {
            let config = Configuration::load(&args.config)?;
            println!("WWW-Authenticate: {}", config.challenge().header_value());
            Ok(())
        }
        ToolSubcommand::Fingerprint(args) => fingerprint::do_it(args),
        ToolSubcommand::ParseHeader(args) => parse_header::do_it(&args.header, args.kind),
        ToolSubcommand::Sign(args) => sign::do_it(args),
        ToolSubcommand::Verify(args) => verify::do_it(args),
    }
}
