use crate::util;
use clap::{Args, Parser, Subcommand, ValueEnum};
use httpsig::{key::KeyFormat, RequestContent};
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, ValueEnum)]
pub enum HeaderKind {
    /// `Authorization` header sent by the client
    Authorization,

    /// `WWW-Authenticate` header sent by the server
    Challenge,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
pub enum KeyFileFormat {
    Pem,
    Ssh,
}

impl From<KeyFileFormat> for KeyFormat {
    fn from(value: KeyFileFormat) -> Self {
        match value {
            KeyFileFormat::Pem => Self::Pem,
            KeyFileFormat::Ssh => Self::Ssh,
        }
    }
}

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,

    /// Which header the value belongs to
    #[arg(
        default_value_t = HeaderKind::Authorization,
        long,
        short,
        value_enum,
    )]
    pub kind: HeaderKind,
}

#[derive(Args)]
pub struct FingerprintArgs {
    /// Private key file
    pub path: PathBuf,

    /// Encoding of the key file
    #[arg(default_value_t = KeyFileFormat::Ssh, long, short, value_enum)]
    pub format: KeyFileFormat,

    /// Passphrase of an encrypted OpenSSH key
    #[arg(long, short)]
    pub passphrase: Option<String>,
}

#[derive(Args)]
pub struct RequestArgs {
    /// Configuration file
    #[arg(long, short)]
    pub config: PathBuf,

    /// HTTP method
    #[arg(default_value = "GET", long, short)]
    pub method: String,

    /// Path and query of the request
    #[arg(default_value = "/", long)]
    pub path: String,

    /// Request header in the form `Name: value`, may be repeated
    #[arg(long = "header", short = 'H', value_parser = util::parse_header)]
    pub headers: Vec<(String, String)>,
}

#[derive(Args)]
pub struct SignArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Value of the `WWW-Authenticate` header to answer, defaults to the configured challenge
    #[arg(long)]
    pub challenge: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Value of the `Authorization` header
    #[arg(long, short)]
    pub authorization: String,
}

#[derive(Args)]
pub struct ChallengeArgs {
    /// Configuration file
    #[arg(long, short)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Print the configured challenge as a `WWW-Authenticate` header value
    Challenge(ChallengeArgs),

    /// Print the fingerprint used as the key ID
    Fingerprint(FingerprintArgs),

    /// Parse a signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Sign a request and print the `Authorization` header value
    Sign(SignArgs),

    /// Verify the signature of a request
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}

impl RequestArgs {
    /// Canonical content of the request described on the command line
    pub fn content(&self, ignore_headers: &[&str], add_date: bool) -> miette::Result<RequestContent> {
        let mut builder = RequestContent::builder();
        builder.request_target(self.method.as_str(), self.path.as_str());

        for (name, value) in &self.headers {
            if ignore_headers
                .iter()
                .any(|ignored| name.eq_ignore_ascii_case(ignored))
            {
                continue;
            }

            builder.header(name, value);
        }

        if add_date
            && !self
                .headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("date"))
        {
            builder.date_now();
        }

        builder.build().map_err(miette::Report::new)
    }
}
