use httpsig::{
    key::{self, KeyFormat},
    Algorithm, Challenge, Keychain, Verifier, DEFAULT_HEADERS,
};
use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(ToString::to_string).collect()
}

fn default_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL.to_vec()
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyConfiguration {
    pub path: PathBuf,
    #[serde(default)]
    pub format: KeyFormat,
    pub passphrase: Option<String>,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub realm: String,
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
    #[serde(default)]
    pub ignore_headers: Vec<String>,
    pub max_age_secs: Option<u64>,
    pub authorized_keys: Option<PathBuf>,
    #[serde(default)]
    pub keys: Vec<KeyConfiguration>,
}

impl Configuration {
    pub fn load<P>(path: P) -> miette::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).into_diagnostic()
    }

    pub fn challenge(&self) -> Challenge {
        Challenge::new(
            self.realm.as_str(),
            &self.headers,
            self.algorithms.iter().copied(),
        )
    }

    pub fn ignore_headers(&self) -> Vec<&str> {
        self.ignore_headers.iter().map(String::as_str).collect()
    }

    /// Keychain of the configured private keys, in configuration order
    pub fn signer_keychain(&self) -> miette::Result<Keychain> {
        self.keys
            .iter()
            .map(|config| {
                key::load(&config.path, config.format, config.passphrase.as_deref())
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to load {}", config.path.display()))
            })
            .collect()
    }

    /// Verifier over the authorized keys followed by the configured private keys
    pub fn verifier(&self) -> miette::Result<Verifier> {
        let mut keychain = match self.authorized_keys {
            Some(ref path) => {
                let content = fs::read_to_string(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

                key::authorized_keys(&content).into_diagnostic()?
            }
            None => Keychain::new(),
        };
        keychain.extend(self.signer_keychain()?.iter().cloned());

        let verifier = Verifier::new(keychain);
        Ok(match self.max_age_secs {
            Some(secs) => verifier.with_max_age(Duration::from_secs(secs)),
            None => verifier,
        })
    }
}
