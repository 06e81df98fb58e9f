use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Status line for the outcome of a verification
pub fn verdict(is_valid: bool) -> String {
    if is_valid {
        format!("✅ Signature is valid! {}", success_kaomoji())
    } else {
        format!("❌ Signature didn't verify {}", error_kaomoji())
    }
}

/// Split a `Name: value` command line argument
pub fn parse_header(input: &str) -> Result<(String, String), String> {
    let (name, value) = input
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{input}`"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{input}`"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}
