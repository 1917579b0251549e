use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid residue identifier '{0}'. Expected '<chain><number>[insertion code]' (e.g., 'A50')."
    )]
    InvalidResidueId(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// Validates a hotspot residue identifier such as `A50`, `B102A` or `A-3`.
pub fn parse_residue_id(s: &str) -> Result<String, ParseError> {
    let invalid = || ParseError::InvalidResidueId(s.to_string());

    let mut chars = s.chars();
    let chain = chars.next().ok_or_else(invalid)?;
    if !chain.is_ascii_alphabetic() {
        return Err(invalid());
    }

    let rest = chars.as_str();
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let number_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if number_len == 0 {
        return Err(invalid());
    }

    let insertion = &rest[number_len..];
    match insertion.len() {
        0 => Ok(s.to_string()),
        1 if insertion.chars().all(|c| c.is_ascii_alphabetic()) => Ok(s.to_string()),
        _ => Err(invalid()),
    }
}

/// Splits a `KEY=VALUE` override into its trimmed key and raw value.
pub fn parse_set_value(kv_pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = kv_pair
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(kv_pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: kv_pair.to_string(),
        });
    }
    Ok((key, value))
}
