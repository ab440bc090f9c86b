//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Variable that was referenced without a default and is not set.
struct UnsetVar(String);

/// Expand environment variable references in `value`.
///
/// Only `${...}` spans are expanded. Any other `$`, such as `docs$v2.md`
/// in a URL, is copied through literally. An unterminated `${` is kept as
/// text. `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let (literal, tail) = rest.split_at(start);
        let (reference, tail) = tail.split_at(len + 1);
        expanded.push_str(literal);
        expanded.push_str(&expand_reference(reference, field)?);
        rest = tail;
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${VAR}` or `${VAR:-default}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}
