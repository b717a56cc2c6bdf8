use crate::prelude::ProviderError;

const PUBLIC_PREFIX: &str = "pk";
const SECRET_PREFIX: &str = "sk";

/// Shape check for Mapbox-style public tokens: `pk.<payload>.<signature>`.
///
/// This does not prove the token is valid with the provider, it only rejects
/// strings that can never be.
pub fn check_public_token(token: &str) -> Result<(), ProviderError> {
    let segments: Vec<&str> = token.split('.').collect();

    if segments.first() == Some(&SECRET_PREFIX) {
        return Err(ProviderError::RejectedToken(
            "secret tokens (sk.*) cannot be used here, use a public token (pk.*)".into(),
        ));
    }
    if segments.len() != 3 || segments[0] != PUBLIC_PREFIX {
        return Err(ProviderError::RejectedToken(
            "expected a public token of the form pk.<payload>.<signature>".into(),
        ));
    }
    if segments[1..].iter().any(|segment| !is_base64url(segment)) {
        return Err(ProviderError::RejectedToken(
            "token contains empty or invalid segments".into(),
        ));
    }
    Ok(())
}

fn is_base64url(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
