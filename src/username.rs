use thiserror::Error;

const MAX_USERNAME_LEN: usize = 39;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Please enter a GitHub username")]
    Empty,

    #[error("Please enter a valid GitHub username")]
    Invalid,
}

/// Check a submitted handle against GitHub's username grammar and return it
/// trimmed: 1-39 ASCII letters, digits or single hyphens, never starting or
/// ending with a hyphen.
pub fn validate_username(input: &str) -> Result<&str, UsernameError> {
    let username = input.trim();
    if username.is_empty() {
        return Err(UsernameError::Empty);
    }

    let well_formed = username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--");

    if well_formed {
        Ok(username)
    } else {
        Err(UsernameError::Invalid)
    }
}
