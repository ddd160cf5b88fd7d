use gitfolio::error::{GitfolioError, Result};
use gitfolio::username::UsernameError;
use std::error::Error;

#[test]
fn test_error_display() {
    let error = GitfolioError::NotFound("User \"octocat\" not found".to_string());
    assert_eq!(format!("{}", error), "User \"octocat\" not found");

    let error = GitfolioError::FetchFailed("Failed to fetch repositories for \"octocat\"".to_string());
    assert_eq!(format!("{}", error), "Failed to fetch repositories for \"octocat\"");

    let error = GitfolioError::RateLimitExceeded("Rate limit hit".to_string());
    assert_eq!(format!("{}", error), "Rate limit exceeded: Rate limit hit");

    let error = GitfolioError::ApiError("API failed".to_string());
    assert_eq!(format!("{}", error), "GitHub API error: API failed");
}

#[test]
fn test_error_source() {
    let error = GitfolioError::NotFound("gone".to_string());
    assert!(error.source().is_none());

    let error: GitfolioError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert!(error.source().is_some());
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: GitfolioError = io_error.into();
    assert!(matches!(error, GitfolioError::IoError(_)));

    let url_error = url::Url::parse("::").unwrap_err();
    let error: GitfolioError = url_error.into();
    assert!(matches!(error, GitfolioError::InvalidUrl(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: GitfolioError = json_error.into();
    assert!(matches!(error, GitfolioError::JsonError(_)));
}

#[test]
fn test_is_not_found() {
    assert!(GitfolioError::NotFound("x".to_string()).is_not_found());
    assert!(!GitfolioError::FetchFailed("x".to_string()).is_not_found());
}

#[test]
fn test_username_error_messages() {
    assert_eq!(UsernameError::Empty.to_string(), "Please enter a GitHub username");
    assert_eq!(UsernameError::Invalid.to_string(), "Please enter a valid GitHub username");
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");

    fn returns_error() -> Result<String> {
        Err(GitfolioError::NotFound("Not found".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
}
