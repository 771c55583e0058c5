use super::*;

#[test]
fn test_remote_error_displays_message_verbatim() {
    let err = ProviderError::Remote {
        status: 401,
        message: "Invalid API Key".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid API Key");
    assert_eq!(err.status(), Some(401));
}

#[test]
fn test_network_error() {
    let err = ProviderError::Network("Connection refused".to_string());
    assert!(err.to_string().contains("Network error"));
    assert_eq!(err.status(), None);
}

#[test]
fn test_invalid_response() {
    let err = ProviderError::InvalidResponse("no choices".to_string());
    assert!(err.to_string().contains("Invalid response"));
    assert!(err.to_string().contains("no choices"));
}
