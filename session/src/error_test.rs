use super::*;

#[test]
fn unauthorized_and_rejected_are_rejections() {
    let unauthorized = BackendError::Unauthorized { status: 401, message: "expired".to_owned() };
    let rejected = BackendError::Rejected { status: 422, message: "bad".to_owned() };
    assert!(unauthorized.is_rejection());
    assert!(rejected.is_rejection());
}

#[test]
fn transport_failures_are_not_rejections() {
    assert!(!BackendError::Timeout.is_rejection());
    assert!(!BackendError::Network("refused".to_owned()).is_rejection());
    assert!(!BackendError::Decode("eof".to_owned()).is_rejection());
    assert!(!BackendError::Server { status: 502, message: "bad gateway".to_owned() }.is_rejection());
}

#[test]
fn backend_message_only_for_status_errors() {
    let server = BackendError::Server { status: 500, message: "boom".to_owned() };
    assert_eq!(server.message(), Some("boom"));
    assert_eq!(BackendError::Timeout.message(), None);
}

#[test]
fn transport_errors_are_retryable() {
    assert!(SessionError::Transport(BackendError::Timeout).is_retryable());
    assert!(!SessionError::AuthFailure("nope".to_owned()).is_retryable());
    assert!(!SessionError::SessionInvalid("expired".to_owned()).is_retryable());
}

#[test]
fn auth_failure_user_message_is_the_cause() {
    let err = SessionError::AuthFailure("Invalid email or password".to_owned());
    assert_eq!(err.user_message(), "Invalid email or password");
}

#[test]
fn timeout_user_message_differs_from_network() {
    let timeout = SessionError::Transport(BackendError::Timeout).user_message();
    let network = SessionError::Transport(BackendError::Network("dns".to_owned())).user_message();
    assert_ne!(timeout, network);
    assert!(timeout.contains("too long"));
}

#[test]
fn storage_error_converts_into_session_error() {
    let err: SessionError = StorageError::Unavailable("no window".to_owned()).into();
    assert!(matches!(err, SessionError::Storage(_)));
    assert_eq!(err.to_string(), "session storage unavailable: no window");
}
