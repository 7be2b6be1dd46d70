//! Span helpers and event macros shared by the handlers.

use tracing::Span;

/// Create a span for authentication operations
///
/// # Example
/// ```ignore
/// let span = auth_span!("callback");
/// ```
#[macro_export]
macro_rules! auth_span {
    ($event:expr) => {
        tracing::info_span!(
            "auth",
            auth.event = $event,
            auth.success = tracing::field::Empty,
            user.id = tracing::field::Empty,
            user.role = tracing::field::Empty,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
}

/// Log a security-relevant event at WARN level
///
/// Use this for failed logins, state mismatches, and permission denials.
#[macro_export]
macro_rules! security_event {
    ($event:expr, $($field:tt)*) => {
        tracing::warn!(
            security.event = $event,
            $($field)*
        )
    };
}

/// Log an audit event at INFO level
///
/// Use this for role changes and sign-ins.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}

/// Record a successful operation on the current span
pub fn record_success() {
    Span::current().record("otel.status_code", "OK");
}

/// Record a failed operation on the current span with an error message
pub fn record_error(message: &str) {
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}

/// Record the signed-in user on the current span
pub fn record_user(user_id: &str, role: &str) {
    let span = Span::current();
    span.record("user.id", user_id);
    span.record("user.role", role);
}

pub fn record_auth_result(success: bool) {
    Span::current().record("auth.success", success);
}
