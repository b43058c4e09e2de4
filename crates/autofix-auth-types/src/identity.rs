//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use autofix_domain::position::Position;

/// Authenticated employee identity injected by the presentation layer via
/// `x-employee-id` and `x-employee-position` headers.
///
/// Returns 401 if either header is absent or malformed. Authorization
/// (which position may do what) is enforced by the usecases after
/// extraction.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeIdentity {
    pub employee_id: i32,
    pub position: Position,
}

impl<S> FromRequestParts<S> for EmployeeIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let employee_id = parts
            .headers
            .get("x-employee-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i32>().ok());

        let position = parts
            .headers
            .get("x-employee-position")
            .and_then(|v| v.to_str().ok())
            .and_then(Position::from_code);

        async move {
            let employee_id = employee_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let position = position.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                employee_id,
                position,
            })
        }
    }
}
