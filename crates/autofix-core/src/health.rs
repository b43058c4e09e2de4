use axum::http::StatusCode;

/// `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz`: ready to take traffic. Services with external
/// dependencies mount their own handler instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probes_return_200() {
        assert_eq!(healthz().await, StatusCode::OK);
        assert_eq!(readyz().await, StatusCode::OK);
    }
}
