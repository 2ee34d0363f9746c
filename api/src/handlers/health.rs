// Liveness endpoint

/// Handler for GET /health - answers as long as the server is accepting requests
pub async fn health_check() -> &'static str {
    "OK"
}
