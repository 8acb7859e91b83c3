use async_graphql::Object;

#[derive(Default)]
pub struct SystemQuery;

#[Object]
impl SystemQuery {
    /// Liveness probe, always returns "ok"
    async fn health(&self) -> &'static str {
        "ok"
    }

    /// Version of the API server
    async fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
