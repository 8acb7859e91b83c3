//! Readiness probing for the API server
//!
//! The server is ready when the database answers a ping.

use marketplace_db::{MarketDbGeneralModelOperations, db::MarketDb};
use serde::Serialize;

/// Readiness state of the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Ready,
    NotReady,
}

/// Outcome of a single dependency check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckStatus {
    fn healthy() -> Self {
        Self {
            status: "healthy",
            error: None,
        }
    }

    fn unhealthy(error: impl ToString) -> Self {
        Self {
            status: "unhealthy",
            error: Some(error.to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Checks the dependencies the API needs to serve requests
#[derive(Debug, Clone)]
pub struct ReadinessChecker {
    db: MarketDb,
}

impl ReadinessChecker {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }

    /// Pings the database
    pub async fn check_database(&self) -> CheckStatus {
        match self.db.conn().ping().await {
            Ok(()) => CheckStatus::healthy(),
            Err(e) => {
                tracing::error!(error = %e, "database readiness check failed");
                CheckStatus::unhealthy(e)
            }
        }
    }

    pub async fn get(&self) -> ReadinessState {
        if self.check_database().await.is_healthy() {
            ReadinessState::Ready
        } else {
            ReadinessState::NotReady
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_ready() -> anyhow::Result<()> {
        let checker = ReadinessChecker::new(MarketDb::new_in_memory().await?);

        assert_eq!(checker.get().await, ReadinessState::Ready);
        assert_eq!(checker.check_database().await, CheckStatus::healthy());
        Ok(())
    }

    #[test]
    fn test_unhealthy_check_serializes_error() -> anyhow::Result<()> {
        let json = serde_json::to_value(CheckStatus::unhealthy("connection refused"))?;

        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["error"], "connection refused");
        assert!(serde_json::to_value(CheckStatus::healthy())?.get("error").is_none());
        Ok(())
    }
}
