use crate::config::DEFAULT_AUDIT_LOG_CAPACITY;
use crate::core::errors::AccountsError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Bounded audit trail; the oldest entries are evicted once `capacity` is reached.
#[derive(Clone)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<VecDeque<AppLog>>>,
    capacity: usize,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), AccountsError> {
        let details = serde_json::from_value(details)
            .map_err(|e| AccountsError::LoggingError(format!("Failed to serialize log details: {}", e)))?;
        let mut logs = self.logs.write().await;
        while logs.len() >= self.capacity {
            logs.pop_front();
        }
        logs.push_back(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            user_id: user_id.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, AccountsError> {
        let logs = self.logs.read().await;
        Ok(logs.iter().cloned().collect())
    }
}
