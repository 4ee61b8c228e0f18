use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interview track (e.g., "Data Scientist"); fixed for the session
    pub role: String,

    /// Session id sent with answer/finish requests, unless the service assigns one
    pub session_id: String,

    /// Period between emotion sampling ticks
    /// Default: 2 seconds
    pub sample_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: "Software Engineer".to_string(),
            session_id: "default".to_string(),
            sample_period: Duration::from_secs(2),
        }
    }
}
