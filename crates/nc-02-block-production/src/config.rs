//! Configuration types for block production

use serde::Deserialize;

/// Runtime configuration for mining
#[derive(Clone, Debug, Deserialize)]
pub struct MiningConfig {
    /// Nonces tried between cancel-flag checks
    pub cancel_check_interval: u32,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            cancel_check_interval: crate::CANCEL_CHECK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MiningConfig::default();
        assert_eq!(config.cancel_check_interval, crate::CANCEL_CHECK_INTERVAL);
    }
}
