use crate::{
    paginator::DEFAULT_PAGE_SIZE,
    source::DashboardSummary,
    synthetic::FALLBACK_ROSTER_SIZE,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FALLBACK_SEED: u64 = 0x5EED_DE5C;
pub const CONFIG_FILE: &str = "desk_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Rows per page. Must be at least 1.
    pub page_size:            usize,
    /// Records in the synthetic roster used when the source fails.
    pub fallback_roster_size: usize,
    /// Seed for the synthetic roster.
    pub fallback_seed:        u64,
    /// Served when the summary source fails.
    pub summary_fallback:     DashboardSummary,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            page_size:            DEFAULT_PAGE_SIZE,
            fallback_roster_size: FALLBACK_ROSTER_SIZE,
            fallback_seed:        DEFAULT_FALLBACK_SEED,
            summary_fallback:     DashboardSummary::demo(),
        }
    }
}

impl DeskConfig {
    /// Load `desk_config.json` from the data/ directory.
    /// Missing keys take their defaults. In tests, use DeskConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DeskConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let config: DeskConfig = serde_json::from_str(r#"{ "page_size": 25 }"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.fallback_roster_size, 20);
        assert_eq!(config.summary_fallback.total_subscribers, 15_420);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = DeskConfig { page_size: 0, ..DeskConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "fallback_seed": 7 }"#).unwrap();
        let config = DeskConfig::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.fallback_seed, 7);
        assert_eq!(config.page_size, 10);
    }
}
