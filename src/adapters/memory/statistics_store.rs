use crate::domain::{DomainEvent, MonthlyStatistics, StatisticsSnapshot};
use crate::ports::statistics_store::{Result, StatisticsStore as StatisticsStoreTrait};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

/// 月次統計のインメモリ実装
#[derive(Debug)]
pub struct StatisticsStore {
    statistics: Mutex<MonthlyStatistics>,
}

impl StatisticsStore {
    /// 現在時刻から新しい集計期間を開始する
    pub fn new() -> Self {
        Self {
            statistics: Mutex::new(MonthlyStatistics::new(Utc::now())),
        }
    }
}

impl Default for StatisticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatisticsStoreTrait for StatisticsStore {
    async fn apply(&self, event: &DomainEvent) -> Result<()> {
        let mut statistics = self.statistics.lock().map_err(|_| "statistics lock poisoned")?;
        statistics.apply(event);
        Ok(())
    }

    async fn snapshot(&self) -> Result<StatisticsSnapshot> {
        let statistics = self.statistics.lock().map_err(|_| "statistics lock poisoned")?;
        Ok(statistics.snapshot())
    }
}
