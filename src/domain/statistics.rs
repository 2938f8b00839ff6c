use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::{DomainEvent, ItemType};

/// 月次統計のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSnapshot {
    pub counts_by_type: HashMap<ItemType, u64>,
    pub total_fees: u64,
    pub total_credits_used: u64,
    pub period_started_at: DateTime<Utc>,
}

/// 月次統計
///
/// ドメインイベントから投影される集計値。
/// リセットで全項目を0に戻し、履歴は保持しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStatistics {
    counts_by_type: HashMap<ItemType, u64>,
    total_fees: u64,
    total_credits_used: u64,
    period_started_at: DateTime<Utc>,
}

impl MonthlyStatistics {
    pub fn new(period_started_at: DateTime<Utc>) -> Self {
        Self {
            counts_by_type: HashMap::new(),
            total_fees: 0,
            total_credits_used: 0,
            period_started_at,
        }
    }

    /// イベントを集計に反映する
    ///
    /// - ItemBorrowed: 種別ごとの貸出件数、クレジット使用数
    /// - ItemReturned: 料金合計
    /// - StatisticsReset: 期間のリセット
    pub fn apply(&mut self, event: &DomainEvent) {
        match event {
            DomainEvent::ItemBorrowed(e) => {
                *self.counts_by_type.entry(e.item_type).or_insert(0) += 1;
                if e.credit_used {
                    self.total_credits_used += 1;
                }
            }
            DomainEvent::ItemReturned(e) => {
                self.total_fees = self.total_fees.saturating_add(e.fee);
            }
            DomainEvent::StatisticsReset(e) => self.reset(e.reset_at),
            DomainEvent::TierUpgraded(_) => {}
        }
    }

    pub fn reset(&mut self, at: DateTime<Utc>) {
        *self = Self::new(at);
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            counts_by_type: self.counts_by_type.clone(),
            total_fees: self.total_fees,
            total_credits_used: self.total_credits_used,
            period_started_at: self.period_started_at,
        }
    }
}
