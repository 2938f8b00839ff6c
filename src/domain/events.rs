use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, ItemType, LoyaltyTier, MemberId};

/// イベント：資料が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBorrowed {
    pub item_id: ItemId,
    pub item_type: ItemType,
    pub member_id: MemberId,
    pub requested_days: u32,
    pub credit_used: bool,
    pub borrowed_at: DateTime<Utc>,
}

/// イベント：資料が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReturned {
    pub item_id: ItemId,
    pub item_type: ItemType,
    pub member_id: MemberId,
    pub actual_days: i64,
    pub days_late: u32,
    pub damaged: bool,
    pub fee: u64,
    pub returned_at: DateTime<Utc>,
}

/// イベント：会員ランクが上がった
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierUpgraded {
    pub member_id: MemberId,
    pub from: LoyaltyTier,
    pub to: LoyaltyTier,
    pub credits_granted: u32,
    pub upgraded_at: DateTime<Utc>,
}

/// イベント：月次統計がリセットされた
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsReset {
    pub reset_at: DateTime<Utc>,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    ItemBorrowed(ItemBorrowed),
    ItemReturned(ItemReturned),
    TierUpgraded(TierUpgraded),
    StatisticsReset(StatisticsReset),
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::ItemBorrowed(_) => "item_borrowed",
            DomainEvent::ItemReturned(_) => "item_returned",
            DomainEvent::TierUpgraded(_) => "tier_upgraded",
            DomainEvent::StatisticsReset(_) => "statistics_reset",
        }
    }
}
