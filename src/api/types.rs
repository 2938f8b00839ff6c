use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::loan::{BorrowReceipt, ReturnReceipt, TierInfo};
use crate::domain::{DomainEvent, Item, ItemKind, Member, StatisticsSnapshot};

/// 資料登録リクエスト（POST /items）
///
/// 種別固有の項目は`type`タグと同じ階層に置く。
/// 例: `{"id": "D-1", "title": "Alien", "type": "dvd", "director": "Ridley Scott"}`
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// 会員登録リクエスト（POST /members）
#[derive(Debug, Deserialize)]
pub struct RegisterMemberRequest {
    pub id: String,
    pub name: String,
}

/// 貸出リクエスト（POST /loans）
#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    pub item_id: String,
    pub member_id: String,
    pub requested_days: i64,
    #[serde(default)]
    pub use_credit: bool,
}

/// 返却リクエスト（POST /returns）
///
/// `damaged`はDVDの場合のみ指定する。
#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    pub item_id: String,
    pub member_id: String,
    pub actual_days: i64,
    #[serde(default)]
    pub damaged: Option<bool>,
}

/// カタログ一覧のクエリ（GET /items?type=dvd）
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

/// 資料レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub available: bool,
    pub max_loan_days: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id().value().to_string(),
            title: item.title().to_string(),
            available: item.is_available(),
            max_loan_days: item.max_loan_days(),
            kind: item.kind().clone(),
        }
    }
}

/// 会員レスポンス（ランク情報を含む）
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub free_credits: u32,
    pub successful_returns: u32,
    pub total_loan_attempts: u32,
}

impl From<TierInfo> for MemberResponse {
    fn from(info: TierInfo) -> Self {
        Self {
            id: info.member_id.value().to_string(),
            name: info.name,
            tier: info.tier.level(),
            free_credits: info.free_credits,
            successful_returns: info.successful_returns,
            total_loan_attempts: info.total_loan_attempts,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(TierInfo::from(&member))
    }
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowResponse {
    pub item_id: String,
    pub member_id: String,
    pub item_type: String,
    pub requested_days: u32,
    pub credit_used: bool,
    pub free_credits: u32,
}

impl From<BorrowReceipt> for BorrowResponse {
    fn from(receipt: BorrowReceipt) -> Self {
        Self {
            item_id: receipt.item_id.value().to_string(),
            member_id: receipt.member_id.value().to_string(),
            item_type: receipt.item_type.as_str().to_string(),
            requested_days: receipt.requested_days,
            credit_used: receipt.credit_used,
            free_credits: receipt.free_credits,
        }
    }
}

/// 返却レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnResponse {
    pub item_id: String,
    pub member_id: String,
    pub days_late: u32,
    pub fee: u64,
    pub tier: u8,
    pub free_credits: u32,
    pub tier_upgraded: bool,
}

impl From<ReturnReceipt> for ReturnResponse {
    fn from(receipt: ReturnReceipt) -> Self {
        Self {
            item_id: receipt.item_id.value().to_string(),
            member_id: receipt.member_id.value().to_string(),
            days_late: receipt.days_late,
            fee: receipt.fee,
            tier: receipt.tier.level(),
            free_credits: receipt.free_credits,
            tier_upgraded: receipt.tier_upgraded.is_some(),
        }
    }
}

/// 月次統計レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub counts_by_type: BTreeMap<String, u64>,
    pub total_fees: u64,
    pub total_credits_used: u64,
    pub period_started_at: DateTime<Utc>,
}

impl From<StatisticsSnapshot> for StatisticsResponse {
    fn from(snapshot: StatisticsSnapshot) -> Self {
        Self {
            counts_by_type: snapshot
                .counts_by_type
                .into_iter()
                .map(|(item_type, count)| (item_type.as_str().to_string(), count))
                .collect(),
            total_fees: snapshot.total_fees,
            total_credits_used: snapshot.total_credits_used,
            period_started_at: snapshot.period_started_at,
        }
    }
}

/// イベント一覧レスポンス（GET /events）
#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<DomainEvent>,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
