use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, ItemKind, MemberId};

/// コマンド：資料を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowItem {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub requested_days: i64,
    pub use_credit: bool,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：資料を返却する
///
/// 貸出記録は保持しないため、会員と実際の貸出日数は呼び出し側が指定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub actual_days: i64,
    pub damaged: Option<bool>,
    pub returned_at: DateTime<Utc>,
}

/// コマンド：資料をカタログに登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item_id: ItemId,
    pub title: String,
    pub kind: ItemKind,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub member_id: MemberId,
    pub name: String,
}
