use crate::domain::{DomainEvent, StatisticsSnapshot};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 月次統計ポート
///
/// ドメインイベントを集計に投影し、スナップショットを提供する。
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// イベントを集計に反映する
    async fn apply(&self, event: &DomainEvent) -> Result<()>;

    /// 現在の集計値を取得する
    async fn snapshot(&self) -> Result<StatisticsSnapshot>;
}
