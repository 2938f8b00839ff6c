use crate::domain::events::DomainEvent;
use async_trait::async_trait;
use futures::stream::BoxStream;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// イベントストアポート
///
/// 貸出・返却・ランクアップなどのドメインイベントの記録を抽象化する。
/// イベントは追記専用ログに保存される不変の事実。
#[async_trait]
pub trait EventStore: Send + Sync {
    /// イベントを追加する
    ///
    /// イベントの順序は保持される。
    async fn append(&self, events: Vec<DomainEvent>) -> Result<()>;

    /// すべてのイベントをストリーム配信する
    ///
    /// イベントは挿入順にストリーム配信される。
    fn stream_all(&self) -> BoxStream<'static, Result<DomainEvent>>;
}
