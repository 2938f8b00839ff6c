use crate::domain::{Item, ItemId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// カタログポート
///
/// 資料のIDによる検索と保存を抽象化する。
/// 貸出エンジンは資料の貸出可否をこのポート経由で読み書きする。
#[async_trait]
pub trait Catalogue: Send + Sync {
    /// IDで資料を検索する
    async fn find_item_by_id(&self, item_id: &ItemId) -> Result<Option<Item>>;

    /// 資料を新規登録する
    ///
    /// 同じIDの資料が既に存在する場合は`false`を返し、何も変更しない。
    async fn add(&self, item: Item) -> Result<bool>;

    /// 資料の現在状態を保存する（既存エントリの上書き）
    async fn save(&self, item: Item) -> Result<()>;

    /// 全資料をID順に取得する
    async fn list(&self) -> Result<Vec<Item>>;
}
