use crate::domain::{Member, MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員名簿ポート
///
/// 会員のIDによる検索と保存を抽象化する。
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// IDで会員を検索する
    async fn find_member_by_id(&self, member_id: &MemberId) -> Result<Option<Member>>;

    /// 会員を新規登録する
    ///
    /// 同じIDの会員が既に存在する場合は`false`を返し、何も変更しない。
    async fn add(&self, member: Member) -> Result<bool>;

    /// 会員の現在状態を保存する（既存エントリの上書き）
    async fn save(&self, member: Member) -> Result<()>;

    /// 全会員をID順に取得する
    async fn list(&self) -> Result<Vec<Member>>;
}
