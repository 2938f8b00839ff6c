use crate::domain::{Item, Member, commands::*, value_objects::*};
use serde::Serialize;

use super::errors::{LoanApplicationError, Result};
use super::loan_service::{ServiceDependencies, load_item, load_member};

/// 会員ランク情報（表示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub member_id: MemberId,
    pub name: String,
    pub tier: LoyaltyTier,
    pub free_credits: u32,
    pub successful_returns: u32,
    pub total_loan_attempts: u32,
}

impl From<&Member> for TierInfo {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id().clone(),
            name: member.name().to_string(),
            tier: member.tier(),
            free_credits: member.free_credits(),
            successful_returns: member.successful_returns(),
            total_loan_attempts: member.total_loan_attempts(),
        }
    }
}

/// 資料をカタログに登録する
///
/// ビジネスルール：
/// - タイトルは空でないこと
/// - 同じIDの資料は登録できない
/// - 登録直後は貸出可能
pub async fn add_item(deps: &ServiceDependencies, cmd: AddItem) -> Result<Item> {
    if cmd.title.trim().is_empty() {
        return Err(LoanApplicationError::InvalidInput(
            "title must not be empty".to_string(),
        ));
    }

    let item = Item::new(cmd.item_id, cmd.title.trim(), cmd.kind);
    let added = deps
        .catalogue
        .add(item.clone())
        .await
        .map_err(LoanApplicationError::CatalogueError)?;

    if !added {
        return Err(LoanApplicationError::DuplicateItem);
    }

    tracing::info!(item_id = %item.id(), item_type = %item.item_type(), "Item added to catalogue");
    Ok(item)
}

/// 会員を登録する
pub async fn register_member(deps: &ServiceDependencies, cmd: RegisterMember) -> Result<Member> {
    if cmd.name.trim().is_empty() {
        return Err(LoanApplicationError::InvalidInput(
            "name must not be empty".to_string(),
        ));
    }

    let member = Member::new(cmd.member_id, cmd.name.trim());
    let added = deps
        .members
        .add(member.clone())
        .await
        .map_err(LoanApplicationError::MemberDirectoryError)?;

    if !added {
        return Err(LoanApplicationError::DuplicateMember);
    }

    tracing::info!(member_id = %member.id(), "Member registered");
    Ok(member)
}

pub async fn get_item(deps: &ServiceDependencies, item_id: &ItemId) -> Result<Item> {
    load_item(deps, item_id).await
}

/// カタログ一覧を取得する（種別指定時はその種別のみ）
pub async fn list_items(deps: &ServiceDependencies, item_type: Option<ItemType>) -> Result<Vec<Item>> {
    let items = deps
        .catalogue
        .list()
        .await
        .map_err(LoanApplicationError::CatalogueError)?;
    Ok(items
        .into_iter()
        .filter(|item| item_type.is_none_or(|t| item.item_type() == t))
        .collect())
}

pub async fn list_members(deps: &ServiceDependencies) -> Result<Vec<TierInfo>> {
    let members = deps
        .members
        .list()
        .await
        .map_err(LoanApplicationError::MemberDirectoryError)?;
    Ok(members.iter().map(TierInfo::from).collect())
}

/// 会員のランク・クレジット・返却成功回数を取得する
pub async fn tier_info(deps: &ServiceDependencies, member_id: &MemberId) -> Result<TierInfo> {
    let member = load_member(deps, member_id).await?;
    Ok(TierInfo::from(&member))
}
