use crate::domain::{self, DomainEvent, commands::*, value_objects::*};
use crate::ports::{Catalogue, EventStore, MemberDirectory, StatisticsStore};
use serde::Serialize;
use std::sync::Arc;

use super::errors::{LoanApplicationError, Result};
use super::locks::EntityLocks;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// カタログと会員名簿はここで明示的に所有され、
/// 各ユースケース関数に参照として渡される。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub catalogue: Arc<dyn Catalogue>,
    pub members: Arc<dyn MemberDirectory>,
    pub event_store: Arc<dyn EventStore>,
    pub statistics: Arc<dyn StatisticsStore>,
    pub locks: Arc<EntityLocks>,
}

/// 貸出結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowReceipt {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub item_type: ItemType,
    pub requested_days: u32,
    pub credit_used: bool,
    pub free_credits: u32,
}

/// 返却結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    pub item_id: ItemId,
    pub member_id: MemberId,
    pub days_late: u32,
    pub fee: u64,
    pub tier: LoyaltyTier,
    pub free_credits: u32,
    pub tier_upgraded: Option<domain::TierUpgraded>,
}

/// イベントを記録し、月次統計に反映するヘルパー関数
///
/// borrow_item, return_item, reset_statisticsで共通利用される。
/// ジャーナルロックの下で追記と集計反映を行うため、
/// イベントログの順序と統計の集計期間は常に一致する。
pub(super) async fn record_events(deps: &ServiceDependencies, events: Vec<DomainEvent>) -> Result<()> {
    let _journal = deps.locks.lock_journal().await;

    deps.event_store
        .append(events.clone())
        .await
        .map_err(LoanApplicationError::EventStoreError)?;

    for event in &events {
        deps.statistics
            .apply(event)
            .await
            .map_err(LoanApplicationError::StatisticsError)?;
        tracing::debug!(event = event.name(), "Recorded domain event");
    }

    Ok(())
}

pub(super) async fn load_item(deps: &ServiceDependencies, item_id: &ItemId) -> Result<domain::Item> {
    deps.catalogue
        .find_item_by_id(item_id)
        .await
        .map_err(LoanApplicationError::CatalogueError)?
        .ok_or(LoanApplicationError::ItemNotFound)
}

pub(super) async fn load_member(
    deps: &ServiceDependencies,
    member_id: &MemberId,
) -> Result<domain::Member> {
    deps.members
        .find_member_by_id(member_id)
        .await
        .map_err(LoanApplicationError::MemberDirectoryError)?
        .ok_or(LoanApplicationError::MemberNotFound)
}

/// 資料を貸し出す
///
/// ビジネスルール：
/// - 資料と会員が存在すること
/// - 資料が貸出可能であること
/// - 貸出日数が1日以上、資料の上限日数以下であること
/// - クレジット使用時は貸出成功時にのみ1消費する
///
/// 資料と会員のロックを保持したまま読み込み・判定・保存を行うため、
/// 同じ資料への同時貸出は直列化される。
/// 失敗時はカタログ・会員名簿・統計のいずれも変更しない。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 貸出コマンド
pub async fn borrow_item(deps: &ServiceDependencies, cmd: BorrowItem) -> Result<BorrowReceipt> {
    let _item_guard = deps.locks.lock_item(&cmd.item_id).await;
    let _member_guard = deps.locks.lock_member(&cmd.member_id).await;

    // 1. 資料と会員の取得
    let item = load_item(deps, &cmd.item_id).await?;
    let member = load_member(deps, &cmd.member_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (item, member, event) = domain::loan::borrow_item(
        &item,
        &member,
        cmd.requested_days,
        cmd.use_credit,
        cmd.borrowed_at,
    )
    .inspect_err(|e| {
        tracing::info!(
            item_id = %cmd.item_id,
            member_id = %cmd.member_id,
            reason = ?e,
            "Borrow rejected"
        );
    })?;

    let receipt = BorrowReceipt {
        item_id: event.item_id.clone(),
        member_id: event.member_id.clone(),
        item_type: event.item_type,
        requested_days: event.requested_days,
        credit_used: event.credit_used,
        free_credits: member.free_credits(),
    };

    // 3. 新しい状態を保存
    deps.catalogue
        .save(item)
        .await
        .map_err(LoanApplicationError::CatalogueError)?;
    deps.members
        .save(member)
        .await
        .map_err(LoanApplicationError::MemberDirectoryError)?;

    // 4. イベント記録と統計反映
    record_events(deps, vec![DomainEvent::ItemBorrowed(event)]).await?;

    tracing::info!(
        item_id = %receipt.item_id,
        member_id = %receipt.member_id,
        days = receipt.requested_days,
        credit_used = receipt.credit_used,
        "Item borrowed"
    );

    Ok(receipt)
}

/// 資料を返却する
///
/// ビジネスルール：
/// - 資料と会員が存在すること
/// - 資料が貸出中であること
/// - 破損フラグはDVDのみ指定可能
/// - 延滞料金を計算し、月次統計の料金合計に加算する
/// - 返却成功回数を加算し、ランク判定を行う
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 返却コマンド
///
/// # 戻り値
/// 延滞料金（延滞・破損がなければ0）を含む返却結果
pub async fn return_item(deps: &ServiceDependencies, cmd: ReturnItem) -> Result<ReturnReceipt> {
    let _item_guard = deps.locks.lock_item(&cmd.item_id).await;
    let _member_guard = deps.locks.lock_member(&cmd.member_id).await;

    // 1. 資料と会員の取得
    let item = load_item(deps, &cmd.item_id).await?;
    let member = load_member(deps, &cmd.member_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let outcome = domain::loan::return_item(
        &item,
        &member,
        cmd.actual_days,
        cmd.damaged,
        cmd.returned_at,
    )
    .inspect_err(|e| {
        tracing::info!(
            item_id = %cmd.item_id,
            member_id = %cmd.member_id,
            reason = ?e,
            "Return rejected"
        );
    })?;

    let receipt = ReturnReceipt {
        item_id: outcome.returned.item_id.clone(),
        member_id: outcome.returned.member_id.clone(),
        days_late: outcome.returned.days_late,
        fee: outcome.fee(),
        tier: outcome.member.tier(),
        free_credits: outcome.member.free_credits(),
        tier_upgraded: outcome.tier_upgraded.clone(),
    };

    // 3. 新しい状態を保存
    // 資料と会員の保存は個別に行われる。両方のロックを保持しているため他の貸出・返却からは
    // 中間状態は見えないが、ロックを取らない参照系（get_item等）からは一瞬見えうる。
    deps.catalogue
        .save(outcome.item)
        .await
        .map_err(LoanApplicationError::CatalogueError)?;
    deps.members
        .save(outcome.member)
        .await
        .map_err(LoanApplicationError::MemberDirectoryError)?;

    // 4. イベント記録と統計反映
    let mut events = vec![DomainEvent::ItemReturned(outcome.returned)];
    if let Some(upgraded) = outcome.tier_upgraded {
        tracing::info!(
            member_id = %upgraded.member_id,
            tier = upgraded.to.level(),
            credits = upgraded.credits_granted,
            "Member tier upgraded"
        );
        events.push(DomainEvent::TierUpgraded(upgraded));
    }
    record_events(deps, events).await?;

    tracing::info!(
        item_id = %receipt.item_id,
        member_id = %receipt.member_id,
        days_late = receipt.days_late,
        fee = receipt.fee,
        "Item returned"
    );

    Ok(receipt)
}
