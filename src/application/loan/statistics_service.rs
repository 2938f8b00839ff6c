use crate::domain::{DomainEvent, StatisticsReset, StatisticsSnapshot};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;

use super::errors::{LoanApplicationError, Result};
use super::loan_service::{ServiceDependencies, record_events};

/// 月次統計のスナップショットを取得する
pub async fn statistics_snapshot(deps: &ServiceDependencies) -> Result<StatisticsSnapshot> {
    deps.statistics
        .snapshot()
        .await
        .map_err(LoanApplicationError::StatisticsError)
}

/// 月次統計をリセットする
///
/// 種別ごとの貸出件数、料金合計、クレジット使用数をすべて0に戻す。
/// リセット自体もイベントとして記録される。
///
/// # 戻り値
/// リセット後（空）のスナップショット
pub async fn reset_statistics(
    deps: &ServiceDependencies,
    reset_at: DateTime<Utc>,
) -> Result<StatisticsSnapshot> {
    let before = statistics_snapshot(deps).await?;

    record_events(
        deps,
        vec![DomainEvent::StatisticsReset(StatisticsReset { reset_at })],
    )
    .await?;

    tracing::info!(
        total_fees = before.total_fees,
        total_credits_used = before.total_credits_used,
        "Monthly statistics reset"
    );

    statistics_snapshot(deps).await
}

/// 記録済みのイベントを記録順に取得する
pub async fn list_events(deps: &ServiceDependencies) -> Result<Vec<DomainEvent>> {
    deps.event_store
        .stream_all()
        .try_collect::<Vec<_>>()
        .await
        .map_err(LoanApplicationError::EventStoreError)
}
