use crate::application::loan::{
    LoanApplicationError, ServiceDependencies, add_item as execute_add_item,
    borrow_item as execute_borrow_item, get_item as execute_get_item, list_events,
    list_items as execute_list_items, list_members as execute_list_members,
    register_member as execute_register_member, reset_statistics as execute_reset_statistics,
    return_item as execute_return_item, statistics_snapshot, tier_info,
};
use crate::domain::commands::{AddItem, BorrowItem, RegisterMember, ReturnItem};
use crate::domain::value_objects::{ItemId, ItemType, MemberId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::{ApiJson, ApiQuery},
    types::{
        AddItemRequest, BorrowRequest, BorrowResponse, EventsResponse, ItemResponse,
        ListItemsQuery, MemberResponse, RegisterMemberRequest, ReturnRequest, ReturnResponse,
        StatisticsResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

fn parse_item_id(value: &str) -> Result<ItemId, ApiError> {
    ItemId::new(value).map_err(|_| {
        ApiError::from(LoanApplicationError::InvalidInput(
            "item id must not be empty".to_string(),
        ))
    })
}

fn parse_item_type(value: &str) -> Result<ItemType, ApiError> {
    value
        .parse::<ItemType>()
        .map_err(|message| ApiError::from(LoanApplicationError::InvalidInput(message)))
}

fn parse_member_id(value: &str) -> Result<MemberId, ApiError> {
    MemberId::new(value).map_err(|_| {
        ApiError::from(LoanApplicationError::InvalidInput(
            "member id must not be empty".to_string(),
        ))
    })
}

// ============================================================================
// Catalogue / member handlers
// ============================================================================

/// POST /items - 資料をカタログに登録
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AddItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let cmd = AddItem {
        item_id: parse_item_id(&req.id)?,
        title: req.title,
        kind: req.kind,
    };

    let item = execute_add_item(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// GET /items - カタログ一覧
///
/// `?type=book|magazine|dvd`で種別を絞り込める。
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListItemsQuery>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let item_type = query.item_type.as_deref().map(parse_item_type).transpose()?;
    let items = execute_list_items(&state.service_deps, item_type).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /items/:id - 資料詳細
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let item = execute_get_item(&state.service_deps, &item_id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// POST /members - 会員登録
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let cmd = RegisterMember {
        member_id: parse_member_id(&req.id)?,
        name: req.name,
    };

    let member = execute_register_member(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// GET /members - 会員一覧
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = execute_list_members(&state.service_deps).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// GET /members/:id - 会員のランク情報
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member_id = parse_member_id(&member_id)?;
    let info = tier_info(&state.service_deps, &member_id).await?;
    Ok(Json(MemberResponse::from(info)))
}

// ============================================================================
// Loan handlers
// ============================================================================

/// POST /loans - 資料を貸し出す
///
/// 強制されるビジネスルール:
/// - 資料と会員が存在すること
/// - 資料が貸出可能であること
/// - 貸出日数が1日以上、資料の上限日数以下であること
pub async fn borrow_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<BorrowRequest>,
) -> Result<(StatusCode, Json<BorrowResponse>), ApiError> {
    let cmd = BorrowItem {
        item_id: parse_item_id(&req.item_id)?,
        member_id: parse_member_id(&req.member_id)?,
        requested_days: req.requested_days,
        use_credit: req.use_credit,
        borrowed_at: chrono::Utc::now(),
    };

    let receipt = execute_borrow_item(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BorrowResponse::from(receipt))))
}

/// POST /returns - 資料を返却する
///
/// 強制されるビジネスルール:
/// - 資料が貸出中であること
/// - 破損フラグはDVDのみ
///
/// レスポンスに延滞料金とランク情報を含める。
pub async fn return_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReturnRequest>,
) -> Result<Json<ReturnResponse>, ApiError> {
    let cmd = ReturnItem {
        item_id: parse_item_id(&req.item_id)?,
        member_id: parse_member_id(&req.member_id)?,
        actual_days: req.actual_days,
        damaged: req.damaged,
        returned_at: chrono::Utc::now(),
    };

    let receipt = execute_return_item(&state.service_deps, cmd).await?;

    Ok(Json(ReturnResponse::from(receipt)))
}

// ============================================================================
// Statistics handlers
// ============================================================================

/// GET /statistics - 月次統計
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let snapshot = statistics_snapshot(&state.service_deps).await?;
    Ok(Json(StatisticsResponse::from(snapshot)))
}

/// POST /statistics/reset - 月次統計のリセット
pub async fn reset_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let snapshot = execute_reset_statistics(&state.service_deps, chrono::Utc::now()).await?;
    Ok(Json(StatisticsResponse::from(snapshot)))
}

/// GET /events - 記録済みイベント
pub async fn get_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = list_events(&state.service_deps).await?;
    Ok(Json(EventsResponse { events }))
}
