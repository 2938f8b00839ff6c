use chrono::{DateTime, Utc};

use super::{
    BorrowItemError, Item, ItemBorrowed, ItemReturned, Member, ReturnItemError, TierUpgraded,
    fees, loyalty,
};

/// 返却処理の結果
///
/// 返却済みの資料、更新された会員、発生したイベントをまとめて返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub item: Item,
    pub member: Member,
    pub returned: ItemReturned,
    pub tier_upgraded: Option<TierUpgraded>,
}

impl ReturnOutcome {
    pub fn fee(&self) -> u64 {
        self.returned.fee
    }
}

/// 純粋関数：資料を貸し出す
///
/// ビジネスルール（判定順）：
/// 1. 資料が貸出中なら`ItemUnavailable`
/// 2. 貸出日数が0以下なら`InvalidDuration`
/// 3. 貸出日数が資料の上限を超えるなら`DurationExceeded`
///
/// `use_credit`が真で会員がクレジットを持っている場合のみ1消費する。
/// クレジットがない場合は通常の貸出として扱う。
///
/// 副作用なし。引数は変更せず、新しいItem・Memberとイベントを返すため、
/// 失敗時に状態が部分的に変わることはない（クレジットも消費されない）。
pub fn borrow_item(
    item: &Item,
    member: &Member,
    requested_days: i64,
    use_credit: bool,
    borrowed_at: DateTime<Utc>,
) -> Result<(Item, Member, ItemBorrowed), BorrowItemError> {
    // バリデーション：貸出中の資料は貸し出せない
    if !item.is_available() {
        return Err(BorrowItemError::ItemUnavailable);
    }

    // バリデーション：貸出日数
    if requested_days <= 0 {
        return Err(BorrowItemError::InvalidDuration);
    }

    let max_days = item.max_loan_days();
    if requested_days > i64::from(max_days) {
        return Err(BorrowItemError::DurationExceeded { max_days });
    }

    let credit_used = use_credit && member.free_credits() > 0;

    let event = ItemBorrowed {
        item_id: item.id().clone(),
        item_type: item.item_type(),
        member_id: member.id().clone(),
        requested_days: u32::try_from(requested_days).unwrap_or(max_days),
        credit_used,
        borrowed_at,
    };

    let new_item = item.clone().mark_borrowed();
    let new_member = member.clone().record_loan(credit_used);

    Ok((new_item, new_member, event))
}

/// 純粋関数：資料を返却する
///
/// ビジネスルール：
/// - 貸出中でない資料は`AlreadyAvailable`
/// - 破損フラグはDVDのみ指定可能（それ以外は`WrongVariant`）
/// - 延滞日数 = max(0, 実際の日数 - 上限日数)
/// - 料金 = 種別ごとの延滞料金 + DVD破損時の追加料金（延滞の有無に関係なく）
/// - 返却記録後にランク判定を行う
///
/// 副作用なし。新しいItem・Memberとイベントを返す。
pub fn return_item(
    item: &Item,
    member: &Member,
    actual_days: i64,
    damaged: Option<bool>,
    returned_at: DateTime<Utc>,
) -> Result<ReturnOutcome, ReturnItemError> {
    // バリデーション：貸出中でなければ返却できない
    if item.is_available() {
        return Err(ReturnItemError::AlreadyAvailable);
    }

    let days_late = fees::days_late(actual_days, item.max_loan_days());
    let fee = fees::compute_fee(item.kind(), days_late, damaged)?;

    let returned = ItemReturned {
        item_id: item.id().clone(),
        item_type: item.item_type(),
        member_id: member.id().clone(),
        actual_days,
        days_late,
        damaged: damaged.unwrap_or(false),
        fee,
        returned_at,
    };

    let new_item = item.clone().mark_returned();
    let (new_member, tier_upgraded) = loyalty::evaluate(member.clone().record_return(), returned_at);

    Ok(ReturnOutcome {
        item: new_item,
        member: new_member,
        returned,
        tier_upgraded,
    })
}
