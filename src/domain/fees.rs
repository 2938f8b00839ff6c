use super::{FeeError, ItemKind};

/// 図書の1日あたり延滞料金
pub const BOOK_FINE_PER_DAY: u64 = 1_000;

/// 雑誌の1日あたり延滞料金
pub const MAGAZINE_FINE_PER_DAY: u64 = 500;

/// DVDの1日あたり延滞料金
pub const DVD_FINE_PER_DAY: u64 = 2_000;

/// DVD破損時の追加料金（延滞の有無に関係なく加算）
pub const DVD_DAMAGE_SURCHARGE: u64 = 50_000;

/// 純粋関数：延滞日数
///
/// 上限日数以内の返却は0日。負の値にはならない。
pub fn days_late(actual_days: i64, max_loan_days: u32) -> u32 {
    let late = actual_days.saturating_sub(i64::from(max_loan_days));
    u32::try_from(late.max(0)).unwrap_or(u32::MAX)
}

/// 純粋関数：種別ごとの延滞料金
pub fn late_fee(kind: &ItemKind, days_late: u32) -> u64 {
    let per_day = match kind {
        ItemKind::Book { .. } => BOOK_FINE_PER_DAY,
        ItemKind::Magazine { .. } => MAGAZINE_FINE_PER_DAY,
        ItemKind::Dvd { .. } => DVD_FINE_PER_DAY,
    };
    per_day.saturating_mul(u64::from(days_late))
}

/// 純粋関数：返却時の料金
///
/// `damaged`はDVDのみ指定できる。DVD以外に指定された場合は
/// 無視せずに`FeeError::WrongVariant`を返す。
/// DVDで`damaged`が`None`の場合は破損なしとして扱う。
pub fn compute_fee(kind: &ItemKind, days_late: u32, damaged: Option<bool>) -> Result<u64, FeeError> {
    let fee = late_fee(kind, days_late);
    match (kind, damaged) {
        (ItemKind::Dvd { .. }, Some(true)) => Ok(fee.saturating_add(DVD_DAMAGE_SURCHARGE)),
        (ItemKind::Dvd { .. }, _) => Ok(fee),
        (_, Some(_)) => Err(FeeError::WrongVariant),
        (_, None) => Ok(fee),
    }
}
