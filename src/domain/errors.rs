/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowItemError {
    /// 資料が貸出中
    ItemUnavailable,
    /// 貸出日数が0以下
    InvalidDuration,
    /// 貸出日数が資料の上限を超えている
    DurationExceeded { max_days: u32 },
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnItemError {
    /// 資料は既に貸出可能（貸出中ではない）
    AlreadyAvailable,
    /// DVD以外の資料に破損フラグが指定された
    WrongVariant,
}

/// 延滞料金計算のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// 破損を考慮した料金計算はDVDのみ
    WrongVariant,
}

impl From<FeeError> for ReturnItemError {
    fn from(err: FeeError) -> Self {
        match err {
            FeeError::WrongVariant => ReturnItemError::WrongVariant,
        }
    }
}
