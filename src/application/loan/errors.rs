use crate::domain::{BorrowItemError, ReturnItemError};
use thiserror::Error;

/// 貸出管理アプリケーション層のエラー
///
/// 利用者に表示する業務上の失敗はそれぞれ別のバリアントとして表現し、
/// 呼び出し側が個別のメッセージを出せるようにする。
#[derive(Debug, Error)]
pub enum LoanApplicationError {
    /// 資料が存在しない
    #[error("Item not found")]
    ItemNotFound,

    /// 会員が存在しない
    #[error("Member not found")]
    MemberNotFound,

    /// 資料が貸出中
    #[error("Item is currently on loan")]
    ItemUnavailable,

    /// 貸出日数が0以下
    #[error("Loan duration must be at least one day")]
    InvalidDuration,

    /// 貸出日数が上限を超えている
    #[error("Loan duration exceeds the maximum of {max_days} days")]
    DurationExceeded { max_days: u32 },

    /// 貸出中でない資料を返却しようとした
    #[error("Item is not on loan")]
    AlreadyAvailable,

    /// DVD以外に破損フラグが指定された
    #[error("Damage can only be reported for DVDs")]
    WrongVariant,

    /// 同じIDの資料が既に登録されている
    #[error("Item already exists")]
    DuplicateItem,

    /// 同じIDの会員が既に登録されている
    #[error("Member already exists")]
    DuplicateMember,

    /// 入力値が不正
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catalogueのエラー
    #[error("Catalogue error")]
    CatalogueError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// MemberDirectoryのエラー
    #[error("Member directory error")]
    MemberDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// EventStoreのエラー
    #[error("Event store error")]
    EventStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// StatisticsStoreのエラー
    #[error("Statistics store error")]
    StatisticsError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BorrowItemError> for LoanApplicationError {
    fn from(err: BorrowItemError) -> Self {
        match err {
            BorrowItemError::ItemUnavailable => LoanApplicationError::ItemUnavailable,
            BorrowItemError::InvalidDuration => LoanApplicationError::InvalidDuration,
            BorrowItemError::DurationExceeded { max_days } => {
                LoanApplicationError::DurationExceeded { max_days }
            }
        }
    }
}

impl From<ReturnItemError> for LoanApplicationError {
    fn from(err: ReturnItemError) -> Self {
        match err {
            ReturnItemError::AlreadyAvailable => LoanApplicationError::AlreadyAvailable,
            ReturnItemError::WrongVariant => LoanApplicationError::WrongVariant,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LoanApplicationError>;
