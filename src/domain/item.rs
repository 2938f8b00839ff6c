use serde::{Deserialize, Serialize};

use super::{FeeError, ItemId, ItemType, fees};

/// 通常図書の貸出上限日数
pub const BOOK_MAX_LOAN_DAYS: u32 = 14;

/// 貴重書の貸出上限日数
pub const RARE_BOOK_MAX_LOAN_DAYS: u32 = 3;

/// 雑誌の貸出上限日数
pub const MAGAZINE_MAX_LOAN_DAYS: u32 = 7;

/// DVDの貸出上限日数
pub const DVD_MAX_LOAN_DAYS: u32 = 3;

/// 資料種別ごとの固有情報
///
/// 貸出上限日数と延滞料金の計算式は種別ごとに異なる。
/// 実行時の型判定ではなく、このタグに対するパターンマッチで分岐する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Book { author: String, is_rare: bool },
    Magazine { edition: String },
    Dvd { director: String },
}

impl ItemKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Book { .. } => ItemType::Book,
            ItemKind::Magazine { .. } => ItemType::Magazine,
            ItemKind::Dvd { .. } => ItemType::Dvd,
        }
    }

    /// 貸出上限日数
    ///
    /// 種別と貴重書フラグだけで決まり、貸出状態には依存しない。
    pub fn max_loan_days(&self) -> u32 {
        match self {
            ItemKind::Book { is_rare: true, .. } => RARE_BOOK_MAX_LOAN_DAYS,
            ItemKind::Book { is_rare: false, .. } => BOOK_MAX_LOAN_DAYS,
            ItemKind::Magazine { .. } => MAGAZINE_MAX_LOAN_DAYS,
            ItemKind::Dvd { .. } => DVD_MAX_LOAN_DAYS,
        }
    }
}

/// 資料（カタログの1エントリ）
///
/// 不変条件：`available`は貸出でfalse、返却でtrueにのみ遷移する。
/// フィールドを非公開にし、貸出・返却の純粋関数以外から変更できないようにする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    title: String,
    available: bool,
    kind: ItemKind,
}

impl Item {
    /// 新規登録（貸出可能な状態で作成される）
    pub fn new(id: ItemId, title: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            title: title.into(),
            available: true,
            kind,
        }
    }

    pub fn book(id: ItemId, title: impl Into<String>, author: impl Into<String>, is_rare: bool) -> Self {
        Self::new(
            id,
            title,
            ItemKind::Book {
                author: author.into(),
                is_rare,
            },
        )
    }

    pub fn magazine(id: ItemId, title: impl Into<String>, edition: impl Into<String>) -> Self {
        Self::new(
            id,
            title,
            ItemKind::Magazine {
                edition: edition.into(),
            },
        )
    }

    pub fn dvd(id: ItemId, title: impl Into<String>, director: impl Into<String>) -> Self {
        Self::new(
            id,
            title,
            ItemKind::Dvd {
                director: director.into(),
            },
        )
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn max_loan_days(&self) -> u32 {
        self.kind.max_loan_days()
    }

    /// 延滞日数に対する延滞料金
    pub fn fine(&self, days_late: u32) -> u64 {
        fees::late_fee(&self.kind, days_late)
    }

    /// 破損を考慮した延滞料金（DVDのみ）
    ///
    /// # エラー
    /// DVD以外の資料では`FeeError::WrongVariant`を返す
    pub fn fine_with_damage(&self, days_late: u32, damaged: bool) -> Result<u64, FeeError> {
        fees::compute_fee(&self.kind, days_late, Some(damaged))
    }

    pub(super) fn mark_borrowed(self) -> Self {
        Self {
            available: false,
            ..self
        }
    }

    pub(super) fn mark_returned(self) -> Self {
        Self {
            available: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ItemId {
        ItemId::new(value).unwrap()
    }

    #[test]
    fn test_new_item_is_available() {
        let item = Item::magazine(id("M-1"), "Monthly Rust", "2024-05");
        assert!(item.is_available());
        assert_eq!(item.item_type(), ItemType::Magazine);
    }

    #[test]
    fn test_max_loan_days_per_variant() {
        assert_eq!(Item::book(id("B-1"), "Dune", "Herbert", false).max_loan_days(), 14);
        assert_eq!(Item::book(id("B-2"), "Codex", "Unknown", true).max_loan_days(), 3);
        assert_eq!(Item::magazine(id("M-1"), "Wired", "Mar").max_loan_days(), 7);
        assert_eq!(Item::dvd(id("D-1"), "Alien", "Scott").max_loan_days(), 3);
    }

    #[test]
    fn test_fine_per_variant() {
        assert_eq!(Item::book(id("B-1"), "Dune", "Herbert", false).fine(3), 3_000);
        assert_eq!(Item::magazine(id("M-1"), "Wired", "Mar").fine(3), 1_500);
        assert_eq!(Item::dvd(id("D-1"), "Alien", "Scott").fine(3), 6_000);
    }

    #[test]
    fn test_fine_with_damage_only_for_dvd() {
        let dvd = Item::dvd(id("D-1"), "Alien", "Scott");
        assert_eq!(dvd.fine_with_damage(0, true), Ok(50_000));

        let book = Item::book(id("B-1"), "Dune", "Herbert", false);
        assert_eq!(book.fine_with_damage(0, true), Err(FeeError::WrongVariant));
    }

    #[test]
    fn test_availability_toggles() {
        let item = Item::dvd(id("D-1"), "Alien", "Scott").mark_borrowed();
        assert!(!item.is_available());
        assert!(item.mark_returned().is_available());
    }
}
