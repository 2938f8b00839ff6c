use serde::{Deserialize, Serialize};
use std::fmt;

/// 識別子のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// 空文字列（空白のみを含む）
    Empty,
}

/// 資料ID - カタログ登録時に付与される一意な文字列
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// 前後の空白を除去して生成する
    ///
    /// # エラー
    /// 空文字列の場合は`IdError::Empty`を返す
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - 会員登録時に付与される一意な文字列
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// 前後の空白を除去して生成する
    ///
    /// # エラー
    /// 空文字列の場合は`IdError::Empty`を返す
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 資料種別タグ
///
/// 統計の集計キーとして使用される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Book,
    Magazine,
    Dvd,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Book => "book",
            ItemType::Magazine => "magazine",
            ItemType::Dvd => "dvd",
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(ItemType::Book),
            "magazine" => Ok(ItemType::Magazine),
            "dvd" => Ok(ItemType::Dvd),
            _ => Err(format!("Invalid item type: {}", s)),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 会員ランク
///
/// 不変条件：ランクは上がる方向にのみ遷移する（降格なし）。
/// 順序比較（`Basic < Silver < Gold`）で遷移の単調性を判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    #[default]
    Basic,
    Silver,
    Gold,
}

impl LoyaltyTier {
    /// 数値表現（0, 1, 2）
    pub fn level(&self) -> u8 {
        match self {
            LoyaltyTier::Basic => 0,
            LoyaltyTier::Silver => 1,
            LoyaltyTier::Gold => 2,
        }
    }

    /// このランクに到達するために必要な返却成功回数
    pub fn required_returns(&self) -> u32 {
        match self {
            LoyaltyTier::Basic => 0,
            LoyaltyTier::Silver => 5,
            LoyaltyTier::Gold => 10,
        }
    }

    /// このランクへの昇格時に付与される無料クレジット
    pub fn credit_bonus(&self) -> u32 {
        match self {
            LoyaltyTier::Basic => 0,
            LoyaltyTier::Silver => 1,
            LoyaltyTier::Gold => 3,
        }
    }

    /// 1つ上のランク（最上位の場合はNone）
    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            LoyaltyTier::Basic => Some(LoyaltyTier::Silver),
            LoyaltyTier::Silver => Some(LoyaltyTier::Gold),
            LoyaltyTier::Gold => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_trims_whitespace() {
        let id = ItemId::new("  B-001 ").unwrap();
        assert_eq!(id.value(), "B-001");
    }

    #[test]
    fn test_item_id_rejects_blank() {
        assert_eq!(ItemId::new("   ").unwrap_err(), IdError::Empty);
        assert_eq!(MemberId::new("").unwrap_err(), IdError::Empty);
    }

    #[test]
    fn test_item_type_parse() {
        assert_eq!("dvd".parse::<ItemType>(), Ok(ItemType::Dvd));
        assert!("vinyl".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_loyalty_tier_levels_are_ordered() {
        assert!(LoyaltyTier::Basic < LoyaltyTier::Silver);
        assert!(LoyaltyTier::Silver < LoyaltyTier::Gold);
        assert_eq!(LoyaltyTier::default().level(), 0);
        assert_eq!(LoyaltyTier::Gold.level(), 2);
        assert_eq!(LoyaltyTier::Gold.next(), None);
    }
}
