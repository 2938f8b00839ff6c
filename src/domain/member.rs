use serde::Serialize;

use super::{LoyaltyTier, MemberId};

/// 会員
///
/// 不変条件：
/// - `tier`は`successful_returns`の単調非減少な階段関数（降格なし）
/// - `free_credits`はランクアップでのみ増え、クレジットを使った貸出でのみ減る
///
/// カウンタは非公開とし、貸出・返却・ランク判定の純粋関数からのみ更新する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    id: MemberId,
    name: String,
    tier: LoyaltyTier,
    free_credits: u32,
    total_loan_attempts: u32,
    successful_returns: u32,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tier: LoyaltyTier::Basic,
            free_credits: 0,
            total_loan_attempts: 0,
            successful_returns: 0,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> LoyaltyTier {
        self.tier
    }

    pub fn free_credits(&self) -> u32 {
        self.free_credits
    }

    pub fn total_loan_attempts(&self) -> u32 {
        self.total_loan_attempts
    }

    pub fn successful_returns(&self) -> u32 {
        self.successful_returns
    }

    pub(super) fn record_loan(self, consume_credit: bool) -> Self {
        let free_credits = if consume_credit {
            self.free_credits.saturating_sub(1)
        } else {
            self.free_credits
        };
        Self {
            free_credits,
            total_loan_attempts: self.total_loan_attempts.saturating_add(1),
            ..self
        }
    }

    pub(super) fn record_return(self) -> Self {
        Self {
            successful_returns: self.successful_returns.saturating_add(1),
            ..self
        }
    }

    pub(super) fn promote(self, tier: LoyaltyTier, credits_granted: u32) -> Self {
        Self {
            tier: tier.max(self.tier),
            free_credits: self.free_credits.saturating_add(credits_granted),
            ..self
        }
    }
}
