use chrono::{DateTime, Utc};

use super::{LoyaltyTier, Member, TierUpgraded};

/// 純粋関数：返却成功回数から到達すべきランク
pub fn tier_for_returns(successful_returns: u32) -> LoyaltyTier {
    let mut tier = LoyaltyTier::Basic;
    while let Some(next) = tier.next() {
        if successful_returns < next.required_returns() {
            break;
        }
        tier = next;
    }
    tier
}

/// 純粋関数：ランク判定
///
/// ビジネスルール：
/// - 返却成功5回でSilver（+1クレジット）
/// - 返却成功10回でGold（+3クレジット）
/// - 降格はしない
/// - 以前のランクアップで付与したクレジットは取り消さない
///
/// 返却イベントごとに1回だけ呼ばれる。複数ランクを一度に越えた場合は
/// 越えたすべてのランクのクレジットを付与する。
/// 副作用なし。昇格した場合は新しいMemberとイベントを返す。
pub fn evaluate(member: Member, at: DateTime<Utc>) -> (Member, Option<TierUpgraded>) {
    let from = member.tier();
    let to = tier_for_returns(member.successful_returns());

    if to <= from {
        return (member, None);
    }

    let mut credits_granted = 0;
    let mut tier = from;
    while let Some(next) = tier.next() {
        if next > to {
            break;
        }
        credits_granted += next.credit_bonus();
        tier = next;
    }

    let event = TierUpgraded {
        member_id: member.id().clone(),
        from,
        to,
        credits_granted,
        upgraded_at: at,
    };

    (member.promote(to, credits_granted), Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberId;

    fn member_with_returns(count: u32) -> Member {
        let mut member = Member::new(MemberId::new("M-1").unwrap(), "Ayu");
        for _ in 0..count {
            member = member.record_return();
        }
        member
    }

    #[test]
    fn test_tier_for_returns_thresholds() {
        assert_eq!(tier_for_returns(0), LoyaltyTier::Basic);
        assert_eq!(tier_for_returns(4), LoyaltyTier::Basic);
        assert_eq!(tier_for_returns(5), LoyaltyTier::Silver);
        assert_eq!(tier_for_returns(9), LoyaltyTier::Silver);
        assert_eq!(tier_for_returns(10), LoyaltyTier::Gold);
        assert_eq!(tier_for_returns(250), LoyaltyTier::Gold);
    }

    #[test]
    fn test_no_upgrade_below_threshold() {
        let (member, event) = evaluate(member_with_returns(4), Utc::now());
        assert!(event.is_none());
        assert_eq!(member.tier(), LoyaltyTier::Basic);
        assert_eq!(member.free_credits(), 0);
    }

    #[test]
    fn test_silver_grants_one_credit() {
        let (member, event) = evaluate(member_with_returns(5), Utc::now());
        let event = event.unwrap();
        assert_eq!(event.from, LoyaltyTier::Basic);
        assert_eq!(event.to, LoyaltyTier::Silver);
        assert_eq!(event.credits_granted, 1);
        assert_eq!(member.tier(), LoyaltyTier::Silver);
        assert_eq!(member.free_credits(), 1);
    }

    #[test]
    fn test_step_by_step_progression_accumulates_credits() {
        let mut member = Member::new(MemberId::new("M-1").unwrap(), "Ayu");
        let mut upgrades = Vec::new();
        for _ in 0..10 {
            let (next, event) = evaluate(member.record_return(), Utc::now());
            member = next;
            upgrades.extend(event);
        }

        assert_eq!(upgrades.len(), 2);
        assert_eq!(upgrades[1].to, LoyaltyTier::Gold);
        assert_eq!(upgrades[1].credits_granted, 3);
        assert_eq!(member.tier(), LoyaltyTier::Gold);
        assert_eq!(member.free_credits(), 4);
    }

    #[test]
    fn test_skipping_tiers_grants_all_bonuses() {
        let (member, event) = evaluate(member_with_returns(10), Utc::now());
        assert_eq!(event.unwrap().credits_granted, 4);
        assert_eq!(member.free_credits(), 4);
    }

    #[test]
    fn test_gold_is_terminal() {
        let (member, _) = evaluate(member_with_returns(10), Utc::now());
        let (member, event) = evaluate(member.record_return(), Utc::now());
        assert!(event.is_none());
        assert_eq!(member.tier(), LoyaltyTier::Gold);
        assert_eq!(member.free_credits(), 4);
    }
}
