use crate::domain::{ItemId, MemberId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard, OwnedMutexGuard};

type LockTable<K> = Mutex<HashMap<K, Arc<AsyncMutex<()>>>>;

/// 資料・会員ごとの排他ロック
///
/// 貸出・返却は1つの資料と1人の会員だけを更新するため、
/// ロックはエンティティ単位で十分（エンティティをまたぐトランザクションは不要）。
/// デッドロックを避けるため、取得順は常に「資料 → 会員 → ジャーナル」とする。
///
/// ロック表のエントリは最後のガードが解放された時点で削除される。
/// 表の大きさは同時に処理中のエンティティ数までしか増えない。
#[derive(Debug, Default)]
pub struct EntityLocks {
    items: LockTable<ItemId>,
    members: LockTable<MemberId>,
    journal: AsyncMutex<()>,
}

/// エンティティロックのガード
///
/// ドロップ時にロックを解放し、待機者がいなければロック表から自身のエントリを削除する。
#[must_use]
#[derive(Debug)]
pub struct EntityGuard<'a, K: Eq + Hash> {
    table: &'a LockTable<K>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash> Drop for EntityGuard<'_, K> {
    fn drop(&mut self) {
        // 表のロックを保持したまま判定するため、判定中に新しい待機者は割り込めない
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.guard.take());
        let idle = table
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            table.remove(&self.key);
        }
    }
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_item(&self, item_id: &ItemId) -> EntityGuard<'_, ItemId> {
        acquire(&self.items, item_id).await
    }

    pub async fn lock_member(&self, member_id: &MemberId) -> EntityGuard<'_, MemberId> {
        acquire(&self.members, member_id).await
    }

    /// イベントログと月次統計の更新を直列化するロック
    ///
    /// 追記と集計反映の間に統計リセットが割り込まないようにする。
    pub async fn lock_journal(&self) -> MutexGuard<'_, ()> {
        self.journal.lock().await
    }

    /// ロック表に残っている資料エントリ数
    pub fn tracked_items(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// ロック表に残っている会員エントリ数
    pub fn tracked_members(&self) -> usize {
        self.members.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

async fn acquire<'a, K: Eq + Hash + Clone>(table: &'a LockTable<K>, key: &K) -> EntityGuard<'a, K> {
    let lock = {
        let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(key.clone()).or_default())
    };
    let guard = lock.lock_owned().await;
    EntityGuard {
        table,
        key: key.clone(),
        guard: Some(guard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_item_is_serialized() {
        let locks = Arc::new(EntityLocks::new());
        let item_id = ItemId::new("D-1").unwrap();

        let guard = locks.lock_item(&item_id).await;

        let contender = {
            let locks = Arc::clone(&locks);
            let item_id = item_id.clone();
            tokio::spawn(async move {
                let _guard = locks.lock_item(&item_id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
        assert_eq!(locks.tracked_items(), 0);
    }

    #[tokio::test]
    async fn test_different_entities_do_not_block() {
        let locks = EntityLocks::new();
        let _item = locks.lock_item(&ItemId::new("D-1").unwrap()).await;
        let _other = locks.lock_item(&ItemId::new("D-2").unwrap()).await;
        let _member = locks.lock_member(&MemberId::new("M-1").unwrap()).await;
        assert_eq!(locks.tracked_items(), 2);
        assert_eq!(locks.tracked_members(), 1);
    }

    #[tokio::test]
    async fn test_entries_removed_after_release() {
        let locks = EntityLocks::new();
        for n in 0..100 {
            let _item = locks.lock_item(&ItemId::new(format!("X-{n}")).unwrap()).await;
            let _member = locks.lock_member(&MemberId::new(format!("U-{n}")).unwrap()).await;
        }
        assert_eq!(locks.tracked_items(), 0);
        assert_eq!(locks.tracked_members(), 0);
    }

    #[tokio::test]
    async fn test_entry_kept_while_waiter_pending() {
        let locks = Arc::new(EntityLocks::new());
        let item_id = ItemId::new("D-1").unwrap();

        let guard = locks.lock_item(&item_id).await;
        let waiter = {
            let locks = Arc::clone(&locks);
            let item_id = item_id.clone();
            tokio::spawn(async move {
                let _guard = locks.lock_item(&item_id).await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(guard);
        assert_eq!(locks.tracked_items(), 1);

        waiter.await.unwrap();
        assert_eq!(locks.tracked_items(), 0);
    }
}
