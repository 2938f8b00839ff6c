#![allow(dead_code)]

use library_loans::adapters::memory::{Catalogue, EventStore, MemberDirectory, StatisticsStore};
use library_loans::application::loan::{
    EntityLocks, ServiceDependencies, add_item, register_member,
};
use library_loans::domain::commands::{AddItem, RegisterMember};
use library_loans::domain::{ItemId, ItemKind, MemberId};
use std::sync::Arc;

/// テスト用の依存関係（すべてインメモリ）
pub fn create_test_deps() -> ServiceDependencies {
    ServiceDependencies {
        catalogue: Arc::new(Catalogue::new()),
        members: Arc::new(MemberDirectory::new()),
        event_store: Arc::new(EventStore::new()),
        statistics: Arc::new(StatisticsStore::new()),
        locks: Arc::new(EntityLocks::new()),
    }
}

pub fn item_id(value: &str) -> ItemId {
    ItemId::new(value).unwrap()
}

pub fn member_id(value: &str) -> MemberId {
    MemberId::new(value).unwrap()
}

pub async fn seed_book(deps: &ServiceDependencies, id: &str, is_rare: bool) -> ItemId {
    seed_item(
        deps,
        id,
        "The Pragmatic Programmer",
        ItemKind::Book {
            author: "Hunt & Thomas".to_string(),
            is_rare,
        },
    )
    .await
}

pub async fn seed_magazine(deps: &ServiceDependencies, id: &str) -> ItemId {
    seed_item(
        deps,
        id,
        "Monthly Systems",
        ItemKind::Magazine {
            edition: "2024-05".to_string(),
        },
    )
    .await
}

pub async fn seed_dvd(deps: &ServiceDependencies, id: &str) -> ItemId {
    seed_item(
        deps,
        id,
        "Alien",
        ItemKind::Dvd {
            director: "Ridley Scott".to_string(),
        },
    )
    .await
}

async fn seed_item(deps: &ServiceDependencies, id: &str, title: &str, kind: ItemKind) -> ItemId {
    let cmd = AddItem {
        item_id: item_id(id),
        title: title.to_string(),
        kind,
    };
    add_item(deps, cmd).await.unwrap().id().clone()
}

pub async fn seed_member(deps: &ServiceDependencies, id: &str) -> MemberId {
    let cmd = RegisterMember {
        member_id: member_id(id),
        name: "Sari".to_string(),
    };
    register_member(deps, cmd).await.unwrap().id().clone()
}
