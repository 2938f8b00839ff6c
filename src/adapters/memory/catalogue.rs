use crate::domain::{Item, ItemId};
use crate::ports::catalogue::{Catalogue as CatalogueTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// カタログのインメモリ実装
///
/// 資料はプロセスの生存期間中のみ保持される。
/// ID順に一覧を返すためBTreeMapで保持する。
#[derive(Debug, Default)]
pub struct Catalogue {
    items: Mutex<BTreeMap<ItemId, Item>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogueTrait for Catalogue {
    async fn find_item_by_id(&self, item_id: &ItemId) -> Result<Option<Item>> {
        let items = self.items.lock().map_err(|_| "catalogue lock poisoned")?;
        Ok(items.get(item_id).cloned())
    }

    async fn add(&self, item: Item) -> Result<bool> {
        let mut items = self.items.lock().map_err(|_| "catalogue lock poisoned")?;
        if items.contains_key(item.id()) {
            return Ok(false);
        }
        items.insert(item.id().clone(), item);
        Ok(true)
    }

    async fn save(&self, item: Item) -> Result<()> {
        let mut items = self.items.lock().map_err(|_| "catalogue lock poisoned")?;
        if !items.contains_key(item.id()) {
            return Err(format!("Item {} is not in the catalogue", item.id()).into());
        }
        items.insert(item.id().clone(), item);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>> {
        let items = self.items.lock().map_err(|_| "catalogue lock poisoned")?;
        Ok(items.values().cloned().collect())
    }
}
