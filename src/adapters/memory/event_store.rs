use crate::domain::events::DomainEvent;
use crate::ports::event_store::{EventStore as EventStoreTrait, Result};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Mutex;

/// 追記専用イベントログのインメモリ実装
#[derive(Debug, Default)]
pub struct EventStore {
    events: Mutex<Vec<DomainEvent>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStoreTrait for EventStore {
    async fn append(&self, events: Vec<DomainEvent>) -> Result<()> {
        let mut log = self.events.lock().map_err(|_| "event store lock poisoned")?;
        log.extend(events);
        Ok(())
    }

    /// 呼び出し時点のログの複製をストリーム配信する
    fn stream_all(&self) -> BoxStream<'static, Result<DomainEvent>> {
        match self.events.lock() {
            Ok(log) => stream::iter(log.clone().into_iter().map(Ok)).boxed(),
            Err(_) => {
                let err: Result<DomainEvent> = Err("event store lock poisoned".into());
                stream::iter(vec![err]).boxed()
            }
        }
    }
}
