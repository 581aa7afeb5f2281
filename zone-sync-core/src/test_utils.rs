//! Test helpers
//!
//! An in-memory [`ZoneConnector`] whose zones change as tasks are applied, plus
//! knobs for scripted rejections, transport failures and slow calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zone_sync_connector::{
    ApplyOutcome, ConnectorError, Record, Result, Task, TaskKind, Zone, ZoneConnector,
};

/// Apply `task` to the zone it names, the way a store would.
pub fn apply_to_zones(zones: &mut [Zone], task: &Task) {
    let Some(zone) = zones.iter_mut().find(|z| z.id == task.zone_id) else {
        return;
    };
    let position = zone
        .records
        .iter()
        .position(|r| r.key() == task.record.key());
    match (task.kind, position) {
        (TaskKind::Add, _) => zone.records.push(task.record.clone()),
        (TaskKind::Update, Some(i)) => zone.records[i] = task.record.clone(),
        (TaskKind::Delete, Some(i)) => {
            zone.records.remove(i);
        }
        (TaskKind::Update | TaskKind::Delete, None) => {}
    }
}

// ===== MockConnector =====

pub struct MockConnector {
    id: &'static str,
    zones: RwLock<Vec<Zone>>,
    /// If Some, `fetch_zones` returns this error
    fetch_error: RwLock<Option<ConnectorError>>,
    /// Record name -> rejection detail
    rejections: RwLock<HashMap<String, String>>,
    /// Record names whose tasks fail with a transport error
    failures: RwLock<HashSet<String>>,
    /// Delay added to `fetch_zones`
    fetch_delay: RwLock<Option<Duration>>,
    /// Delay added to `apply_task`
    apply_delay: RwLock<Option<Duration>>,
    /// Every task received, in order
    received: RwLock<Vec<Task>>,
}

impl MockConnector {
    pub fn new(id: &'static str, zones: Vec<Zone>) -> Self {
        Self {
            id,
            zones: RwLock::new(zones),
            fetch_error: RwLock::new(None),
            rejections: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashSet::new()),
            fetch_delay: RwLock::new(None),
            apply_delay: RwLock::new(None),
            received: RwLock::new(Vec::new()),
        }
    }

    pub fn shared(id: &'static str, zones: Vec<Zone>) -> Arc<Self> {
        Arc::new(Self::new(id, zones))
    }

    pub async fn set_fetch_error(&self, err: Option<ConnectorError>) {
        *self.fetch_error.write().await = err;
    }

    pub async fn reject(&self, record_name: &str, detail: &str) {
        self.rejections
            .write()
            .await
            .insert(record_name.to_string(), detail.to_string());
    }

    pub async fn fail(&self, record_name: &str) {
        self.failures.write().await.insert(record_name.to_string());
    }

    pub async fn set_fetch_delay(&self, delay: Option<Duration>) {
        *self.fetch_delay.write().await = delay;
    }

    pub async fn set_apply_delay(&self, delay: Option<Duration>) {
        *self.apply_delay.write().await = delay;
    }

    pub async fn received(&self) -> Vec<Task> {
        self.received.read().await.clone()
    }

    pub async fn records(&self, zone_id: &str) -> Vec<Record> {
        self.zones
            .read()
            .await
            .iter()
            .find(|z| z.id == zone_id)
            .map(|z| z.records.clone())
            .unwrap_or_default()
    }

    async fn pause(delay: &RwLock<Option<Duration>>) {
        let delay = *delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ZoneConnector for MockConnector {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch_zones(&self) -> Result<Vec<Zone>> {
        Self::pause(&self.fetch_delay).await;
        if let Some(ref err) = *self.fetch_error.read().await {
            return Err(err.clone());
        }
        Ok(self.zones.read().await.clone())
    }

    async fn apply_task(&self, task: &Task) -> Result<ApplyOutcome> {
        self.received.write().await.push(task.clone());
        Self::pause(&self.apply_delay).await;

        if self.failures.read().await.contains(&task.record.name) {
            return Err(ConnectorError::NetworkError {
                connector: self.id.to_string(),
                detail: "connection reset by peer".to_string(),
            });
        }
        if let Some(detail) = self.rejections.read().await.get(&task.record.name) {
            return Ok(ApplyOutcome::rejected(detail.clone()));
        }

        apply_to_zones(&mut self.zones.write().await, task);
        Ok(ApplyOutcome::Applied)
    }
}
