#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use china_explorer::{
    ContentBackend, Engine, EngineHandle, ExplorerConfig, ExplorerError, GenerationRequest,
    Snapshot,
};
use serde_json::{Value, json};
use tokio::sync::Notify;

/// Prompt fragment that identifies an "explore more" request
pub const EXPLORE: &str = "Suggest ";

pub fn enrichment_key(location_name: &str) -> String {
    format!("analysis of {location_name} (China)")
}

pub fn search_key(theme: &str) -> String {
    format!("suit \"{theme}\"")
}

enum Reply {
    Json(Value),
    Fail,
}

/// In-memory backend answering by prompt fragment.
///
/// A held fragment blocks every matching call until `release` is called
/// once per blocked call.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<Vec<(String, Reply)>>,
    gates: Mutex<Vec<(String, Arc<Notify>)>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, key: impl Into<String>, value: Value) {
        self.replies.lock().unwrap().push((key.into(), Reply::Json(value)));
    }

    pub fn fail(&self, key: impl Into<String>) {
        self.replies.lock().unwrap().push((key.into(), Reply::Fail));
    }

    pub fn hold(&self, key: impl Into<String>) {
        self.gates
            .lock()
            .unwrap()
            .push((key.into(), Arc::new(Notify::new())));
    }

    pub fn release(&self, key: &str) {
        let gates = self.gates.lock().unwrap();
        if let Some((_, gate)) = gates.iter().find(|(k, _)| k == key) {
            gate.notify_one();
        }
    }

    pub fn calls(&self, key: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|prompt| prompt.contains(key))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerationRequest) -> china_explorer::Result<Value> {
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let gate = self
            .gates
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, gate)| Arc::clone(gate));
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let replies = self.replies.lock().unwrap();
        match replies
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
        {
            Some((_, Reply::Json(value))) => Ok(value.clone()),
            Some((_, Reply::Fail)) => Err(ExplorerError::backend("scripted failure")),
            None => Err(ExplorerError::backend("no scripted reply")),
        }
    }
}

pub fn test_config() -> ExplorerConfig {
    let mut config = ExplorerConfig::default();
    config.backend.timeout_seconds = 2;
    config.discovery.notice_seconds = 1;
    config
}

pub fn start(backend: &Arc<ScriptedBackend>) -> EngineHandle {
    Engine::spawn(&test_config(), Arc::clone(backend) as Arc<dyn ContentBackend>)
}

/// Wait for a published snapshot matching `predicate`
pub async fn wait_for(
    handle: &EngineHandle,
    predicate: impl FnMut(&Snapshot) -> bool,
) -> Snapshot {
    let mut updates = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(predicate))
        .await
        .expect("timed out waiting for snapshot")
        .expect("engine stopped")
        .clone()
}

/// Give spawned completions time to land, then round-trip through the engine queue
pub async fn settle(handle: &EngineHandle) -> Snapshot {
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.toggle_favorite("__settle__").await.unwrap();
    handle.toggle_favorite("__settle__").await.unwrap()
}

pub fn dossier(food: &str) -> Value {
    json!({ "food": [food] })
}

pub fn discovered(name: &str, lat: f64, lng: f64) -> Value {
    json!({
        "name": name,
        "category": "heritage",
        "coordinates": { "lat": lat, "lng": lng },
        "specialtyTitle": "英歌舞",
        "specialtyDescription": "潮汕地区的传统民俗舞蹈。",
        "distanceFromShanghaiKm": 1350,
        "driveTimeHours": 15,
        "tollCostCNY": 680,
        "selfDrivingFriendly": false,
        "tags": ["民俗"]
    })
}
