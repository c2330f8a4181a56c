#![allow(dead_code)]

use rmcp::model::CallToolResult;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use twitter_automation::{
    AutomationEngine, AutomationError, AutomationSession, ExtractRequest, SessionTemplate,
    WaitUntil,
};
use twitter_mcp_agent::Configuration;

pub fn get_result_text(result: &CallToolResult) -> String {
    let content = result.content.first().expect("Result content is empty");
    let serialized_content =
        serde_json::to_value(content).expect("Failed to serialize content to JSON");

    serialized_content
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            panic!("Expected serialized content to have a 'text' field, but got: {serialized_content}")
        })
}

pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

pub fn test_config(context_id: Option<&str>) -> Configuration {
    Configuration {
        debug: false,
        browserbase_api_key: "bb-test-key".to_string(),
        browserbase_project_id: "proj-test".to_string(),
        openai_api_key: "sk-test".to_string(),
        context_id: context_id.map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init,
    Goto(String, WaitUntil),
    Act(String),
    Extract(String),
    Wait(Duration),
    Close,
}

/// Where a scripted fault is raised
#[derive(Debug, Clone)]
pub enum FaultPoint {
    Init,
    /// First `act` whose instruction contains this text
    Act(String),
    Extract,
}

#[derive(Debug, Clone)]
pub struct Fault {
    pub point: FaultPoint,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub template: SessionTemplate,
    pub calls: Vec<Call>,
}

impl SessionRecord {
    pub fn close_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Close).count()
    }
}

type Log = Arc<Mutex<Vec<SessionRecord>>>;

/// Engine that records every call per session and answers from a script.
#[derive(Clone, Default)]
pub struct MockEngine {
    log: Log,
    extraction: serde_json::Value,
    fault: Option<Fault>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extraction(mut self, extraction: serde_json::Value) -> Self {
        self.extraction = extraction;
        self
    }

    pub fn with_fault(mut self, point: FaultPoint, message: &str) -> Self {
        self.fault = Some(Fault {
            point,
            message: message.to_string(),
        });
        self
    }

    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.log.lock().unwrap().clone()
    }
}

impl AutomationEngine for MockEngine {
    fn new_session(&self, template: SessionTemplate) -> Box<dyn AutomationSession> {
        let mut log = self.log.lock().unwrap();
        log.push(SessionRecord {
            template,
            calls: Vec::new(),
        });
        Box::new(MockSession {
            index: log.len() - 1,
            log: self.log.clone(),
            extraction: self.extraction.clone(),
            fault: self.fault.clone(),
        })
    }
}

pub struct MockSession {
    index: usize,
    log: Log,
    extraction: serde_json::Value,
    fault: Option<Fault>,
}

impl MockSession {
    fn record(&self, call: Call) {
        self.log.lock().unwrap()[self.index].calls.push(call);
    }

    fn fault_at(&self, point: &FaultPoint) -> Result<(), AutomationError> {
        let Some(fault) = &self.fault else {
            return Ok(());
        };
        let hit = match (&fault.point, point) {
            (FaultPoint::Init, FaultPoint::Init) => true,
            (FaultPoint::Extract, FaultPoint::Extract) => true,
            (FaultPoint::Act(needle), FaultPoint::Act(instruction)) => instruction.contains(needle),
            _ => false,
        };
        if hit {
            Err(AutomationError::Server(fault.message.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl AutomationSession for MockSession {
    async fn init(&mut self) -> Result<(), AutomationError> {
        self.record(Call::Init);
        self.fault_at(&FaultPoint::Init)
    }

    async fn goto(&mut self, url: &str, wait_until: WaitUntil) -> Result<(), AutomationError> {
        self.record(Call::Goto(url.to_string(), wait_until));
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn act(&mut self, instruction: &str) -> Result<serde_json::Value, AutomationError> {
        self.record(Call::Act(instruction.to_string()));
        tokio::task::yield_now().await;
        self.fault_at(&FaultPoint::Act(instruction.to_string()))?;
        Ok(serde_json::json!({"success": true}))
    }

    async fn extract(
        &mut self,
        request: ExtractRequest,
    ) -> Result<serde_json::Value, AutomationError> {
        self.record(Call::Extract(request.instruction));
        self.fault_at(&FaultPoint::Extract)?;
        Ok(self.extraction.clone())
    }

    async fn wait_for_timeout(&mut self, duration: Duration) -> Result<(), AutomationError> {
        self.record(Call::Wait(duration));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), AutomationError> {
        self.record(Call::Close);
        Ok(())
    }
}
