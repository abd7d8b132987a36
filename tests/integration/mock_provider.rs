//! A scripted `LlmProvider` for integration tests.
//!
//! Replies are queued per request purpose. A reply can be gated so the call
//! stays pending until the test releases it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use supplement_advisor::services::advisor::HealthAdvisor;
use supplement_advisor::services::credentials::CredentialStore;
use supplement_advisor_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, ProviderConfig,
};

pub const FOLLOW_UPS: &str = "follow_up_questions";
pub const ANALYSIS: &str = "health_analysis";
pub const RECOMMENDATIONS: &str = "recommendations";

struct Scripted {
    reply: LlmResult<LlmResponse>,
    gate: Option<oneshot::Receiver<()>>,
}

/// One observed `generate` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub purpose: Option<String>,
    pub api_key: Option<String>,
    pub prompt: String,
}

#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
    config: ProviderConfig,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, purpose: &str, scripted: Scripted) {
        self.replies
            .lock()
            .unwrap()
            .entry(purpose.to_string())
            .or_default()
            .push_back(scripted);
    }

    /// Queue a text reply for `purpose`.
    pub fn reply(&self, purpose: &str, text: &str) {
        self.push(
            purpose,
            Scripted {
                reply: Ok(response(text)),
                gate: None,
            },
        );
    }

    /// Queue an error for `purpose`.
    pub fn fail(&self, purpose: &str, error: LlmError) {
        self.push(
            purpose,
            Scripted {
                reply: Err(error),
                gate: None,
            },
        );
    }

    /// Queue a reply that is held back until the returned sender fires.
    pub fn gated_reply(&self, purpose: &str, text: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(
            purpose,
            Scripted {
                reply: Ok(response(text)),
                gate: Some(rx),
            },
        );
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, purpose: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.purpose.as_deref() == Some(purpose))
            .count()
    }
}

fn response(text: &str) -> LlmResponse {
    LlmResponse {
        content: text.to_string(),
        model: "scripted".to_string(),
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        prompt: &str,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let purpose = request_options.purpose.clone().unwrap_or_default();
        self.calls.lock().unwrap().push(RecordedCall {
            purpose: request_options.purpose.clone(),
            api_key: request_options.api_key.clone(),
            prompt: prompt.to_string(),
        });

        let scripted = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&purpose)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted { reply, gate }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                reply
            }
            None => Err(LlmError::Other {
                message: format!("no scripted reply for '{}'", purpose),
            }),
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Advisor over `provider` with `key` configured.
pub fn advisor_with(provider: &Arc<ScriptedProvider>, key: Option<&str>) -> Arc<HealthAdvisor> {
    Arc::new(HealthAdvisor::new(
        provider.clone(),
        CredentialStore::with_credential(key.map(str::to_string)),
    ))
}

pub const VALID_QUESTIONS: &str = r#"[
  {"id": "afternoon_energy", "question": "When does your energy dip?", "type": "select", "options": ["Morning", "Afternoon", "Evening"]},
  {"id": "caffeine", "question": "Rate your caffeine reliance", "type": "scale"},
  {"id": "sleep_notes", "question": "Describe your bedtime routine", "type": "text"}
]"#;

pub const OTHER_QUESTIONS: &str = r#"[
  {"id": "second_1", "question": "Which meals do you skip?", "type": "checkbox", "options": ["Breakfast", "Lunch", "Dinner"]},
  {"id": "second_2", "question": "Rate your workday stress", "type": "scale"},
  {"id": "second_3", "question": "Anything else we should know?", "type": "text"}
]"#;

pub const VALID_RECOMMENDATIONS: &str = r#"Here you go:
```json
[
  {"id": 1, "name": "Vitamin D3", "dosage": "1000 IU daily", "priority": "high", "category": "Basic Essentials", "reason": "Low sun exposure", "benefits": ["Mood"], "timing": "Morning"},
  {"id": 2, "name": "Magnesium Citrate", "dosage": "200mg", "priority": "high", "category": "Basic Essentials", "reason": "Sleep", "benefits": ["Sleep"], "timing": "Evening"},
  {"id": 3, "name": "Fish Oil Omega-3", "dosage": "1g", "priority": "medium", "category": "Basic Essentials", "reason": "Heart", "benefits": [], "timing": "With meals"},
  {"id": 4, "name": "Ashwagandha", "dosage": "300mg", "priority": "medium", "category": "Advanced Support", "reason": "Stress", "benefits": ["Calm"], "timing": "Evening"},
  {"id": 5, "name": "Zinc", "dosage": "15mg", "priority": "low", "category": "Advanced Support", "reason": "Immunity", "benefits": ["Immune"], "timing": "With dinner"}
]
```"#;
