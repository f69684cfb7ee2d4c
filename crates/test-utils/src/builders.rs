#![allow(dead_code)]

use std::sync::Arc;

use stagehand::registry::{ActivityItem, RawScenario, Scenario, ScenarioRegistry};
use stagehand::types::FileAction;

/// Builder for `Scenario` to simplify test setup.
pub struct ScenarioBuilder {
    raw: RawScenario,
}

impl ScenarioBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            raw: RawScenario {
                id: id.to_string(),
                ..RawScenario::default()
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.raw.title = title.to_string();
        self
    }

    pub fn mention(mut self, tag: &str) -> Self {
        self.raw.mentions.push(tag.to_string());
        self
    }

    pub fn keyword(mut self, kw: &str) -> Self {
        self.raw.keywords.push(kw.to_string());
        self
    }

    pub fn flow_mode(mut self, mode: &str) -> Self {
        self.raw.flow_mode = Some(mode.to_string());
        self
    }

    pub fn text_item(mut self, id: &str, text: &str) -> Self {
        self.raw.activity.push(ActivityItem::Text {
            id: id.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn file_item(mut self, id: &str, action: FileAction, path: &str, desc: &str) -> Self {
        self.raw.activity.push(ActivityItem::File {
            id: id.to_string(),
            action,
            path: path.to_string(),
            description: desc.to_string(),
        });
        self
    }

    pub fn done_item(mut self, id: &str, text: &str) -> Self {
        self.raw.activity.push(ActivityItem::Done {
            id: id.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// A minimal but realistic activity stream: two narration lines, one
    /// file card, and a done marker.
    pub fn with_default_activity(self) -> Self {
        let id = self.raw.id.clone();
        self.text_item("t1", &format!("Analyzing request for {id}..."))
            .text_item("t2", "Setting up the layout...")
            .file_item("f1", FileAction::Add, "app/page.tsx", "Main page")
            .done_item("d1", "All done!")
    }

    pub fn source_content(mut self, content: &str) -> Self {
        self.raw.source_content = content.to_string();
        self
    }

    pub fn build(self) -> Scenario {
        Scenario::from_raw(self.raw)
    }
}

/// Builder for `ScenarioRegistry`.
pub struct RegistryBuilder {
    scenarios: Vec<Scenario>,
    default_id: Option<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
            default_id: None,
        }
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn default_id(mut self, id: &str) -> Self {
        self.default_id = Some(id.to_string());
        self
    }

    pub fn build(self) -> ScenarioRegistry {
        ScenarioRegistry::new(self.scenarios, self.default_id)
            .expect("Failed to build valid registry from builder")
    }

    pub fn build_arc(self) -> Arc<ScenarioRegistry> {
        Arc::new(self.build())
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
