//! Scripted override providers for precedence scenarios.

use config_overrides::{OverrideCollector, OverrideProvider, OverrideResult, ValueMap};

/// Provider that replays a fixed list of `set_override` calls.
pub struct ScriptedProvider {
    id: &'static str,
    priority: i32,
    calls: Vec<(&'static str, ValueMap)>,
}

impl ScriptedProvider {
    /// Creates a provider with no scripted calls.
    pub const fn new(id: &'static str, priority: i32) -> Self {
        Self {
            id,
            priority,
            calls: Vec::new(),
        }
    }

    /// Appends a scripted call.
    pub fn sets(mut self, name: &'static str, values: ValueMap) -> Self {
        self.calls.push((name, values));
        self
    }
}

impl OverrideProvider for ScriptedProvider {
    fn id(&self) -> &str {
        self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn provide(&self, collector: &mut OverrideCollector) -> OverrideResult<()> {
        for (name, values) in &self.calls {
            collector.set_override(name, values.clone());
        }
        Ok(())
    }
}
