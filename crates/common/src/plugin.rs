//! Plugin renderer registry.
//!
//! Renderers announce themselves to Prebid Server through
//! `ext.prebid.sdk.renderers` so bidders can return creatives only those
//! renderers understand. The SDK's own renderer is always registered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::constants::SDK_VERSION;

pub const PREBID_MOBILE_RENDERER_NAME: &str = "PrebidRenderer";
pub const RENDERERS_KEY: &str = "renderers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRenderer {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Json>,
}

impl PluginRenderer {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            data: None,
        }
    }

    fn prebid_default() -> Self {
        Self::new(PREBID_MOBILE_RENDERER_NAME, SDK_VERSION)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginRendererRegistry {
    custom: Vec<PluginRenderer>,
}

impl PluginRendererRegistry {
    /// Registers a renderer, replacing any renderer with the same name.
    /// The default renderer cannot be replaced.
    pub fn register(&mut self, renderer: PluginRenderer) {
        if renderer.name == PREBID_MOBILE_RENDERER_NAME {
            log::warn!("Ignoring registration of reserved renderer name {PREBID_MOBILE_RENDERER_NAME}");
            return;
        }
        self.unregister(&renderer.name);
        self.custom.push(renderer);
    }

    pub fn unregister(&mut self, name: &str) {
        self.custom.retain(|renderer| renderer.name != name);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == PREBID_MOBILE_RENDERER_NAME || self.custom.iter().any(|r| r.name == name)
    }

    /// Custom renderers in registration order followed by the default one.
    #[must_use]
    pub fn renderers(&self) -> Vec<PluginRenderer> {
        let mut renderers = self.custom.clone();
        renderers.push(PluginRenderer::prebid_default());
        renderers
    }

    /// `ext.prebid.sdk` object, or `None` when only the default renderer is
    /// registered.
    #[must_use]
    pub fn sdk_json(&self) -> Option<Json> {
        if self.custom.is_empty() {
            return None;
        }
        let renderers = serde_json::to_value(self.renderers()).ok()?;
        let mut sdk = Map::new();
        sdk.insert(RENDERERS_KEY.to_string(), renderers);
        Some(Json::Object(sdk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_only_registry_emits_nothing() {
        let registry = PluginRendererRegistry::default();
        assert!(registry.sdk_json().is_none());
        assert!(registry.contains(PREBID_MOBILE_RENDERER_NAME));
        assert_eq!(registry.renderers().len(), 1);
    }

    #[test]
    fn custom_renderer_is_listed_before_default() {
        let mut registry = PluginRendererRegistry::default();
        registry.register(PluginRenderer::new("FakePlugin", "1.0"));

        let sdk = registry.sdk_json().expect("should emit sdk object");
        let renderers = sdk[RENDERERS_KEY].as_array().expect("should be array");
        assert_eq!(renderers.len(), 2);
        assert_eq!(renderers[0]["name"], "FakePlugin");
        assert_eq!(renderers[0]["version"], "1.0");
        assert_eq!(renderers[1]["name"], PREBID_MOBILE_RENDERER_NAME);
    }

    #[test]
    fn default_renderer_cannot_be_replaced_or_removed() {
        let mut registry = PluginRendererRegistry::default();
        registry.register(PluginRenderer::new(PREBID_MOBILE_RENDERER_NAME, "0.0"));
        registry.unregister(PREBID_MOBILE_RENDERER_NAME);
        assert!(registry.sdk_json().is_none());
        assert_eq!(registry.renderers()[0].version, SDK_VERSION);
    }

    #[test]
    fn re_registering_replaces_renderer() {
        let mut registry = PluginRendererRegistry::default();
        registry.register(PluginRenderer::new("FakePlugin", "1.0"));
        registry.register(PluginRenderer::new("FakePlugin", "2.0"));
        let renderers = registry.renderers();
        assert_eq!(renderers.len(), 2);
        assert_eq!(renderers[0].version, "2.0");

        registry.unregister("FakePlugin");
        assert!(registry.sdk_json().is_none());
    }
}
