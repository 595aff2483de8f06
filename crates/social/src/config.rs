//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::codec::{AccessorCodec, CodecPolicy, DirectCodec, GraphCodec};
use crate::wire::WireLayout;

/// Which codec to build and how it lays out its output.
///
/// Missing fields fall back to their defaults (`accessors`, `pretty`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub policy: CodecPolicy,
    pub layout: WireLayout,
}

impl CodecConfig {
    pub fn new(policy: CodecPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: WireLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Read a configuration from a JSON object such as `{"policy": "direct"}`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Build the configured codec.
    pub fn build(&self) -> Box<dyn GraphCodec> {
        match self.policy {
            CodecPolicy::Accessors => Box::new(AccessorCodec::with_layout(self.layout)),
            CodecPolicy::Direct => Box::new(DirectCodec::with_layout(self.layout)),
        }
    }
}
