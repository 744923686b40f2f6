//! Shadow DOM
//!
//! A shadow root is a separate tree root in the arena. Its children are
//! ordinary nodes, but walking the light tree never descends into it; a
//! caller that wants shadow content has to visit each root explicitly.

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    /// Parse the `shadowrootmode` attribute value
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    /// Host element
    pub host: NodeId,
    /// Mode (open/closed). Closed roots are hidden from page scripts,
    /// not from the engine.
    pub mode: ShadowRootMode,
    /// Whether this came from declarative shadow DOM
    pub declarative: bool,
}

impl ShadowRoot {
    /// Create a new shadow root
    pub fn new(host: NodeId, mode: ShadowRootMode) -> Self {
        Self {
            host,
            mode,
            declarative: false,
        }
    }

    /// Create a declarative shadow root
    pub fn declarative(host: NodeId, mode: ShadowRootMode) -> Self {
        Self {
            host,
            mode,
            declarative: true,
        }
    }

    /// Whether page scripts could reach this root through `element.shadowRoot`
    pub fn is_open(&self) -> bool {
        self.mode == ShadowRootMode::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_root() {
        let shadow = ShadowRoot::new(NodeId(1), ShadowRootMode::Open);
        assert!(shadow.is_open());
        assert!(!shadow.declarative);
    }

    #[test]
    fn test_mode_from_attr() {
        assert_eq!(ShadowRootMode::from_attr("open"), Some(ShadowRootMode::Open));
        assert_eq!(ShadowRootMode::from_attr(" Closed "), Some(ShadowRootMode::Closed));
        assert_eq!(ShadowRootMode::from_attr("bogus"), None);
    }
}
