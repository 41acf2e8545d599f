//! Optional-capability probing.
//!
//! Some exporters depend on backing libraries that are compiled in through
//! cargo features. The orchestrator asks a [`CapabilityProbe`] at call time
//! instead of consulting global flags, so callers (and tests) can simulate a
//! capability being absent.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An optional backing resource needed by one exporter or block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Word-processor document authoring (DOCX).
    DocumentAuthoring,
    /// Page layout and page-description output (PDF).
    PageLayout,
    /// QR code generation and raster image encoding.
    ImageEncoding,
}

impl Capability {
    /// All capabilities, in a stable order.
    pub const ALL: [Capability; 3] = [
        Capability::DocumentAuthoring,
        Capability::PageLayout,
        Capability::ImageEncoding,
    ];

    /// Short machine-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Capability::DocumentAuthoring => "document-authoring",
            Capability::PageLayout => "page-layout",
            Capability::ImageEncoding => "image-encoding",
        }
    }

    /// Cargo feature that compiles the capability in.
    pub fn cargo_feature(self) -> &'static str {
        match self {
            Capability::DocumentAuthoring => "docx",
            Capability::PageLayout => "pdf",
            Capability::ImageEncoding => "qr",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Answers whether a capability is usable right now.
pub trait CapabilityProbe: Send + Sync {
    /// Check a single capability.
    fn is_available(&self, capability: Capability) -> bool;

    /// Capabilities that are currently missing.
    fn missing(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| !self.is_available(*c))
            .collect()
    }
}

/// Probe reporting the capabilities compiled into this build.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl CapabilityProbe for SystemProbe {
    fn is_available(&self, capability: Capability) -> bool {
        match capability {
            Capability::DocumentAuthoring => cfg!(feature = "docx"),
            Capability::PageLayout => cfg!(feature = "pdf"),
            Capability::ImageEncoding => cfg!(feature = "qr"),
        }
    }
}

/// Probe with an explicit capability set.
///
/// A capability is reported available only if it is in the set *and* compiled
/// in, so a static probe can hide capabilities but never invent them.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    available: HashSet<Capability>,
}

impl StaticProbe {
    /// Probe with every capability available.
    pub fn all() -> Self {
        Self {
            available: Capability::ALL.into_iter().collect(),
        }
    }

    /// Probe with no optional capability.
    pub fn none() -> Self {
        Self::default()
    }

    /// Probe with every capability except the given one.
    pub fn without(capability: Capability) -> Self {
        let mut probe = Self::all();
        probe.available.remove(&capability);
        probe
    }

    /// Add a capability.
    pub fn with(mut self, capability: Capability) -> Self {
        self.available.insert(capability);
        self
    }
}

impl CapabilityProbe for StaticProbe {
    fn is_available(&self, capability: Capability) -> bool {
        self.available.contains(&capability) && SystemProbe.is_available(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::DocumentAuthoring.to_string(), "document-authoring");
        assert_eq!(Capability::PageLayout.cargo_feature(), "pdf");
        assert_eq!(Capability::ImageEncoding.cargo_feature(), "qr");
    }

    #[test]
    fn test_static_probe_without() {
        let probe = StaticProbe::without(Capability::DocumentAuthoring);
        assert!(!probe.is_available(Capability::DocumentAuthoring));
        assert!(probe.missing().contains(&Capability::DocumentAuthoring));
    }

    #[test]
    fn test_static_probe_none() {
        let probe = StaticProbe::none();
        assert_eq!(probe.missing().len(), 3);
    }

    #[cfg(all(feature = "docx", feature = "pdf", feature = "qr"))]
    #[test]
    fn test_system_probe_default_features() {
        assert!(SystemProbe.missing().is_empty());
        assert!(StaticProbe::all().missing().is_empty());
    }
}
