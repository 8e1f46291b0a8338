//! Native graphics context probe
//!
//! Stands in for creating a canvas and asking it for a WebGL context: on
//! Linux a context is available when the kernel exposes a DRM render node,
//! on macOS and Windows the system GPU API is always present.

use super::{ContextFlavor, GraphicsContext, GraphicsContextProvider, ProbeError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_DEVICE_DIR: &str = "/dev/dri";
const RENDER_NODE_PREFIX: &str = "renderD";

/// Platform graphics provider
#[derive(Debug, Clone)]
pub struct PlatformGraphicsProvider {
    device_dir: PathBuf,
}

impl Default for PlatformGraphicsProvider {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
        }
    }
}

impl PlatformGraphicsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a different directory for render nodes (Linux only)
    pub fn with_device_dir(device_dir: impl Into<PathBuf>) -> Self {
        Self {
            device_dir: device_dir.into(),
        }
    }

    #[cfg(target_os = "linux")]
    fn platform_renderer(&self) -> Result<Option<String>, ProbeError> {
        find_render_node(&self.device_dir)
    }

    #[cfg(target_os = "macos")]
    fn platform_renderer(&self) -> Result<Option<String>, ProbeError> {
        Ok(Some("Metal".to_string()))
    }

    #[cfg(target_os = "windows")]
    fn platform_renderer(&self) -> Result<Option<String>, ProbeError> {
        Ok(Some("Direct3D".to_string()))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    fn platform_renderer(&self) -> Result<Option<String>, ProbeError> {
        Ok(None)
    }
}

impl GraphicsContextProvider for PlatformGraphicsProvider {
    fn acquire_context(
        &self,
        flavor: ContextFlavor,
    ) -> Result<Option<GraphicsContext>, ProbeError> {
        let renderer = self.platform_renderer()?;
        Ok(renderer.map(|renderer| GraphicsContext { flavor, renderer }))
    }
}

/// Look for a `renderD*` node in `dir`
///
/// A missing directory means no GPU is exposed; any other read failure is
/// reported as an error.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn find_render_node(dir: &Path) -> Result<Option<String>, ProbeError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ProbeError::Platform(format!(
                "cannot list {}: {}",
                dir.display(),
                e
            )))
        }
    };

    let mut nodes: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(RENDER_NODE_PREFIX))
        .collect();
    nodes.sort();

    Ok(nodes
        .into_iter()
        .next()
        .map(|node| format!("DRM render node {}", dir.join(node).display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_render_node_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let result = find_render_node(&temp.path().join("absent")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_find_render_node_without_render_nodes() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("card0"), "").unwrap();
        let result = find_render_node(temp.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_find_render_node_picks_first() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("card0"), "").unwrap();
        std::fs::write(temp.path().join("renderD129"), "").unwrap();
        std::fs::write(temp.path().join("renderD128"), "").unwrap();

        let renderer = find_render_node(temp.path()).unwrap().unwrap();
        assert!(renderer.ends_with("renderD128"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_provider_uses_device_dir() {
        let temp = tempfile::tempdir().unwrap();
        let provider = PlatformGraphicsProvider::with_device_dir(temp.path());
        assert!(provider
            .acquire_context(ContextFlavor::WebGl)
            .unwrap()
            .is_none());

        std::fs::write(temp.path().join("renderD128"), "").unwrap();
        let context = provider
            .acquire_context(ContextFlavor::ExperimentalWebGl)
            .unwrap()
            .unwrap();
        assert_eq!(context.flavor, ContextFlavor::ExperimentalWebGl);
    }

    #[test]
    fn test_provider_default_runs() {
        // result depends on the host, only check it does not panic
        let _ = PlatformGraphicsProvider::new().acquire_context(ContextFlavor::WebGl);
    }
}
