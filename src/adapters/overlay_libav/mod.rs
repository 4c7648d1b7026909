// Libav overlay adapter - caption rendering through the in-process compositor

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::toml_config::EncodingConfig;
use crate::domain::errors::*;
use crate::domain::model::OverlaySpec;
use crate::engine::OverlayCompositor;
use crate::ports::*;

/// Runs the blocking compositor off the async executor
pub struct LibavOverlayAdapter {
    compositor: OverlayCompositor,
}

impl LibavOverlayAdapter {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            compositor: OverlayCompositor::new(encoding),
        }
    }
}

#[async_trait]
impl OverlayPort for LibavOverlayAdapter {
    async fn render_overlay(
        &self,
        input: &Path,
        output: &Path,
        spec: &OverlaySpec,
    ) -> Result<OverlayReport, DomainError> {
        debug!(
            "Rendering '{}' / '{}' onto {}",
            spec.top_text,
            spec.bottom_text,
            input.display()
        );

        let compositor = self.compositor.clone();
        let input = input.to_path_buf();
        let output = output.to_path_buf();
        let spec = spec.clone();

        tokio::task::spawn_blocking(move || compositor.render(&input, &output, &spec))
            .await
            .map_err(|e| DomainError::Overlay(format!("Overlay task failed: {}", e)))?
    }
}
