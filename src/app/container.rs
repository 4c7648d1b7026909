use std::sync::Arc;

use crate::adapters::toml_config::{AppConfig, FONT_SIZE};
use crate::adapters::{FfmpegCliAdapter, FfprobeAdapter, LibavOverlayAdapter, LocalFsAdapter};
use crate::app::reel_interactor::{CaptionSettings, ReelInteractor};
use crate::domain::model::TargetFrame;
use crate::ports::{FsPort, MediaToolPort, OverlayPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn reel_interactor(&self) -> Arc<ReelInteractor>;
}

pub struct DefaultAppContainer {
    reel_interactor: Arc<ReelInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(config.tools.ffprobe.clone()));
        let tool_port = Arc::new(FfmpegCliAdapter::new(
            config.tools.ffmpeg.clone(),
            config.encoding.clone(),
        ));
        let overlay_port = Arc::new(LibavOverlayAdapter::new(config.encoding.clone()));
        let fs_port = Arc::new(LocalFsAdapter::new());

        let captions = CaptionSettings {
            font_path: config.overlay.font_path.clone(),
            font_size: FONT_SIZE,
            frame: TargetFrame::REEL_720,
        };

        let reel_interactor = Arc::new(ReelInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            tool_port as Arc<dyn MediaToolPort>,
            overlay_port as Arc<dyn OverlayPort>,
            fs_port as Arc<dyn FsPort>,
            captions,
        ));

        Self { reel_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn reel_interactor(&self) -> Arc<ReelInteractor> {
        Arc::clone(&self.reel_interactor)
    }
}
