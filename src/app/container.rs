use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, LocalFsAdapter, StdProcessAdapter};
use crate::app::compose_interactor::ComposeInteractor;
use crate::config::AppConfig;
use crate::domain::rules::ClipCountRule;
use crate::engine::EncodeSettings;
use crate::ports::{EncodePort, FsPort, ProbePort, ProcessPort};

pub trait AppContainer: Send + Sync {
    fn compose_interactor(&self) -> Arc<ComposeInteractor>;
    fn probe_port(&self) -> Arc<dyn ProbePort>;
    fn encode_settings(&self) -> &EncodeSettings;
}

pub struct DefaultAppContainer {
    compose_interactor: Arc<ComposeInteractor>,
    probe_port: Arc<dyn ProbePort>,
    encoder: Arc<FFmpegAdapter>,
}

impl DefaultAppContainer {
    /// Wire the real adapters from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self::with_process(config, Arc::new(StdProcessAdapter::new()))
    }

    /// Wire the adapters around a given process runner
    pub fn with_process(config: &AppConfig, process: Arc<dyn ProcessPort>) -> Self {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(
            &config.tools.ffprobe,
            &config.tools.ffmpeg,
            Arc::clone(&process),
        ));
        let encoder = Arc::new(FFmpegAdapter::new(
            &config.tools.ffmpeg,
            config.encode.clone(),
            Arc::clone(&process),
        ));
        let fs_port = Arc::new(LocalFsAdapter::new());

        let compose_interactor = Arc::new(ComposeInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&encoder) as Arc<dyn EncodePort>,
            fs_port as Arc<dyn FsPort>,
            config.subtitles.style.clone(),
            ClipCountRule::new(config.composition.min_clips),
        ));

        Self {
            compose_interactor,
            probe_port,
            encoder,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn compose_interactor(&self) -> Arc<ComposeInteractor> {
        Arc::clone(&self.compose_interactor)
    }

    fn probe_port(&self) -> Arc<dyn ProbePort> {
        Arc::clone(&self.probe_port)
    }

    fn encode_settings(&self) -> &EncodeSettings {
        self.encoder.settings()
    }
}
