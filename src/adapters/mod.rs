// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod overlay_libav;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FfmpegCliAdapter;
pub use fs_local::LocalFsAdapter;
pub use overlay_libav::LibavOverlayAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::TomlConfigAdapter;
