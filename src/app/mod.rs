// Application layer - Use case interactors

pub mod container;
pub mod reel_interactor;

pub use container::{AppContainer, DefaultAppContainer};
pub use reel_interactor::{CaptionSettings, ReelInteractor};
