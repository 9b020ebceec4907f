#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod critique;
pub mod error;
pub mod gallery;
pub mod gateway;
pub mod input;
pub mod panels;
pub mod pending;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod texture;
pub mod util;

pub use app::{DoodleApp, View};
pub use config::Config;
pub use critique::{Critic, Critique, CritiqueBackend};
pub use error::{AppError, StoreError, SubmitError, SurfaceError, ValidationError};
pub use gallery::{Artwork, ArtworkId, GalleryStore, Profile, UserId};
pub use gateway::{Museum, Submission, SubmissionMetadata};
pub use input::{InputEvent, InputHandler};
pub use session::{AppState, SessionStore};
pub use stroke::ActiveStroke;
pub use surface::{DrawingSurface, SurfaceConfig, Tool};
