mod catalog;
mod sound;
mod token;
mod user;

pub use catalog::{CatalogResponse, SoundCatalog};
pub use sound::Sound;
pub use token::SessionToken;
pub use user::UserInfo;
