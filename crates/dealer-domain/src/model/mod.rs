//! Domain model types

mod form;
mod picture;

pub use form::CarForm;
pub use picture::placeholder_image;
