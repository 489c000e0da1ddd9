//! Blog module - Posts and the admin post form.

mod errors;
mod form;
mod post;

pub use errors::PostError;
pub use form::{DeleteForm, PostForm, PostFormErrors};
pub use post::{Post, PostInput};
