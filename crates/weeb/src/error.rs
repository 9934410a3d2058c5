//! Errors.
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("No page matches '{path}'"))]
    NotFound { path: String },

    #[snafu(display("No content is registered at '{path}'"))]
    MissingContent { path: String },

    #[snafu(display("Could not find an element with id '{id}'"))]
    MissingElement { id: String },

    #[snafu(display("No window or document is available"))]
    NoWindow,

    #[snafu(display("Binding failed: {message}"))]
    Js { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
