//! pdfsplitter-parse: PDF backend for pdfsplitter-rs.
//!
//! Opens documents, interprets page content streams far enough to recover
//! positioned text runs, and writes page subsets back out as new PDFs. The
//! default implementation is [`LopdfBackend`].

pub mod backend;
mod cmap;
pub mod error;
mod font;
pub mod handler;
mod interpreter;
pub mod lopdf_backend;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use handler::TextHandler;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
pub use pdfsplitter_core;
