//! AsciiDoc to HTML conversion through the `asciidoctor` and `asciidoc`
//! command-line renderers.
//!
//! See [`asciidoc`] for the converter and [`config`] for the configuration file.

pub mod asciidoc;
pub mod config;
pub mod exit_codes;
pub mod file_processor;
pub mod parallel;

pub use asciidoc::{AsciidocConverter, ConvertError, DocumentContext, RendererConfig, supports};
pub use config::Config;
