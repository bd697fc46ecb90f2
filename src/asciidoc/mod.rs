//! AsciiDoc conversion using external renderers.
//!
//! No AsciiDoc is parsed here. Documents are piped through `asciidoctor`, or
//! the older Python `asciidoc` when that is all that is installed, and the HTML
//! they print is returned as-is.
//!
//! # Configuration
//!
//! ```toml
//! [asciidoc]
//! backend = "html5"
//! extensions = ["asciidoctor-diagram"]
//! no-header-or-footer = true
//! safe-mode = "safe"
//! working-folder-current = false
//! ```
//!
//! Backend, safe mode and extensions are checked against fixed whitelists before
//! they reach a command line; anything else is logged and left out.
//!
//! # Collaborators
//!
//! The converter talks to the outside world through three small traits so
//! tests can replace each of them:
//! - [`ExecutableLocator`] finds the renderer on the search path
//! - [`ProcessRunner`] runs it with the document on stdin
//! - [`SettingsProvider`] supplies the global `destination` setting

pub mod config;
pub mod converter;
pub mod executor;
pub mod locator;
pub mod settings;

pub use config::{
    BACKEND_WHITELIST, EXTENSION_WHITELIST, InvalidValue, RendererConfig, SAFE_MODE_WHITELIST, Whitelist,
};
pub use converter::{AsciidocConverter, CONVERTER_NAME, ConvertError, DocumentContext, DocumentConverter, supports};
pub use executor::{CommandRunner, ExecutorError, ProcessOutput, ProcessRunner};
pub use locator::{ExecutableLocator, PathLocator, Renderer, ResolvedRenderer};
pub use settings::{DESTINATION_KEY, NoSettings, SettingsProvider};
