//! Discovery of the renderer executables on the search path.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// The external command-line renderers, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Renderer {
    /// Ruby `asciidoctor`, the preferred renderer.
    Asciidoctor,
    /// Python `asciidoc`, the legacy fallback.
    Asciidoc,
}

impl Renderer {
    /// All renderers, preferred first.
    pub const ALL: [Renderer; 2] = [Renderer::Asciidoctor, Renderer::Asciidoc];

    /// Executable name looked up on the search path.
    pub fn executable(self) -> &'static str {
        match self {
            Renderer::Asciidoctor => "asciidoctor",
            Renderer::Asciidoc => "asciidoc",
        }
    }
}

impl std::fmt::Display for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.executable())
    }
}

/// A renderer found on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRenderer {
    pub renderer: Renderer,
    pub path: PathBuf,
}

/// Finds executables by name.
pub trait ExecutableLocator: Send + Sync {
    fn locate(&self, name: &str) -> Option<PathBuf>;

    /// Probe for each renderer in order of preference and return the first found.
    fn resolve_renderer(&self) -> Option<ResolvedRenderer> {
        Renderer::ALL.into_iter().find_map(|renderer| {
            self.locate(renderer.executable())
                .map(|path| ResolvedRenderer { renderer, path })
        })
    }
}

/// Locator backed by `which`, over `PATH` or an explicit search path.
///
/// Without an explicit search path the `PATH` environment variable is read on
/// every lookup, so installing a renderer mid-run is picked up. An empty
/// search path finds nothing.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search only the given `PATH`-style list of directories.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl ExecutableLocator for PathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            None => which::which(name).ok(),
            Some(path) if path.is_empty() => None,
            Some(path) => {
                let cwd = env::current_dir().ok()?;
                which::which_in(name, Some(path), cwd).ok()
            }
        }
    }
}
