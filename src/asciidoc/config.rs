//! Renderer options and the whitelists that guard them.
//!
//! Every value in [`RendererConfig`] that ends up on a command line is checked
//! against a fixed [`Whitelist`] first. Values outside the whitelist are dropped
//! by the argument builder; nothing here fails.

use serde::{Deserialize, Serialize};

/// A fixed set of accepted values. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Copy)]
pub struct Whitelist {
    name: &'static str,
    values: &'static [&'static str],
}

impl Whitelist {
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }

    /// Human readable name used in diagnostics ("backend", "safe mode", ...).
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }
}

/// Output formats the renderer may be asked for with `-b`.
pub static BACKEND_WHITELIST: Whitelist = Whitelist::new(
    "backend",
    &["html5", "html5s", "xhtml5", "docbook5", "docbook45", "manpage"],
);

/// Safe modes accepted by `--safe-mode`. The renderer itself defaults to `unsafe`.
pub static SAFE_MODE_WHITELIST: Whitelist =
    Whitelist::new("safe mode", &["unsafe", "safe", "server", "secure"]);

/// Ruby extensions that may be loaded with `-r`.
pub static EXTENSION_WHITELIST: Whitelist = Whitelist::new(
    "extension",
    &[
        "asciidoctor-html5s",
        "asciidoctor-diagram",
        "asciidoctor-interdoc-reftext",
        "asciidoctor-katex",
        "asciidoctor-latex",
        "asciidoctor-question",
        "asciidoctor-rouge",
    ],
);

/// Options for a single AsciiDoc conversion, shared by every document of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Output format, passed as `-b` when whitelisted (default: html5)
    pub backend: String,

    /// Document type (default: article). Not passed to the renderer.
    pub doc_type: String,

    /// Extensions to load, in order, each passed as `-r` when whitelisted
    pub extensions: Vec<String>,

    /// Emit an embeddable document without header and footer (default: true)
    pub no_header_or_footer: bool,

    /// Renderer safe mode (default: safe)
    pub safe_mode: String,

    /// Number section titles
    pub section_numbers: bool,

    /// Ask the renderer for verbose diagnostics
    pub verbose: bool,

    /// Resolve relative paths against the document's own directory and an
    /// explicit output directory under the destination
    pub working_folder_current: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            backend: "html5".to_string(),
            doc_type: "article".to_string(),
            extensions: Vec::new(),
            no_header_or_footer: true,
            safe_mode: "safe".to_string(),
            section_numbers: false,
            verbose: false,
            working_folder_current: false,
        }
    }
}

/// A configured value that the argument builder will drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    pub whitelist: &'static str,
    pub value: String,
}

impl std::fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported {} '{}'", self.whitelist, self.value)
    }
}

impl RendererConfig {
    /// List every configured value that falls outside its whitelist.
    pub fn invalid_values(&self) -> Vec<InvalidValue> {
        let mut invalid = Vec::new();
        let mut check = |whitelist: &Whitelist, value: &str| {
            if !whitelist.contains(value) {
                invalid.push(InvalidValue {
                    whitelist: whitelist.name(),
                    value: value.to_string(),
                });
            }
        };

        check(&BACKEND_WHITELIST, &self.backend);
        for extension in &self.extensions {
            check(&EXTENSION_WHITELIST, extension);
        }
        check(&SAFE_MODE_WHITELIST, &self.safe_mode);

        invalid
    }
}
