//! AsciiDoc to HTML conversion through an external renderer.
//!
//! [`AsciidocConverter`] picks `asciidoctor` (or the legacy `asciidoc`) from the
//! search path, derives its command line from a [`RendererConfig`], pipes the
//! document through it and hands back whatever it wrote to stdout. When neither
//! renderer is installed the source is returned untouched.

use super::config::{BACKEND_WHITELIST, EXTENSION_WHITELIST, RendererConfig, SAFE_MODE_WHITELIST};
use super::executor::{CommandRunner, ExecutorError, ProcessRunner};
use super::locator::{ExecutableLocator, PathLocator, Renderer, ResolvedRenderer};
use super::settings::{DESTINATION_KEY, NoSettings, SettingsProvider};
use std::path::{Component, Path, PathBuf};

/// Name under which the converter registers with a host pipeline.
pub const CONVERTER_NAME: &str = "asciidoc";

/// Identity of the document being converted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentContext {
    /// Logical path of the document, e.g. `posts/hello.adoc`.
    pub document_name: String,
    /// Source file on disk.
    pub filename: PathBuf,
}

impl DocumentContext {
    pub fn new(document_name: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            document_name: document_name.into(),
            filename: filename.into(),
        }
    }
}

/// Error that ends a conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("{renderer} rendering {document} failed: {}", describe_failure(.exit_code, .stderr))]
    RendererFailed {
        renderer: Renderer,
        document: String,
        exit_code: Option<i32>,
        /// Renderer diagnostics, one line per stderr line.
        stderr: String,
    },
}

fn describe_failure(exit_code: &Option<i32>, stderr: &str) -> String {
    let status = match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{status}\n{stderr}")
    }
}

/// Converts AsciiDoc documents by delegating to an external renderer.
///
/// Holds no per-document state; one instance serves any number of concurrent
/// conversions.
pub struct AsciidocConverter {
    config: RendererConfig,
    settings: Box<dyn SettingsProvider>,
    locator: Box<dyn ExecutableLocator>,
    runner: Box<dyn ProcessRunner>,
}

impl AsciidocConverter {
    /// Converter using the real search path and process spawning, with no
    /// global settings.
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            settings: Box::new(NoSettings),
            locator: Box::new(PathLocator::new()),
            runner: Box::new(CommandRunner),
        }
    }

    pub fn with_settings(mut self, settings: impl SettingsProvider + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    pub fn with_locator(mut self, locator: impl ExecutableLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        CONVERTER_NAME
    }

    /// The renderer a conversion started now would use. Probes every call.
    pub fn resolve_renderer(&self) -> Option<ResolvedRenderer> {
        self.locator.resolve_renderer()
    }

    /// Whether any supported renderer is installed.
    pub fn is_available(&self) -> bool {
        self.resolve_renderer().is_some()
    }

    /// Bind the converter to a single document.
    pub fn for_document(&self, ctx: DocumentContext) -> DocumentConverter<'_> {
        DocumentConverter { converter: self, ctx }
    }

    /// Convert `src` to HTML.
    ///
    /// Returns `src` unchanged when no renderer is installed. Fails only when the
    /// renderer process cannot be run or exits unsuccessfully.
    pub fn convert(&self, src: &[u8], ctx: &DocumentContext) -> Result<Vec<u8>, ConvertError> {
        // Invalid configuration is reported even when no renderer is installed.
        let args = self.build_args(ctx);

        let Some(resolved) = self.resolve_renderer() else {
            log::error!(
                "asciidoctor / asciidoc not found in $PATH: Please install. Leaving AsciiDoc content of {} unrendered.",
                ctx.document_name
            );
            return Ok(src.to_vec());
        };

        log::info!(
            "Rendering {} with {} using asciidoc args {:?} ...",
            ctx.document_name,
            resolved.path.display(),
            args
        );

        let output = self.runner.run(&resolved.path, &args, src)?;

        // Renderers report most problems on stderr and still exit 0.
        for line in output.stderr_lines() {
            log::error!("{}: {line}", ctx.document_name);
        }

        if !output.success() {
            return Err(ConvertError::RendererFailed {
                renderer: resolved.renderer,
                document: ctx.document_name.clone(),
                exit_code: output.exit_code,
                stderr: output.stderr_lines().join("\n"),
            });
        }

        Ok(output.stdout)
    }

    /// Build the renderer's argument vector for `ctx`.
    ///
    /// Order is fixed: backend, extensions, header/footer, section numbers,
    /// verbose, safe mode, working folder paths, then `-` for stdin.
    pub fn build_args(&self, ctx: &DocumentContext) -> Vec<String> {
        let cfg = &self.config;
        let mut args = Vec::new();

        if BACKEND_WHITELIST.contains(&cfg.backend) {
            args.push("-b".to_string());
            args.push(cfg.backend.clone());
        } else {
            log::error!("Unsupported asciidoc backend '{}' was passed in.", cfg.backend);
        }

        for extension in &cfg.extensions {
            if EXTENSION_WHITELIST.contains(extension) {
                args.push("-r".to_string());
                args.push(extension.clone());
                continue;
            }
            log::error!("Unsupported asciidoctor extension '{extension}' was passed in.");
        }

        if cfg.no_header_or_footer {
            args.push("--no-header-footer".to_string());
        }

        if cfg.section_numbers {
            args.push("--section-numbers".to_string());
        }

        if cfg.verbose {
            args.push("-v".to_string());
        }

        if SAFE_MODE_WHITELIST.contains(&cfg.safe_mode) {
            args.push("--safe-mode".to_string());
            args.push(cfg.safe_mode.clone());
        } else {
            log::error!("Unsupported asciidoc safe mode '{}' was passed in.", cfg.safe_mode);
        }

        if cfg.working_folder_current {
            let content_dir = content_dir(&ctx.filename);
            let destination = self.settings.get_string(DESTINATION_KEY);

            log::info!("Destination directory: {destination:?}");
            if destination.is_empty() {
                log::error!("asciidoc working-folder-current requires the destination setting to be set");
            }

            let out_dir = output_dir(&destination, &ctx.document_name);
            log::info!("Output directory for {}: {}", ctx.document_name, out_dir.display());

            args.push("--base-dir".to_string());
            args.push(content_dir.to_string_lossy().into_owned());
            args.push("-a".to_string());
            args.push(format!("outdir={}", out_dir.to_string_lossy()));
        }

        args.push("-".to_string());
        args
    }
}

impl std::fmt::Debug for AsciidocConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsciidocConverter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// An [`AsciidocConverter`] bound to one document.
#[derive(Debug)]
pub struct DocumentConverter<'a> {
    converter: &'a AsciidocConverter,
    ctx: DocumentContext,
}

impl DocumentConverter<'_> {
    pub fn context(&self) -> &DocumentContext {
        &self.ctx
    }

    pub fn convert(&self, src: &[u8]) -> Result<Vec<u8>, ConvertError> {
        self.converter.convert(src, &self.ctx)
    }

    /// External renderers support none of the host pipeline's optional features
    /// (table of contents extraction and the like).
    pub fn supports(&self, _feature: &str) -> bool {
        false
    }
}

/// Whether `asciidoctor` or `asciidoc` is installed on this machine.
pub fn supports() -> bool {
    PathLocator::new().resolve_renderer().is_some()
}

/// Directory holding the document source; `.` for a bare filename.
fn content_dir(filename: &Path) -> PathBuf {
    match filename.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Absolute directory the rendered document lands in under `destination`.
///
/// Falls back to the relative path when it cannot be made absolute.
fn output_dir(destination: &str, document_name: &str) -> PathBuf {
    let relative: PathBuf = Path::new(document_name)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    let joined = Path::new(destination).join(relative);
    let dir = clean(joined.parent().unwrap_or(Path::new("")));

    match std::path::absolute(&dir) {
        Ok(abs) => abs,
        Err(err) => {
            log::error!("asciidoctor outDir {}: {err}", dir.display());
            dir
        }
    }
}

/// Lexically resolve `.` and `..` components. An empty result becomes `.`.
fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.into_iter().collect()
    }
}
