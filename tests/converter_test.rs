mod common;

use asciidocext_lib::asciidoc::{
    AsciidocConverter, ConvertError, DESTINATION_KEY, DocumentContext, ExecutorError, Renderer, RendererConfig,
};
use common::{CapturingLogger, CountingSettings, RecordingRunner, Response, ScriptedLocator};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::path::PathBuf;

const SOURCE: &[u8] = b"= Hello\n\nSome *AsciiDoc* text.\n";

fn example_config() -> RendererConfig {
    RendererConfig {
        backend: "html5".to_string(),
        extensions: vec!["asciidoctor-diagram".to_string(), "not-a-real-ext".to_string()],
        no_header_or_footer: true,
        safe_mode: "safe".to_string(),
        ..Default::default()
    }
}

fn ctx() -> DocumentContext {
    DocumentContext::new("posts/hello.adoc", "content/posts/hello.adoc")
}

fn both_installed() -> ScriptedLocator {
    ScriptedLocator::none()
        .with("asciidoctor", "/usr/local/bin/asciidoctor")
        .with("asciidoc", "/usr/bin/asciidoc")
}

#[test]
#[serial]
fn test_no_renderer_returns_source_unchanged() {
    let logger = CapturingLogger::install();
    let runner = RecordingRunner::echo();
    let converter = AsciidocConverter::new(example_config())
        .with_locator(ScriptedLocator::none())
        .with_runner(runner.clone());

    let output = converter.convert(SOURCE, &ctx()).unwrap();

    assert_eq!(output, SOURCE);
    assert!(runner.calls().is_empty());
    assert!(!converter.is_available());

    let errors = logger.errors();
    assert!(errors.iter().any(|e| e.contains("asciidoctor / asciidoc not found in $PATH")));
    assert!(errors.iter().any(|e| e.contains("not-a-real-ext")));
}

#[test]
#[serial]
fn test_example_invocation_with_asciidoctor() {
    let logger = CapturingLogger::install();
    let runner = RecordingRunner::output(b"<div class=\"paragraph\"></div>\n", b"", Some(0));
    let converter = AsciidocConverter::new(example_config())
        .with_locator(both_installed())
        .with_runner(runner.clone());

    let output = converter.convert(SOURCE, &ctx()).unwrap();
    assert_eq!(output, b"<div class=\"paragraph\"></div>\n");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, PathBuf::from("/usr/local/bin/asciidoctor"));
    assert_eq!(
        calls[0].args,
        vec!["-b", "html5", "-r", "asciidoctor-diagram", "--no-header-footer", "--safe-mode", "safe", "-"]
    );
    assert_eq!(calls[0].input, SOURCE);

    let infos = logger.messages(log::Level::Info);
    assert!(
        infos
            .iter()
            .any(|m| m.contains("posts/hello.adoc") && m.contains("/usr/local/bin/asciidoctor"))
    );
    assert!(logger.errors().iter().any(|e| e.contains("not-a-real-ext")));
}

#[test]
#[serial]
fn test_falls_back_to_legacy_asciidoc() {
    CapturingLogger::install();
    let runner = RecordingRunner::echo();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(ScriptedLocator::none().with("asciidoc", "/usr/bin/asciidoc"))
        .with_runner(runner.clone());

    let resolved = converter.resolve_renderer().expect("asciidoc should be resolved");
    assert_eq!(resolved.renderer, Renderer::Asciidoc);
    assert!(converter.is_available());

    let output = converter.convert(SOURCE, &ctx()).unwrap();
    assert_eq!(output, SOURCE);
    assert_eq!(runner.calls()[0].program, PathBuf::from("/usr/bin/asciidoc"));
}

#[test]
#[serial]
fn test_output_is_returned_verbatim() {
    CapturingLogger::install();
    let html = b"<p>line one</p>\r\n<p>line two</p>\r\n\xff";
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(RecordingRunner::output(html, b"", Some(0)));

    assert_eq!(converter.convert(SOURCE, &ctx()).unwrap(), html);
}

#[test]
#[serial]
fn test_stderr_lines_are_logged_per_document() {
    let logger = CapturingLogger::install();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(RecordingRunner::output(
            b"<p>ok</p>",
            b"asciidoctor: WARNING: <stdin>: line 3: section title out of sequence\n\n",
            Some(0),
        ));

    let output = converter.convert(SOURCE, &ctx()).unwrap();
    assert_eq!(output, b"<p>ok</p>");
    assert!(logger.errors().contains(
        &"posts/hello.adoc: asciidoctor: WARNING: <stdin>: line 3: section title out of sequence".to_string()
    ));
}

#[test]
#[serial]
fn test_non_zero_exit_is_a_conversion_failure() {
    CapturingLogger::install();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(RecordingRunner::output(b"", b"asciidoctor: FAILED: boom\n", Some(1)));

    let err = converter.convert(SOURCE, &ctx()).unwrap_err();
    match err {
        ConvertError::RendererFailed {
            renderer,
            document,
            exit_code,
            stderr,
        } => {
            assert_eq!(renderer, Renderer::Asciidoctor);
            assert_eq!(document, "posts/hello.adoc");
            assert_eq!(exit_code, Some(1));
            assert_eq!(stderr, "asciidoctor: FAILED: boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn test_spawn_failure_is_propagated() {
    CapturingLogger::install();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(RecordingRunner::new(Response::SpawnError));

    let err = converter.convert(SOURCE, &ctx()).unwrap_err();
    assert!(matches!(err, ConvertError::Executor(ExecutorError::Spawn { .. })));
}

#[test]
#[serial]
fn test_destination_not_consulted_without_working_folder_current() {
    CapturingLogger::install();
    let settings = CountingSettings::default().with(DESTINATION_KEY, "public");
    let runner = RecordingRunner::echo();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_settings(settings.clone())
        .with_locator(both_installed())
        .with_runner(runner.clone());

    converter.convert(SOURCE, &ctx()).unwrap();

    assert_eq!(settings.lookups(), 0);
    let args = &runner.calls()[0].args;
    assert!(!args.iter().any(|a| a == "--base-dir" || a == "-a" || a.starts_with("outdir=")));
}

#[test]
#[serial]
fn test_working_folder_current_without_destination_continues() {
    let logger = CapturingLogger::install();
    let settings = CountingSettings::default();
    let runner = RecordingRunner::echo();
    let config = RendererConfig {
        working_folder_current: true,
        ..Default::default()
    };
    let converter = AsciidocConverter::new(config)
        .with_settings(settings.clone())
        .with_locator(both_installed())
        .with_runner(runner.clone());

    let output = converter.convert(SOURCE, &ctx()).unwrap();
    assert_eq!(output, SOURCE);
    assert_eq!(settings.lookups(), 1);

    let args = &runner.calls()[0].args;
    let cwd = std::env::current_dir().unwrap();
    let base_dir = args.iter().position(|a| a == "--base-dir").expect("--base-dir present");
    assert_eq!(args[base_dir + 1], PathBuf::from("content/posts").to_string_lossy());
    assert_eq!(args[base_dir + 2], "-a");
    assert_eq!(args[base_dir + 3], format!("outdir={}", cwd.join("posts").to_string_lossy()));
    assert_eq!(args.last().map(String::as_str), Some("-"));

    assert!(logger.errors().iter().any(|e| e.contains("destination")));
}

#[test]
#[serial]
fn test_document_converter_binds_context() {
    CapturingLogger::install();
    let runner = RecordingRunner::echo();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(runner.clone());

    let doc = converter.for_document(ctx());
    assert_eq!(doc.convert(SOURCE).unwrap(), SOURCE);
    assert!(!doc.supports("tableOfContents"));
    assert_eq!(runner.calls().len(), 1);
}

#[test]
#[serial]
fn test_concurrent_conversions_share_one_converter() {
    CapturingLogger::install();
    let runner = RecordingRunner::echo();
    let converter = AsciidocConverter::new(RendererConfig::default())
        .with_locator(both_installed())
        .with_runner(runner.clone());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let converter = &converter;
                scope.spawn(move || {
                    let src = format!("= Doc {i}\n");
                    let ctx = DocumentContext::new(format!("doc{i}.adoc"), format!("doc{i}.adoc"));
                    (src.clone(), converter.convert(src.as_bytes(), &ctx).unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (src, output) = handle.join().unwrap();
            assert_eq!(output, src.into_bytes());
        }
    });

    assert_eq!(runner.calls().len(), 8);
}
