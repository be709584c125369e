use super::*;
use crate::config::{PdfTextStrategy, Settings};
use crate::converter::{Converter, ConverterKind, Dispatcher};
use crate::error::{ConvertError, ErrorKind};
use std::fs::{self, File};
use std::path::Path;

const MISSING_TOOL: &str = "/nonexistent/docbridge-test-tool";

fn settings_with_missing_tools(scratch: &Path) -> Settings {
    let mut settings = Settings {
        scratch_dir: Some(scratch.to_path_buf()),
        ..Settings::default()
    };
    settings.tools.soffice = MISSING_TOOL.to_string();
    settings.tools.pandoc = MISSING_TOOL.to_string();
    settings.tools.pdftoppm = MISSING_TOOL.to_string();
    settings.tools.tesseract = MISSING_TOOL.to_string();
    settings
}

fn write_fixture_docx(path: &Path, paragraphs: &[&str]) {
    let file = File::create(path).unwrap();
    write_docx(file, paragraphs).unwrap();
}

fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}

/// Executable shell script standing in for an external tool
#[cfg(unix)]
fn fake_tool(dir: &Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

/// Single-page PDF showing `text` in Helvetica, with a valid xref table
fn write_fixture_pdf(path: &Path, text: &str) {
    let content = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref = pdf.len();
    let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        tail.push_str(&format!("{:010} 00000 n \n", offset));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    ));
    pdf.extend_from_slice(tail.as_bytes());
    fs::write(path, pdf).unwrap();
}

// ========================================================================
// Registration
// ========================================================================

#[test]
fn test_builtin_pairs() {
    let mut registry = CapabilityRegistry::new();
    load_converters(&mut registry);

    let expected = [
        ("doc", "docx", "doc"),
        ("doc", "html", "doc"),
        ("doc", "pdf", "doc"),
        ("doc", "txt", "doc"),
        ("docx", "html", "docx"),
        ("docx", "pdf", "docx"),
        ("docx", "txt", "docx"),
        ("html", "pdf", "html"),
        ("html", "txt", "html"),
        ("pdf", "docx", "pdf"),
        ("pdf", "txt", "pdf"),
    ];

    assert_eq!(registry.len(), expected.len());
    for (input, output, id) in expected {
        assert_eq!(registry.resolve(input, output).unwrap().id(), id);
    }
    assert!(registry.resolve("txt", "pdf").is_err());
    assert!(registry.resolve("pdf", "html").is_err());
}

#[test]
fn test_builtin_converters_accept_their_pairs() {
    let dispatcher = Dispatcher::with_builtin(Settings::default());

    for (input, output, _) in dispatcher.registry().entries() {
        let converter = dispatcher.get_converter(input, output).unwrap();
        assert!(converter.can_convert(input, output), "{input} -> {output}");
    }
}

#[test]
fn test_load_converters_idempotent() {
    let mut once = CapabilityRegistry::new();
    load_converters(&mut once);

    let mut twice = CapabilityRegistry::new();
    load_converters(&mut twice);
    load_converters(&mut twice);

    assert_eq!(once.len(), twice.len());
    assert_eq!(once.supported_conversions(), twice.supported_conversions());
    let ids = |r: &CapabilityRegistry| -> Vec<&'static str> {
        r.entries().into_iter().map(|(_, _, e)| e.id()).collect()
    };
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn test_converter_rejects_undeclared_pair() {
    let scratch = tempfile::tempdir().unwrap();
    let dispatcher = Dispatcher::with_builtin(settings_with_missing_tools(scratch.path()));
    let converter = DocxConverter::build(&dispatcher);

    let err = converter
        .convert(
            Path::new("in.docx"),
            &scratch.path().join("out.md"),
            "docx",
            "md",
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
}

// ========================================================================
// OOXML
// ========================================================================

#[test]
fn test_parse_document_xml_runs_and_breaks() {
    let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c &amp; d</w:t></w:r></w:p>
</w:body></w:document>"#;

    let paragraphs = parse_document_xml(xml).unwrap();
    assert_eq!(paragraphs, vec!["Hello world", "", "a\tb\nc & d"]);
}

#[test]
fn test_parse_document_xml_keeps_text_around_text_box() {
    let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Before </w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t>after</w:t></w:r></w:p>
<w:p><w:r><w:t>Next</w:t></w:r></w:p>
</w:body></w:document>"#;

    let paragraphs = parse_document_xml(xml).unwrap();
    assert_eq!(paragraphs, vec!["Box", "Before after", "Next"]);
}

#[test]
fn test_docx_package_round_trips_paragraphs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.docx");
    write_fixture_docx(&path, &["First", "", "Fish & <chips>", "form\u{c}feed"]);

    let paragraphs = read_paragraphs(&path).unwrap();
    assert_eq!(paragraphs, vec!["First", "", "Fish & <chips>", "formfeed"]);
}

#[test]
fn test_read_paragraphs_rejects_non_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.docx");
    fs::write(&path, "plain text, not a zip").unwrap();

    let err = read_paragraphs(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
}

// ========================================================================
// DOCX
// ========================================================================

#[test]
fn test_docx_to_txt() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_fixture_docx(&input, &["Title", "Body text"]);
    let output = dir.path().join("out/nested/report.txt");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    dispatcher
        .get_converter("docx", "txt")
        .unwrap()
        .convert(&input, &output, "docx", "txt")
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Title\nBody text\n");
}

#[test]
fn test_docx_to_html_escapes_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_fixture_docx(&input, &["Fish & <chips>"]);
    let output = dir.path().join("report.html");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    dispatcher
        .get_converter("docx", "html")
        .unwrap()
        .convert(&input, &output, "docx", "html")
        .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<meta charset="UTF-8">"#));
    assert!(html.contains("<p>Fish &amp; &lt;chips&gt;</p>"));
}

#[test]
fn test_docx_missing_input_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    let err = DocxConverter::build(&dispatcher)
        .convert(&dir.path().join("missing.docx"), &output, "docx", "txt")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert!(!output.exists());
}

#[test]
fn test_docx_to_pdf_without_pandoc() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_fixture_docx(&input, &["Body"]);
    let output = dir.path().join("pdf/report.pdf");

    let dispatcher = Dispatcher::with_builtin(settings_with_missing_tools(scratch.path()));
    let err = DocxConverter::build(&dispatcher)
        .convert(&input, &output, "docx", "pdf")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(err.to_string().contains("not installed"));
    assert!(!output.exists());
    assert!(dir_is_empty(&dir.path().join("pdf")));
}

// ========================================================================
// HTML
// ========================================================================

#[test]
fn test_html_to_txt() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(
        &input,
        "<html><body><h1>Heading</h1><p>First paragraph.</p><p>Second.</p></body></html>",
    )
    .unwrap();
    let output = dir.path().join("page.txt");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    dispatcher
        .get_converter("html", "txt")
        .unwrap()
        .convert(&input, &output, "html", "txt")
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Heading"));
    assert!(text.contains("First paragraph."));
    assert!(text.contains("Second."));
    assert!(!text.contains("<p>"));
}

#[test]
fn test_html_to_pdf_without_pandoc() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, "<p>hi</p>").unwrap();
    let output = dir.path().join("page.pdf");

    let dispatcher = Dispatcher::with_builtin(settings_with_missing_tools(scratch.path()));
    let err = HtmlConverter::build(&dispatcher)
        .convert(&input, &output, "html", "pdf")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(!output.exists());
}

// ========================================================================
// PDF
// ========================================================================

#[test]
fn test_pdf_garbage_input_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, "this is not a pdf").unwrap();
    let output = dir.path().join("broken.txt");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    let err = PdfConverter::build(&dispatcher)
        .convert(&input, &output, "pdf", "txt")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert!(!output.exists());
}

#[test]
fn test_pdf_to_docx_ocr_without_pdftoppm() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.pdf");
    fs::write(&input, "%PDF-1.4\n").unwrap();
    let output = dir.path().join("scan.docx");

    let mut settings = settings_with_missing_tools(scratch.path());
    settings.pdf.strategy = PdfTextStrategy::Ocr;
    let dispatcher = Dispatcher::with_builtin(settings);

    let err = PdfConverter::build(&dispatcher)
        .convert(&input, &output, "pdf", "docx")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(!output.exists());
    assert!(dir_is_empty(scratch.path()));
}

#[test]
fn test_pdf_to_docx_extract_only_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, "not a pdf either").unwrap();
    let output = dir.path().join("broken.docx");

    let mut settings = settings_with_missing_tools(scratch.path());
    settings.pdf.strategy = PdfTextStrategy::Extract;
    let dispatcher = Dispatcher::with_builtin(settings);

    let err = PdfConverter::build(&dispatcher)
        .convert(&input, &output, "pdf", "docx")
        .unwrap_err();

    // Extract never shells out, so the parser's error surfaces
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert!(!output.exists());
}

#[test]
fn test_pdf_to_txt_extracts_embedded_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.pdf");
    write_fixture_pdf(&input, "Hello from docbridge");
    let output = dir.path().join("letter.txt");

    let dispatcher = Dispatcher::with_builtin(Settings::default());
    dispatcher
        .get_converter("pdf", "txt")
        .unwrap()
        .convert(&input, &output, "pdf", "txt")
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Hello"), "extracted: {text:?}");
}

#[test]
fn test_pdf_to_docx_auto_uses_embedded_text() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.pdf");
    write_fixture_pdf(&input, "Hello from docbridge");
    let output = dir.path().join("letter.docx");

    // OCR tools are missing, so success means no fallback happened
    let mut settings = settings_with_missing_tools(scratch.path());
    settings.pdf.min_text_chars = 5;
    let dispatcher = Dispatcher::with_builtin(settings);

    PdfConverter::build(&dispatcher)
        .convert(&input, &output, "pdf", "docx")
        .unwrap();

    let paragraphs = read_paragraphs(&output).unwrap();
    assert!(paragraphs.iter().any(|p| p.contains("Hello")), "{paragraphs:?}");
}

#[cfg(unix)]
#[test]
fn test_pdf_to_docx_auto_falls_back_to_ocr() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.pdf");
    write_fixture_pdf(&input, "Hi");
    let output = dir.path().join("scan.docx");

    let mut settings = settings_with_missing_tools(scratch.path());
    // pdftoppm -r <dpi> -png <input> <prefix>
    settings.tools.pdftoppm = fake_tool(tools.path(), "pdftoppm", r#"touch "$5-1.png" "$5-2.png""#);
    // tesseract <page> stdout -l <lang>
    settings.tools.tesseract = fake_tool(
        tools.path(),
        "tesseract",
        r#"echo "ocr $(basename "$1" .png) $4"; echo "Estimating resolution" >&2"#,
    );
    settings.pdf.min_text_chars = 1000;
    settings.pdf.ocr_language = "chi_sim".to_string();
    let dispatcher = Dispatcher::with_builtin(settings);

    PdfConverter::build(&dispatcher)
        .convert(&input, &output, "pdf", "docx")
        .unwrap();

    let paragraphs = read_paragraphs(&output).unwrap();
    assert_eq!(paragraphs, vec!["ocr page-1 chi_sim", "ocr page-2 chi_sim"]);
    assert!(dir_is_empty(scratch.path()));
}

#[test]
fn test_quiet_panics_catches_and_resets() {
    let result = pdf::quiet_panics(|| -> u32 { panic!("malformed xref") });
    assert!(result.is_err());
    assert!(!pdf::QUIET_PANICS.with(|quiet| quiet.get()));

    assert_eq!(pdf::quiet_panics(|| 7).unwrap(), 7);
}

// ========================================================================
// DOC
// ========================================================================

#[test]
fn test_doc_direct_without_soffice() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();
    let output = dir.path().join("legacy.docx");

    let dispatcher = Dispatcher::with_builtin(settings_with_missing_tools(scratch.path()));
    let err = DocConverter::build(&dispatcher)
        .convert(&input, &output, "doc", "docx")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(!output.exists());
    assert!(dir_is_empty(scratch.path()));
}

#[test]
fn test_doc_chained_without_soffice_leaves_no_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();

    let dispatcher = Dispatcher::with_builtin(settings_with_missing_tools(scratch.path()));
    let converter = DocConverter::build(&dispatcher);

    for format in ["txt", "html"] {
        let output = dir.path().join(format!("legacy.{}", format));
        let err = converter
            .convert(&input, &output, "doc", format)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::WriteFailure);
        assert!(!output.exists());
    }
    assert!(dir_is_empty(scratch.path()));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_doc_chain_needs_docx_converter() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();

    // Only the doc converter is registered; the docx -> txt hop is missing
    let mut registry = CapabilityRegistry::new();
    registry.register_converter(ConverterEntry::of::<DocConverter>());
    let dispatcher = Dispatcher::new(registry, settings_with_missing_tools(scratch.path()));

    let err = dispatcher
        .get_converter("doc", "txt")
        .unwrap()
        .convert(&input, &dir.path().join("legacy.txt"), "doc", "txt")
        .unwrap_err();

    match err {
        ConvertError::Unsupported { input, output } => {
            assert_eq!(input, "docx");
            assert_eq!(output, "txt");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// soffice --headless --convert-to <fmt> <input> --outdir <dir>, copying `fixture`
#[cfg(unix)]
fn fake_soffice(tools: &Path, fixture: &Path) -> String {
    fake_tool(
        tools,
        "soffice",
        &format!(
            r#"stem=$(basename "$4"); stem="${{stem%.*}}"; cp '{}' "$6/$stem.$3""#,
            fixture.display()
        ),
    )
}

#[cfg(unix)]
#[test]
fn test_doc_to_txt_chains_through_docx() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let fixture = tools.path().join("converted.docx");
    write_fixture_docx(&fixture, &["Legacy title", "Legacy & body"]);

    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();

    let mut settings = settings_with_missing_tools(scratch.path());
    settings.tools.soffice = fake_soffice(tools.path(), &fixture);
    let dispatcher = Dispatcher::with_builtin(settings);
    let converter = dispatcher.get_converter("doc", "txt").unwrap();

    let txt = dir.path().join("out/legacy.txt");
    converter.convert(&input, &txt, "doc", "txt").unwrap();
    assert_eq!(
        fs::read_to_string(&txt).unwrap(),
        "Legacy title\nLegacy & body\n"
    );

    let html = dir.path().join("out/legacy.html");
    dispatcher
        .get_converter("doc", "html")
        .unwrap()
        .convert(&input, &html, "doc", "html")
        .unwrap();
    assert!(fs::read_to_string(&html)
        .unwrap()
        .contains("<p>Legacy &amp; body</p>"));

    // Intermediate DOCX files are gone; only the requested outputs remain
    assert!(dir_is_empty(scratch.path()));
    assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 2);
}

#[cfg(unix)]
#[test]
fn test_doc_to_docx_publishes_soffice_output() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let fixture = tools.path().join("converted.docx");
    write_fixture_docx(&fixture, &["Converted"]);

    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();
    let output = dir.path().join("legacy.docx");

    let mut settings = settings_with_missing_tools(scratch.path());
    settings.tools.soffice = fake_soffice(tools.path(), &fixture);
    let dispatcher = Dispatcher::with_builtin(settings);

    DocConverter::build(&dispatcher)
        .convert(&input, &output, "doc", "docx")
        .unwrap();

    assert_eq!(fs::read(&output).unwrap(), fs::read(&fixture).unwrap());
    assert!(dir_is_empty(scratch.path()));
}

#[cfg(unix)]
#[test]
fn test_doc_soffice_without_output_is_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let tools = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.doc");
    fs::write(&input, b"\xd0\xcf\x11\xe0").unwrap();
    let output = dir.path().join("legacy.pdf");

    let mut settings = settings_with_missing_tools(scratch.path());
    settings.tools.soffice = fake_tool(tools.path(), "soffice", "exit 0");
    let dispatcher = Dispatcher::with_builtin(settings);

    let err = DocConverter::build(&dispatcher)
        .convert(&input, &output, "doc", "pdf")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

// ========================================================================
// External tools
// ========================================================================

#[test]
fn test_tool_command_missing_program() {
    let err = ToolCommand::new(MISSING_TOOL)
        .arg("--version")
        .run(Path::new("out.pdf"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteFailure);
    assert!(err.to_string().contains("out.pdf"));
    assert!(err.to_string().contains(MISSING_TOOL));
}

#[cfg(unix)]
#[test]
fn test_tool_command_nonzero_exit_keeps_stderr() {
    let err = ToolCommand::new("sh")
        .args(["-c", "echo conversion exploded >&2; exit 3"])
        .run(Path::new("out.pdf"))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("exited with 3"));
    assert!(message.contains("conversion exploded"));
}

#[cfg(unix)]
#[test]
fn test_tool_command_captures_both_streams() {
    let output = ToolCommand::new("sh")
        .args(["-c", "echo recognised; echo 'Estimating resolution' >&2"])
        .run(Path::new("out.txt"))
        .unwrap();

    assert_eq!(String::from_utf8(output.stdout).unwrap(), "recognised\n");
    assert_eq!(output.stderr.trim(), "Estimating resolution");
}
