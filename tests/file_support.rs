//! Integration tests for multi-format ingestion: PDF and DOCX decoding,
//! corrupt-file handling, and the configured file-size cap.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn sds_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("sds");
    path
}

fn run_sds(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = sds_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run sds binary at {:?}: {}", binary, e));

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn setup_env(max_file_bytes: Option<u64>) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::create_dir_all(root.join("config")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();
    fs::create_dir_all(root.join("sheets")).unwrap();

    let max_line = max_file_bytes
        .map(|n| format!("max_file_bytes = {}\n", n))
        .unwrap_or_default();

    let config_content = format!(
        r#"[db]
path = "{}/data/sds.sqlite"

[server]
bind = "127.0.0.1:7421"

[ingest]
include_globs = ["**/*.txt", "**/*.pdf", "**/*.docx"]
exclude_globs = []
{}"#,
        root.display(),
        max_line
    );

    let config_path = root.join("config").join("sds.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

/// Minimal valid single-page PDF whose content stream draws `phrase`.
/// The body is assembled first so the xref table carries correct byte
/// offsets for pdf parsing.
fn minimal_pdf_with_text(phrase: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET\n", phrase);

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let o1 = out.len();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    let o2 = out.len();
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
    let o3 = out.len();
    out.extend_from_slice(b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj\n");
    let o4 = out.len();
    out.extend_from_slice(
        format!("4 0 obj << /Length {} >> stream\n{}endstream endobj\n", stream.len(), stream)
            .as_bytes(),
    );
    let o5 = out.len();
    out.extend_from_slice(
        b"5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
    );
    let xref_start = out.len();
    out.extend_from_slice(b"xref\n0 6\n");
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in [o1, o2, o3, o4, o5] {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(b"trailer << /Size 6 /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

/// Minimal docx (ZIP) whose word/document.xml carries `phrase` in one run.
fn minimal_docx_with_text(phrase: &str) -> Vec<u8> {
    use std::io::Write;
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file(
            "word/document.xml",
            zip::write::SimpleFileOptions::default(),
        )
        .unwrap();
        let xml = format!(
            "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>",
            phrase
        );
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn test_pdf_ingest_extracts_product() {
    let (tmp, config_path) = setup_env(None);
    let sheet = tmp.path().join("sheets").join("benzene.pdf");
    fs::write(&sheet, minimal_pdf_with_text("Product Name: Benzene")).unwrap();

    run_sds(&config_path, &["init"]);
    let (stdout, stderr, success) = run_sds(&config_path, &["ingest", sheet.to_str().unwrap()]);
    assert!(success, "pdf ingest failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("ok (Benzene)"), "stdout: {}", stdout);
}

#[test]
fn test_docx_ingest_extracts_product() {
    let (tmp, config_path) = setup_env(None);
    let sheet = tmp.path().join("sheets").join("toluene.docx");
    fs::write(&sheet, minimal_docx_with_text("Product Name: Toluene")).unwrap();

    run_sds(&config_path, &["init"]);
    let (stdout, stderr, success) = run_sds(&config_path, &["ingest", sheet.to_str().unwrap()]);
    assert!(success, "docx ingest failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("ok (Toluene)"), "stdout: {}", stdout);
}

#[test]
fn test_docx_full_text_is_searchable() {
    let (tmp, config_path) = setup_env(None);
    let sheet = tmp.path().join("sheets").join("xylene.docx");
    fs::write(
        &sheet,
        minimal_docx_with_text(
            "Product Name: Xylene Mixture. Xylene vapors demand continuous mechanical ventilation.",
        ),
    )
    .unwrap();

    run_sds(&config_path, &["init"]);
    run_sds(&config_path, &["ingest", sheet.to_str().unwrap()]);

    let (stdout, _, success) = run_sds(
        &config_path,
        &["ask", "mechanical ventilation"],
    );
    assert!(success);
    assert!(
        stdout.contains("Xylene vapors demand continuous mechanical ventilation"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_corrupt_pdf_is_skipped_not_fatal() {
    let (tmp, config_path) = setup_env(None);
    let sheets = tmp.path().join("sheets");
    fs::write(sheets.join("broken.pdf"), b"this is not a pdf at all").unwrap();
    fs::write(sheets.join("good.txt"), "Product Name: Ethanol\n").unwrap();

    run_sds(&config_path, &["init"]);
    let (stdout, _, success) = run_sds(&config_path, &["ingest", sheets.to_str().unwrap()]);
    assert!(success, "one bad file must not abort the batch");
    assert!(stdout.contains("Could not extract text"));
    assert!(stdout.contains("ok (Ethanol)"));
    assert!(stdout.contains("ingested: 1"));
    assert!(stdout.contains("skipped: 1"));
}

#[test]
fn test_oversized_file_is_skipped() {
    let (tmp, config_path) = setup_env(Some(16));
    let sheet = tmp.path().join("sheets").join("big.txt");
    fs::write(&sheet, "Product Name: Acetone and lots more text beyond the cap").unwrap();

    run_sds(&config_path, &["init"]);
    let (stdout, _, success) = run_sds(&config_path, &["ingest", sheet.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("exceeds maximum size"));
    assert!(stdout.contains("skipped: 1"));
}
