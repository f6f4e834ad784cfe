// File Extraction Service
// Turns an uploaded artifact into plain text. Format parsing is
// delegated to the extraction crates; this module only routes by
// extension and normalizes their failures into one error type.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Extensions accepted at upload validation. `doc` is accepted here but
/// rejected at extraction time; legacy Word parsing was never supported.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx", "doc", "csv", "xlsx"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("no content extracted from file")]
    EmptyContent,
    #[error("error reading text file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error reading PDF file: {0}")]
    Pdf(String),
    #[error("error reading DOCX file: {0}")]
    Docx(String),
    #[error("error reading CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("error reading Excel file: {0}")]
    Xlsx(String),
}

/// Lowercased extension of a filename, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Whether a declared filename is acceptable for upload.
pub fn allowed_file(filename: &str) -> bool {
    match file_extension(filename) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Extract plain text from a file, routed by its extension.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    debug!(path = %path.display(), ext, "extracting text");

    let text = match ext.as_str() {
        "txt" => fs::read_to_string(path)?,
        "pdf" => extract_pdf(path)?,
        "docx" => extract_docx(path)?,
        "csv" => extract_csv(path)?,
        "xlsx" => extract_xlsx(path)?,
        other => return Err(ExtractError::UnsupportedType(other.to_string())),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyContent);
    }
    Ok(text)
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path)?;
    let docx = read_docx(&bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(text) = rc {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }
    Ok(paragraphs.join("\n"))
}

fn extract_csv(path: &Path) -> Result<String, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(record.iter().collect::<Vec<_>>().join(" "));
    }
    Ok(lines.join("\n"))
}

fn extract_xlsx(path: &Path) -> Result<String, ExtractError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Xlsx(e.to_string()))?;

    let mut lines = Vec::new();
    for (_name, range) in workbook.worksheets() {
        for row in range.rows() {
            lines.push(
                row.iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
    }
    Ok(lines.join("\n"))
}

/// Scratch directory for uploaded files. Files live only for the
/// duration of one analysis request.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write uploaded bytes under a UUID-prefixed sanitized name so
    /// concurrent uploads of the same filename cannot collide.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf, ExtractError> {
        fs::create_dir_all(&self.dir)?;
        let name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), "saved upload");
        Ok(path)
    }

    /// Best-effort cleanup after analysis.
    pub fn remove(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "failed to delete upload");
        }
    }
}

fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
