//! PDF output for composed worksheets.
//!
//! Pages are drawn with the three built-in Helvetica faces, so no font data
//! is embedded. Coordinates arrive in millimetres from the top-left and are
//! flipped to PDF user space here and nowhere else.

use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation as PdfOp};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::{debug, info};

use crate::error::{Result, WorksheetError};
use crate::worksheet_engine::{
    batch::WorksheetSink,
    metrics::MM_PER_PT,
    sheet::{DrawOp, FontStyle, Page, PageSetup, Worksheet},
};

fn font_key(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => "F1",
        FontStyle::Bold    => "F2",
        FontStyle::Italic  => "F3",
    }
}

fn pt(mm: f32) -> Object {
    Object::Real(mm / MM_PER_PT)
}

/// Encode text for a WinAnsi simple font. Latin-1 passes through, a few
/// typographic marks map to their WinAnsi slots, anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '€'        => 0x80,
            '‘'        => 0x91,
            '’'        => 0x92,
            '“'        => 0x93,
            '”'        => 0x94,
            '–'        => 0x96,
            '—'        => 0x97,
            _          => b'?',
        })
        .collect()
}

fn page_content(page: &Page, setup: &PageSetup) -> Content {
    let flip = |y: f32| pt(setup.height - y);
    let mut operations = Vec::with_capacity(page.ops.len() * 5);
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, style, text } => {
                operations.push(PdfOp::new("BT", vec![]));
                operations.push(PdfOp::new("Tf", vec![font_key(*style).into(), Object::Real(*size)]));
                operations.push(PdfOp::new("Td", vec![pt(*x), flip(*y)]));
                operations.push(PdfOp::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]));
                operations.push(PdfOp::new("ET", vec![]));
            }
            DrawOp::Rule { x1, y1, x2, y2, thickness } => {
                operations.push(PdfOp::new("w", vec![pt(*thickness)]));
                operations.push(PdfOp::new("m", vec![pt(*x1), flip(*y1)]));
                operations.push(PdfOp::new("l", vec![pt(*x2), flip(*y2)]));
                operations.push(PdfOp::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

/// Build the (uncompressed) PDF document for `worksheet`.
pub fn to_document(worksheet: &Worksheet) -> Result<Document> {
    let setup = &worksheet.page_setup;
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for (style, base) in [
        (FontStyle::Regular, "Helvetica"),
        (FontStyle::Bold, "Helvetica-Bold"),
        (FontStyle::Italic, "Helvetica-Oblique"),
    ] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font_key(style), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(worksheet.pages.len());
    for page in &worksheet.pages {
        let content = page_content(page, setup);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => worksheet.pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), pt(setup.width), pt(setup.height)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&worksheet.title)),
        "Producer" => Object::string_literal(concat!("minute_math ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    Ok(doc)
}

/// Serialise `worksheet` to compressed PDF bytes in memory.
pub fn to_bytes(worksheet: &Worksheet) -> Result<Vec<u8>> {
    let mut doc = to_document(worksheet)?;
    doc.compress();
    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// Write `worksheet` to `path`, all or nothing.
///
/// The bytes go to a temporary file next to `path` which is renamed into
/// place only once fully written; on any error the temporary file is removed
/// and `path` is left untouched. An existing file at `path` is never replaced.
pub fn write_pdf(worksheet: &Worksheet, path: &Path) -> Result<PathBuf> {
    let bytes = to_bytes(worksheet)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".minute_math")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(path).map_err(|e| WorksheetError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), pages = worksheet.pages.len(), "wrote pdf");
    Ok(path.to_path_buf())
}

/// Writes each worksheet as a PDF inside one output directory.
#[derive(Debug, Clone)]
pub struct PdfDirectory {
    dir: PathBuf,
}

impl PdfDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PdfDirectory { dir: dir.into() }
    }

    /// `file_name`, or `stem-2.pdf`, `stem-3.pdf`, ... when it is taken.
    fn free_path(&self, file_name: &str) -> PathBuf {
        let first = self.dir.join(file_name);
        if !first.exists() {
            return first;
        }
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{ext}")),
            None => (file_name, String::new()),
        };
        (2u32..)
            .map(|n| self.dir.join(format!("{stem}-{n}{ext}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }
}

impl WorksheetSink for PdfDirectory {
    fn finalize(&mut self, worksheet: &Worksheet, file_name: &str) -> Result<PathBuf> {
        let path = self.free_path(file_name);
        let written = write_pdf(worksheet, &path)?;
        info!(path = %written.display(), "worksheet saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{
        layout::GridLayout,
        models::{Operation, Problem, WorksheetConfig},
        sheet::compose,
    };

    fn worksheet(n: usize) -> Worksheet {
        let config = WorksheetConfig {
            low: 1,
            high: 10,
            operation: Operation::Multiplication,
            problem_count: n,
            fixed_factor: None,
        };
        let problems: Vec<Problem> = (0..n as i64).map(|i| Problem::new(i, 3)).collect();
        compose(&problems, &config, &GridLayout::default(), &PageSetup::default(), Some("Zoë")).unwrap()
    }

    fn shown_strings(doc: &Document, page_no: u32) -> Vec<Vec<u8>> {
        let pages = doc.get_pages();
        let page_id = pages[&page_no];
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn one_pdf_page_per_sheet_page() {
        let doc = to_document(&worksheet(26)).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn header_and_footer_are_drawn_on_each_page() {
        let doc = to_document(&worksheet(30)).unwrap();
        for page_no in 1..=2u32 {
            let strings = shown_strings(&doc, page_no);
            assert_eq!(strings[0], encode_win_ansi("Zoë's Multiplication Minute Math"));
            assert_eq!(strings[1], format!("Page {page_no}").into_bytes());
        }
    }

    #[test]
    fn operator_symbol_is_win_ansi_encoded() {
        let doc = to_document(&worksheet(1)).unwrap();
        let strings = shown_strings(&doc, 1);
        assert_eq!(strings[3], vec![0xD7, b' ', b'3']);
    }

    #[test]
    fn compressed_bytes_reload() {
        let bytes = to_bytes(&worksheet(51)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("a÷b"), vec![b'a', 0xF7, b'b']);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
        assert_eq!(encode_win_ansi("’"), vec![0x92]);
    }

    #[test]
    fn write_pdf_leaves_only_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.pdf");
        write_pdf(&worksheet(5), &path).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["sheet.pdf".to_string()]);
    }

    #[test]
    fn write_pdf_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sheet.pdf");
        assert!(write_pdf(&worksheet(5), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn pdf_directory_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PdfDirectory::new(dir.path());
        let first = sink.finalize(&worksheet(2), "a_addition_worksheet_x.pdf").unwrap();
        let second = sink.finalize(&worksheet(2), "a_addition_worksheet_x.pdf").unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("a_addition_worksheet_x-2.pdf"));
    }
}
