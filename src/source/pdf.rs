//! PDF documents read through lopdf.
//!
//! Spans are taken straight from the page content streams: text showing
//! operators are tracked together with the text matrix and the selected font,
//! so every span carries its position, effective size and a bold flag derived
//! from the font name.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::detect::{detect_source_kind_from_bytes, SourceKind};
use crate::error::{Error, Result};
use crate::layout::{lines_to_text, reconstruct_lines};
use crate::model::{Document, Page, Span};
use crate::options::ErrorMode;

/// US Letter height, used when a page has no usable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Parent links followed when looking for an inherited MediaBox.
const MAX_TREE_DEPTH: usize = 32;

/// TJ adjustments beyond this (thousandths of an em) are read as word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A PDF file opened for span extraction.
pub struct PdfSource {
    doc: LopdfDocument,
    name: String,
    error_mode: ErrorMode,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P, error_mode: ErrorMode) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(super::file_name(path), &data, error_mode)
    }

    /// Read a PDF from memory.
    pub fn from_bytes(name: impl Into<String>, data: &[u8], error_mode: ErrorMode) -> Result<Self> {
        match detect_source_kind_from_bytes(data)? {
            SourceKind::Pdf { .. } => {}
            SourceKind::SpanDump => return Err(Error::UnknownFormat),
        }

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self {
            doc,
            name: name.into(),
            error_mode,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Extract every page into a [`Document`].
    ///
    /// In lenient mode a page that cannot be read is logged and left empty.
    pub fn load(&self) -> Result<Document> {
        let mut pages = Vec::new();

        for (number, page_id) in self.doc.get_pages() {
            match self.load_page(number, page_id) {
                Ok(page) => pages.push(page),
                Err(e) if self.error_mode == ErrorMode::Lenient => {
                    log::warn!("{}: skipping page {}: {}", self.name, number, e);
                    pages.push(Page::new(number));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Document::new(self.name.clone(), pages))
    }

    fn load_page(&self, number: u32, page_id: ObjectId) -> Result<Page> {
        let height = self.page_height(page_id);
        let spans = self.page_spans(page_id, height)?;

        // Without positioned spans fall back to lopdf's own text extraction
        let text = if spans.is_empty() {
            self.doc
                .extract_text(&[number])
                .map(|t| t.nfc().collect::<String>())
                .map_err(|e| Error::TextExtract(format!("Page {}: {}", number, e)))?
        } else {
            lines_to_text(&reconstruct_lines(&spans, number))
        };

        Ok(Page::new(number).with_spans(spans).with_text(text))
    }

    /// Page height from the MediaBox, looked up through the page tree.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut node = Some(page_id);
        for _ in 0..MAX_TREE_DEPTH {
            let Some(dict) = node.and_then(|id| self.doc.get_dictionary(id).ok()) else {
                break;
            };
            let media_box = dict.get(b"MediaBox").ok();
            if let Some(height) = media_box.and_then(|obj| self.box_height(obj)) {
                return height;
            }
            node = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }
        DEFAULT_PAGE_HEIGHT
    }

    fn box_height(&self, obj: &Object) -> Option<f32> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let arr = obj.as_array().ok().filter(|arr| arr.len() >= 4)?;
        let (bottom, top) = (number(&arr[1])?, number(&arr[3])?);
        Some(top - bottom)
    }

    fn page_spans(&self, page_id: ObjectId, page_height: f32) -> Result<Vec<Span>> {
        let fonts = self.doc.get_page_fonts(page_id)?;
        let content = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&content)?;

        let mut reader = SpanReader::new(&self.doc, &fonts, page_height);
        for op in &content.operations {
            reader.apply(&op.operator, &op.operands);
        }
        Ok(reader.spans)
    }
}

/// Content stream state while collecting spans.
struct SpanReader<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    page_height: f32,
    font_key: Vec<u8>,
    font_bold: bool,
    font_size: f32,
    matrix: TextMatrix,
    in_text: bool,
    spans: Vec<Span>,
}

impl<'a> SpanReader<'a> {
    fn new(
        doc: &'a LopdfDocument,
        fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
        page_height: f32,
    ) -> Self {
        Self {
            doc,
            fonts,
            page_height,
            font_key: Vec::new(),
            font_bold: false,
            font_size: 12.0,
            matrix: TextMatrix::default(),
            in_text: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" if operands.len() >= 2 => {
                if let Object::Name(key) = &operands[0] {
                    self.select_font(key);
                }
                self.font_size = number(&operands[1]).unwrap_or(12.0);
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.matrix.leading = leading;
                }
            }
            "Td" | "TD" if operands.len() >= 2 => {
                let tx = number(&operands[0]).unwrap_or(0.0);
                let ty = number(&operands[1]).unwrap_or(0.0);
                if operator == "TD" {
                    self.matrix.leading = -ty;
                }
                self.matrix.translate(tx, ty);
            }
            "Tm" if operands.len() >= 6 => {
                let value = |i: usize, default: f32| number(&operands[i]).unwrap_or(default);
                self.matrix.set(
                    value(0, 1.0),
                    value(1, 0.0),
                    value(2, 0.0),
                    value(3, 1.0),
                    value(4, 0.0),
                    value(5, 0.0),
                );
            }
            "T*" => self.matrix.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.emit(text);
                }
            }
            "'" | "\"" => {
                self.matrix.next_line();
                let index = if operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            _ => {}
        }
    }

    fn select_font(&mut self, key: &[u8]) {
        self.font_key = key.to_vec();
        let base_font = self
            .fonts
            .get(key)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_lowercase())
            .unwrap_or_default();
        self.font_bold = ["bold", "black", "heavy"]
            .iter()
            .any(|w| base_font.contains(w));
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font_key)
            .and_then(|font| font.get_font_encoding(self.doc).ok());
        match encoding {
            Some(ref encoding) => LopdfDocument::decode_text(encoding, bytes).unwrap_or_default(),
            None => decode_text_simple(bytes),
        }
    }

    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -number(item).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD && needs_space(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn emit(&mut self, text: String) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let (x, baseline) = self.matrix.position();
        self.spans.push(Span::new(
            text.nfc().collect::<String>(),
            self.font_size * self.matrix.scale(),
            self.font_bold,
            x,
            self.page_height - baseline,
        ));
    }
}

/// Text matrix for tracking position in the content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Whether a TJ word gap should become a space after `text`.
///
/// Chinese and Japanese runs are written without spaces.
fn needs_space(text: &str) -> bool {
    match text.chars().last() {
        None | Some(' ') | Some('\u{00A0}') => false,
        Some(c) => !is_spaceless_script_char(c),
    }
}

fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F // CJK symbols and punctuation
        | 0x3040..=0x309F // Hiragana
        | 0x30A0..=0x30FF // Katakana
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0x20000..=0x2EBEF)
}

/// Decode string bytes when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
