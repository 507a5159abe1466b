//! Content-stream layout analysis for the lopdf engine.
//!
//! Walks a page's content stream, tracking the text and graphics state to
//! collect positioned text spans with their font size and face, then groups
//! the spans into top-to-bottom lines.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::Result;
use crate::model::Line;

/// Approximate glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A run of text drawn by one text-showing operator.
#[derive(Debug, Clone)]
pub(crate) struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub bold: bool,
}

/// Extract the lines of one page with font metadata.
pub(crate) fn page_lines(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<Line>> {
    let fonts = doc.get_page_fonts(page_id)?;
    let base_fonts: BTreeMap<Vec<u8>, String> = fonts
        .iter()
        .map(|(name, dict)| {
            let base = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_default();
            (name.clone(), base)
        })
        .collect();
    let encodings: BTreeMap<_, _> = fonts
        .iter()
        .filter_map(|(name, dict)| {
            dict.get_font_encoding(doc)
                .ok()
                .map(|enc| (name.clone(), enc))
        })
        .collect();

    let raw = doc.get_page_content(page_id)?;
    let content = Content::decode(&raw)?;

    let spans = collect_spans(&content.operations, &base_fonts, |font, bytes| {
        encodings
            .get(font)
            .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
            .unwrap_or_else(|| decode_pdf_bytes(bytes))
    });

    Ok(group_into_lines(spans))
}

/// Affine matrix `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(ops: &[Object]) -> Option<Matrix> {
        if ops.len() < 6 {
            return None;
        }
        Some(Matrix {
            a: number(&ops[0])?,
            b: number(&ops[1])?,
            c: number(&ops[2])?,
            d: number(&ops[3])?,
            e: number(&ops[4])?,
            f: number(&ops[5])?,
        })
    }

    fn translation(tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state between `BT` and `ET`, plus the graphics state stack.
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_size: f32,
    font_key: Vec<u8>,
    bold: bool,
    in_text: bool,
}

impl TextState {
    fn new() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_size: 12.0,
            font_key: Vec::new(),
            bold: false,
            in_text: false,
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = if self.leading > 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).then(&self.text_matrix);
    }

    /// Record a shown string and move the pen past it.
    fn show(&mut self, text: String, kerning: f32, spans: &mut Vec<TextSpan>) {
        let chars = text.chars().count() as f32;
        let advance = chars * self.font_size * AVG_GLYPH_WIDTH - kerning / 1000.0 * self.font_size;
        let trm = self.text_matrix.then(&self.ctm);
        let scale = trm.vertical_scale();

        if !text.trim().is_empty() {
            spans.push(TextSpan {
                text,
                x: trm.e,
                y: trm.f,
                width: advance.max(0.0) * scale,
                font_size: self.font_size * scale,
                bold: self.bold,
            });
        }
        self.advance(advance);
    }
}

/// Run the text-showing operators of a content stream.
///
/// `decode` turns a string operand into text for the given font resource key.
pub(crate) fn collect_spans<F>(
    operations: &[Operation],
    base_fonts: &BTreeMap<Vec<u8>, String>,
    decode: F,
) -> Vec<TextSpan>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut state = TextState::new();
    let mut spans = Vec::new();

    for op in operations {
        let ops = &op.operands;
        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(ops) {
                    state.ctm = m.then(&state.ctm);
                }
            }
            "BT" => {
                state.in_text = true;
                state.text_matrix = Matrix::IDENTITY;
                state.line_matrix = Matrix::IDENTITY;
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let (Some(Object::Name(key)), Some(size)) =
                    (ops.first(), ops.get(1).and_then(number))
                {
                    state.font_key = key.clone();
                    state.font_size = size.abs();
                    state.bold = base_fonts
                        .get(key)
                        .map(|name| is_bold_font(name))
                        .unwrap_or(false);
                }
            }
            "TL" => {
                if let Some(tl) = ops.first().and_then(number) {
                    state.leading = tl;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) =
                    (ops.first().and_then(number), ops.get(1).and_then(number))
                {
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(ops) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "T*" => state.next_line(),
            "Tj" | "'" | "\"" if state.in_text => {
                if op.operator != "Tj" {
                    state.next_line();
                }
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = ops.get(idx) {
                    let text = decode(&state.font_key, bytes);
                    state.show(text, 0.0, &mut spans);
                }
            }
            "TJ" if state.in_text => {
                if let Some(Object::Array(items)) = ops.first() {
                    show_array(&mut state, items, &decode, &mut spans);
                }
            }
            _ => {}
        }
    }

    spans
}

/// `TJ`: strings interleaved with kerning adjustments in 1/1000 text units.
/// Large negative adjustments act as word spaces.
fn show_array<F>(state: &mut TextState, items: &[Object], decode: &F, spans: &mut Vec<TextSpan>)
where
    F: Fn(&[u8], &[u8]) -> String,
{
    const WORD_GAP: f32 = 200.0;

    let mut combined = String::new();
    let mut kerning = 0.0;
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(&state.font_key, bytes)),
            other => {
                if let Some(n) = number(other) {
                    kerning += n;
                    if -n > WORD_GAP && !combined.is_empty() && !combined.ends_with(' ') {
                        combined.push(' ');
                    }
                }
            }
        }
    }
    state.show(combined, kerning, spans);
}

/// Group spans sharing a baseline into lines, top of the page first.
pub(crate) fn group_into_lines(mut spans: Vec<TextSpan>) -> Vec<Line> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    for span in spans {
        let same_line = current
            .first()
            .map(|first| (first.y - span.y).abs() <= first.font_size.max(span.font_size) * 0.3)
            .unwrap_or(true);
        if !same_line {
            lines.push(build_line(std::mem::take(&mut current)));
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(build_line(current));
    }
    lines
}

fn build_line(mut spans: Vec<TextSpan>) -> Line {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut text = String::new();
    for (i, span) in spans.iter().enumerate() {
        if i > 0 {
            let prev = &spans[i - 1];
            let gap = span.x - (prev.x + prev.width);
            let needs_space = gap > span.font_size * 0.15
                && !text.ends_with(char::is_whitespace)
                && !span.text.starts_with(char::is_whitespace);
            if needs_space {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
    }

    // Dominant size and face, weighted by character count
    let total: usize = spans.iter().map(|s| s.text.chars().count()).sum();
    let weighted: f32 = spans
        .iter()
        .map(|s| s.font_size * s.text.chars().count() as f32)
        .sum();
    let bold_chars: usize = spans
        .iter()
        .filter(|s| s.bold)
        .map(|s| s.text.chars().count())
        .sum();
    let font_size = if total > 0 {
        weighted / total as f32
    } else {
        spans[0].font_size
    };
    let bold = total > 0 && bold_chars * 2 > total;

    Line::new(text, 0, 0)
        .with_font(font_size, bold)
        .with_x(spans[0].x)
}

/// Whether a base font name denotes a bold face.
pub(crate) fn is_bold_font(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|w| lower.contains(w))
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Decode a PDF string without font encoding: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
pub(crate) fn decode_pdf_bytes(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
