//! Builds small PDFs in memory for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: content, font size in points, bold face.
pub type TestLine<'a> = (&'a str, i64, bool);

const TOP: i64 = 760;
const LEFT: i64 = 72;

/// Assembles a multi-page PDF with Helvetica text.
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<Vec<(String, i64, bool)>>,
    title: Option<String>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Info dictionary title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a page with lines laid out from the top down.
    pub fn page(mut self, lines: &[TestLine]) -> Self {
        self.pages.push(
            lines
                .iter()
                .map(|(t, s, b)| (t.to_string(), *s, *b))
                .collect(),
        );
        self
    }

    /// Add a page with no content.
    pub fn blank_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in &self.pages {
            let mut operations = Vec::new();
            let mut y = TOP;
            for (text, size, is_bold) in lines {
                let font = if *is_bold { "F2" } else { "F1" };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                operations.push(Operation::new("Td", vec![LEFT.into(), y.into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
                operations.push(Operation::new("ET", vec![]));
                y -= size * 2 + 4;
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title.as_str()),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    pub fn write_to(&self, path: &std::path::Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

pub const BODY: &[&str] = &[
    "Ownership is a set of rules that govern how a program manages its memory.",
    "Every value has a single owner, and the value is dropped when the owner goes away.",
    "Borrowing lets code use a value without taking ownership of it at all.",
];

/// Body lines at 11pt, regular face.
pub fn body() -> Vec<TestLine<'static>> {
    BODY.iter().map(|t| (*t, 11, false)).collect()
}

/// A four-page handbook with a typographic title, numbered sections, an
/// uppercase heading, noise lines and a running footer.
pub fn handbook() -> PdfBuilder {
    let footer: TestLine = ("Acme Handbook Series", 11, true);

    let mut p1 = vec![("Understanding Rust Ownership", 24, true)];
    p1.extend(body());
    p1.push(footer);

    let mut p2 = vec![("1. Introduction", 16, true)];
    p2.extend(body());
    p2.push(("1.1 Background", 13, true));
    p2.extend(body());
    p2.push(footer);

    let mut p3 = vec![("1.2.3 Deep Detail", 12, true)];
    p3.extend(body());
    p3.push(("KEY FINDINGS", 11, true));
    p3.extend(body());
    p3.push(("04/10/2024", 11, false));
    p3.push(("3", 11, false));
    p3.push(footer);

    let mut p4 = vec![("2. Conclusion", 16, true)];
    p4.extend(body());
    p4.push(footer);

    PdfBuilder::new().page(&p1).page(&p2).page(&p3).page(&p4)
}
