//! Paged PDF export of the rendered block outline.
//!
//! Text is set with the standard Type1 fonts, so nothing is embedded and
//! characters outside Latin-1 are replaced with `?`.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document as PdfDocument, Object, ObjectId, Stream, dictionary};

use super::ExportError;
use crate::render::{Block, BlockKind, RenderedOutput};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const LIST_INDENT: i64 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Mono,
}

impl Font {
    const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
        }
    }

    /// Average glyph width as a fraction of the font size, in tenths.
    const fn width_tenths(self) -> i64 {
        match self {
            Self::Regular | Self::Bold => 5,
            Self::Mono => 6,
        }
    }
}

struct Style {
    font: Font,
    size: i64,
    indent: i64,
    space_after: i64,
}

fn style_for(block: &Block) -> Style {
    match block.kind {
        BlockKind::Heading(level) => Style {
            font: Font::Bold,
            size: match level {
                1 => 22,
                2 => 18,
                3 => 15,
                _ => 13,
            },
            indent: 0,
            space_after: 8,
        },
        BlockKind::Code => Style {
            font: Font::Mono,
            size: 9,
            indent: 8,
            space_after: 10,
        },
        BlockKind::ListItem(depth) => Style {
            font: Font::Regular,
            size: 11,
            indent: LIST_INDENT * (i64::try_from(depth).unwrap_or(0) + 1),
            space_after: 3,
        },
        BlockKind::Quote => Style {
            font: Font::Regular,
            size: 11,
            indent: LIST_INDENT,
            space_after: 8,
        },
        BlockKind::Paragraph | BlockKind::Rule => Style {
            font: Font::Regular,
            size: 11,
            indent: 0,
            space_after: 8,
        },
    }
}

/// Lays blocks out top to bottom, starting new pages as needed.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    y: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn current(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_room(&mut self, height: i64) {
        if self.y - height < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text_line(&mut self, font: Font, size: i64, x: i64, text: &str) {
        let leading = size * 14 / 10;
        self.ensure_room(leading);
        self.y -= leading;
        let y = self.y;
        self.current().extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource().as_bytes().to_vec()),
                    Object::Integer(size),
                ],
            ),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
            Operation::new("Tj", vec![Object::string_literal(latin1(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn rule(&mut self) {
        self.ensure_room(12);
        self.y -= 6;
        let y = self.y;
        self.current().extend([
            Operation::new("m", vec![Object::Integer(MARGIN), Object::Integer(y)]),
            Operation::new(
                "l",
                vec![Object::Integer(PAGE_WIDTH - MARGIN), Object::Integer(y)],
            ),
            Operation::new("S", vec![]),
        ]);
        self.y -= 6;
    }

    fn space(&mut self, amount: i64) {
        self.y -= amount;
    }

    fn block(&mut self, block: &Block) {
        if block.kind == BlockKind::Rule {
            self.rule();
            return;
        }
        let style = style_for(block);
        let x = MARGIN + style.indent;
        let columns = wrap_columns(style.font, style.size, PAGE_WIDTH - MARGIN - x);

        let text = match &block.marker {
            Some(marker) => format!("{marker} {}", block.text),
            None => block.text.clone(),
        };
        for source_line in text.lines() {
            let wrapped = if style.font == Font::Mono {
                hard_wrap(source_line, columns)
            } else {
                word_wrap(source_line, columns)
            };
            for line in wrapped {
                self.text_line(style.font, style.size, x, &line);
            }
        }
        self.space(style.space_after);
    }
}

/// Write the rendered outline as a PDF at `path`.
///
/// The file is produced in a staging file next to `path` and moved into
/// place only once fully written; on any failure the staging file is
/// removed.
///
/// # Errors
///
/// Returns [`ExportError::Pdf`] if the PDF cannot be assembled, or
/// [`ExportError::Io`] if the staging file cannot be created or persisted.
pub fn write_pdf(rendered: &RenderedOutput, path: &Path) -> Result<(), ExportError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut staging = tempfile::Builder::new()
        .prefix(".document-")
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .map_err(io_err)?;

    let mut pdf = build_pdf(rendered.blocks())?;
    pdf.save_to(&mut staging)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    staging
        .persist(path)
        .map_err(|err| io_err(err.error))?;
    Ok(())
}

fn build_pdf(blocks: &[Block]) -> Result<PdfDocument, ExportError> {
    let mut writer = PageWriter::new();
    for block in blocks {
        writer.block(block);
    }

    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font = |doc: &mut PdfDocument, name: &str| {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => name,
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let mono = font(&mut doc, "Courier");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => mono,
        },
    });

    let mut kids: Vec<ObjectId> = Vec::with_capacity(writer.pages.len());
    for operations in writer.pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|err| ExportError::Pdf(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id);
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
        "Count" => Object::Integer(count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

fn wrap_columns(font: Font, size: i64, width: i64) -> usize {
    let glyph = (size * font.width_tenths() / 10).max(1);
    usize::try_from(width / glyph).unwrap_or(1).max(1)
}

/// Greedy word wrap; words longer than a line are split.
fn word_wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        for piece in hard_wrap(word, columns) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > columns {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a line every `columns` characters, keeping whitespace intact.
fn hard_wrap(text: &str, columns: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(columns.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u8::try_from(u32::from(ch)) {
            Ok(b'\t') => b' ',
            // C1 controls map to other glyphs under WinAnsiEncoding.
            Ok(0x80..=0x9F) | Err(_) => b'?',
            Ok(byte) => byte,
        })
        .collect()
}
