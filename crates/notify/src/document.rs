// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A small text-only PDF writer.
//!
//! Produces PDF 1.4 files using the two standard Helvetica faces, so no
//! fonts need to be embedded. Text is laid out top to bottom on US Letter
//! pages, long lines wrap at word boundaries, and text flows onto a new
//! page when the current one fills.

use std::fmt::Write as _;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN_LEFT: u32 = 50;
const TOP_Y: u32 = 742;
const BOTTOM_Y: u32 = 60;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN_LEFT;

/// Which standard font a line is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
}

impl Face {
    const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextLine {
    face: Face,
    size: u32,
    text: String,
}

/// Builds a PDF from a sequence of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfDocument {
    lines: Vec<TextLine>,
}

impl PdfDocument {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds a title line in 20pt bold.
    #[must_use]
    pub fn title(self, text: &str) -> Self {
        self.push(Face::Bold, 20, text)
    }

    /// Adds a section heading in 14pt bold.
    #[must_use]
    pub fn heading(self, text: &str) -> Self {
        self.push(Face::Bold, 14, text)
    }

    /// Adds a body line in 11pt regular.
    #[must_use]
    pub fn line(self, text: &str) -> Self {
        self.push(Face::Regular, 11, text)
    }

    /// Adds vertical space.
    #[must_use]
    pub fn blank(self) -> Self {
        self.push(Face::Regular, 11, "")
    }

    fn push(mut self, face: Face, size: u32, text: &str) -> Self {
        for row in wrap_text(text, max_chars(size)) {
            self.lines.push(TextLine {
                face,
                size,
                text: row,
            });
        }
        self
    }

    /// Number of pages the document will render to.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.paginate().len()
    }

    fn paginate(&self) -> Vec<Vec<(u32, &TextLine)>> {
        let mut pages: Vec<Vec<(u32, &TextLine)>> = vec![Vec::new()];
        let mut y: u32 = TOP_Y;
        for line in &self.lines {
            let advance: u32 = line.size + line.size / 2;
            if y < BOTTOM_Y + advance {
                pages.push(Vec::new());
                y = TOP_Y;
            }
            y -= advance;
            if let Some(page) = pages.last_mut() {
                page.push((y, line));
            }
        }
        pages
    }

    /// Serializes the document.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let pages: Vec<Vec<(u32, &TextLine)>> = self.paginate();

        // 1: catalog, 2: page tree, 3-4: fonts, then a page and its
        // content stream per page.
        let mut objects: Vec<String> = Vec::new();
        let kids: String = (0..pages.len())
            .map(|i| format!("{} 0 R", 5 + i * 2))
            .collect::<Vec<String>>()
            .join(" ");

        objects.push(String::from("<< /Type /Catalog /Pages 2 0 R >>"));
        objects.push(format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            pages.len()
        ));
        objects.push(String::from(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        ));
        objects.push(String::from(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        ));

        for (index, page) in pages.iter().enumerate() {
            let content_id: usize = 6 + index * 2;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
            ));

            let mut stream: String = String::new();
            for (y, line) in page {
                if line.text.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    stream,
                    "BT /{} {} Tf {MARGIN_LEFT} {y} Td ({}) Tj ET",
                    line.face.resource(),
                    line.size,
                    escape_text(&line.text)
                );
            }
            objects.push(format!(
                "<< /Length {} >>\nstream\n{stream}endstream",
                stream.len()
            ));
        }

        let mut out: String = String::from("%PDF-1.4\n");
        let mut offsets: Vec<usize> = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            let _ = writeln!(out, "{} 0 obj\n{body}\nendobj", index + 1);
        }

        let xref_offset: usize = out.len();
        let _ = writeln!(out, "xref\n0 {}\n0000000000 65535 f ", objects.len() + 1);
        for offset in &offsets {
            let _ = writeln!(out, "{offset:010} 00000 n ");
        }
        let _ = writeln!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
            objects.len() + 1
        );

        out.into_bytes()
    }
}

/// Characters that fit on one line at `size` points.
///
/// Assumes an average Helvetica advance of 0.55 em, which holds for mixed
/// case text and leaves a little slack for bold.
pub(crate) fn max_chars(size: u32) -> usize {
    let chars: u32 = (TEXT_WIDTH * 20) / (size.max(1) * 11);
    usize::try_from(chars.max(1)).unwrap_or(1)
}

/// Greedy word wrap. Runs of whitespace collapse to one space and words
/// longer than a line are split.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut current_len: usize = 0;

    for word in text.split_whitespace() {
        let mut word: &str = word;
        loop {
            let word_len: usize = word.chars().count();
            let needed: usize = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };
            if needed <= max_chars {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
                break;
            }
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            let split: usize = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(index, _)| index);
            rows.push(word[..split].to_string());
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }

    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// The `WinAnsiEncoding` code for characters outside ASCII.
///
/// Latin-1 maps straight through; the typographic marks that Windows-1252
/// places in 0x80..=0x9F are listed explicitly.
fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        '\u{a0}'..='\u{ff}' => u8::try_from(c).ok(),
        '\u{20ac}' => Some(0x80),
        '\u{2026}' => Some(0x85),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201c}' => Some(0x93),
        '\u{201d}' => Some(0x94),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        _ => None,
    }
}

/// Escapes a string for a PDF literal.
///
/// The output is pure ASCII: characters the fonts can show are written as
/// octal escapes and anything else becomes `?`.
pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped: String = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => {
                    let _ = write!(escaped, "\\{code:03o}");
                }
                None => escaped.push('?'),
            },
        }
    }
    escaped
}
