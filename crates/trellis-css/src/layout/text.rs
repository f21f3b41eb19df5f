//! Text processing ahead of line layout.
//!
//! [§ 4 White Space Processing & Control Characters](https://www.w3.org/TR/css-text-3/#white-space-processing)
//! [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)
//!
//! Both passes run over an entire inline formatting context at once, because
//! whether a space collapses and whether a letter starts a word both depend
//! on the text that came before it, possibly in another text box.

use trellis_common::Diagnostics;

use crate::style::{TextTransform, WhiteSpace};

use super::layout_box::{BoxType, LayoutBox};

/// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
///
/// Collapse the whitespace of one text run.
///
/// `prev_space` carries whether the text before this run ended in a
/// collapsible space (or is the start of a line); it is updated for the next
/// run.
///
/// "Any collapsible space immediately following another collapsible space,
/// even one outside the boundary of the inline containing that space,
/// provided both spaces are within the same inline formatting context, is
/// collapsed to have zero advance width."
#[must_use]
pub fn collapse_whitespace(text: &str, mode: WhiteSpace, prev_space: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());

    if !mode.collapses_spaces() {
        out.push_str(text);
        *prev_space = text.ends_with('\n');
        return out;
    }

    for ch in text.chars() {
        match ch {
            // "Segment breaks are transformed ... preserved as forced line
            // breaks" for pre-line, and the spaces around them are removed.
            '\n' if mode.preserves_newlines() => {
                if out.ends_with(' ') {
                    let _ = out.pop();
                }
                out.push('\n');
                *prev_space = true;
            }
            ' ' | '\t' | '\n' | '\r' | '\x0C' => {
                if !*prev_space {
                    out.push(' ');
                    *prev_space = true;
                }
            }
            _ => {
                out.push(ch);
                *prev_space = false;
            }
        }
    }
    out
}

/// [§ 2.1 Case Transforms: the text-transform property](https://www.w3.org/TR/css-text-3/#text-transform-property)
///
/// Apply `transform` to already-collapsed text. `prev_letter` carries whether
/// the preceding character was a letter, so a word split across inline
/// boxes is capitalized once.
#[must_use]
pub fn apply_text_transform(text: &str, transform: TextTransform, prev_letter: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match transform {
            TextTransform::None => out.push(ch),
            TextTransform::Uppercase => out.extend(ch.to_uppercase()),
            TextTransform::Lowercase => out.extend(ch.to_lowercase()),
            // "Puts the first typographic letter unit of each word ... in
            // titlecase". A word starts at a letter that follows a non-letter;
            // the rest of the word is lowercased.
            TextTransform::Capitalize => {
                if !ch.is_alphabetic() {
                    out.push(ch);
                } else if *prev_letter {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
            }
            TextTransform::FullWidth => out.push(full_width(ch)),
            TextTransform::FullSizeKana => out.push(full_size_kana(ch)),
        }
        *prev_letter = ch.is_alphabetic();
    }
    out
}

/// "Puts all typographic character units in fullwidth form."
fn full_width(ch: char) -> char {
    match ch {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(u32::from(ch) + 0xFEE0).unwrap_or(ch),
        _ => ch,
    }
}

/// [Appendix G: Small Kana Mappings](https://www.w3.org/TR/css-text-3/#small-kana)
fn full_size_kana(ch: char) -> char {
    match ch {
        'ぁ' => 'あ',
        'ぃ' => 'い',
        'ぅ' => 'う',
        'ぇ' => 'え',
        'ぉ' => 'お',
        'ゕ' => 'か',
        'ゖ' => 'け',
        'っ' => 'つ',
        'ゃ' => 'や',
        'ゅ' => 'ゆ',
        'ょ' => 'よ',
        'ゎ' => 'わ',
        'ァ' => 'ア',
        'ィ' => 'イ',
        'ゥ' => 'ウ',
        'ェ' => 'エ',
        'ォ' => 'オ',
        'ヵ' => 'カ',
        'ㇰ' => 'ク',
        'ヶ' => 'ケ',
        'ㇱ' => 'シ',
        'ㇲ' => 'ス',
        'ッ' => 'ツ',
        'ㇳ' => 'ト',
        'ㇴ' => 'ヌ',
        'ㇵ' => 'ハ',
        'ㇶ' => 'ヒ',
        'ㇷ' => 'フ',
        'ㇸ' => 'ヘ',
        'ㇹ' => 'ホ',
        'ㇺ' => 'ム',
        'ャ' => 'ヤ',
        'ュ' => 'ユ',
        'ョ' => 'ヨ',
        'ㇻ' => 'ラ',
        'ㇼ' => 'リ',
        'ㇽ' => 'ル',
        'ㇾ' => 'レ',
        'ㇿ' => 'ロ',
        'ヮ' => 'ワ',
        'ｧ' => 'ｱ',
        'ｨ' => 'ｲ',
        'ｩ' => 'ｳ',
        'ｪ' => 'ｴ',
        'ｫ' => 'ｵ',
        'ｯ' => 'ﾂ',
        'ｬ' => 'ﾔ',
        'ｭ' => 'ﾕ',
        'ｮ' => 'ﾖ',
        _ => ch,
    }
}

/// Running state of the forward pass.
struct Collapser<'d> {
    diag: &'d Diagnostics,
    prev_space: bool,
    prev_letter: bool,
}

impl Collapser<'_> {
    fn line_start(&mut self) {
        self.prev_space = true;
        self.prev_letter = false;
    }

    fn run(&mut self, boxes: &mut [LayoutBox<'_>]) {
        for b in boxes {
            let node = b.node;
            match &mut b.box_type {
                BoxType::Text(text) => {
                    let (mode, transform) = node.map_or(
                        (WhiteSpace::Normal, TextTransform::None),
                        |n| (n.white_space(self.diag), n.text_transform(self.diag)),
                    );
                    let collapsed = collapse_whitespace(text, mode, &mut self.prev_space);
                    *text = apply_text_transform(&collapsed, transform, &mut self.prev_letter);
                }
                BoxType::Inline => self.run(&mut b.children),
                BoxType::Replaced { inline: true, .. } => {
                    self.prev_space = false;
                    self.prev_letter = false;
                }
                BoxType::LineBreak
                | BoxType::Block
                | BoxType::AnonymousBlock
                | BoxType::Replaced { inline: false, .. } => self.line_start(),
            }
        }
    }
}

/// [§ 4.1.2 Phase II: Trimming and Positioning](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
///
/// "A sequence of collapsible spaces at the end of a line is removed."
///
/// Walks backwards; `at_line_end` is true while everything after the current
/// position up to a forced break is empty.
fn trim_line_ends(boxes: &mut [LayoutBox<'_>], at_line_end: &mut bool, diag: &Diagnostics) {
    for b in boxes.iter_mut().rev() {
        let node = b.node;
        match &mut b.box_type {
            BoxType::Text(text) => {
                let collapsible =
                    node.is_none_or(|n| n.white_space(diag).collapses_spaces());
                if collapsible && *at_line_end && text.ends_with(' ') {
                    let _ = text.pop();
                }
                if !text.is_empty() {
                    *at_line_end = false;
                }
            }
            BoxType::Inline => trim_line_ends(&mut b.children, at_line_end, diag),
            BoxType::Replaced { inline: true, .. } => *at_line_end = false,
            BoxType::LineBreak
            | BoxType::Block
            | BoxType::AnonymousBlock
            | BoxType::Replaced { inline: false, .. } => *at_line_end = true,
        }
    }
}

fn remove_empty_text(boxes: &mut Vec<LayoutBox<'_>>) {
    boxes.retain(|b| !matches!(&b.box_type, BoxType::Text(text) if text.is_empty()));
    for b in boxes {
        if b.box_type == BoxType::Inline {
            remove_empty_text(&mut b.children);
        }
    }
}

/// Run whitespace processing and text-transform over the contents of one
/// inline formatting context, then drop text boxes left empty.
pub(crate) fn process_inline_content(boxes: &mut Vec<LayoutBox<'_>>, diag: &Diagnostics) {
    let mut collapser = Collapser {
        diag,
        prev_space: true,
        prev_letter: false,
    };
    collapser.run(boxes);
    trim_line_ends(boxes, &mut true, diag);
    remove_empty_text(boxes);
}
