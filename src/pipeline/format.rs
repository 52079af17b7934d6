//! The Block Formatter: single-pass conversion of restricted Markdown into
//! display-ready structural HTML.
//!
//! ## Why a line classifier instead of a Markdown parser?
//!
//! The generated articles use a small, well-behaved subset of Markdown
//! (headings, lists, tables, fences, quotes, inline spans), and the output is
//! a flat sequence of HTML fragments — not an AST. A priority-ordered line
//! classifier covers that subset in one pass, never fails, and degrades
//! malformed input to plain paragraphs instead of erroring. Full-spec parsers
//! reject or "correct" exactly the kind of ragged text LLMs emit.
//!
//! ## Classification order
//!
//! Each line is trimmed and tested against the rules below, first match wins.
//! While a code fence is open only the fence-close rule is tested; everything
//! else is stored verbatim as fence body.
//!
//! 1. blank line        — flushes an open list, nothing else
//! 2. heading           — 1–4 `#` + space
//! 3. blockquote        — one or more `>` + space
//! 4. table row         — leading `|`
//! 5. task item         — `- [ ]` / `- [x]`
//! 6. unordered item    — `-` or `*` + space
//! 7. ordered item      — digits + `.` + space
//! 8. code fence marker — three backticks, optional language tag
//! 9. horizontal rule   — 3+ of `-`, `*` or `_`, nothing else
//! 10. paragraph        — everything else
//!
//! Reordering these rules changes observable output on lines that match more
//! than one pattern; do not reorder.
//!
//! ## Open-block lifecycle
//!
//! Lists, tables and blockquotes accumulate across consecutive matching
//! lines. A list is flushed by a blank line, a list-kind switch, or a
//! paragraph. Tables and blockquotes are flushed by the first non-blank line
//! that does not belong to them, and any block still open at end-of-input is
//! flushed then. When several blocks flush before one line, the order is
//! list, table, blockquote — the same order as the finalization pass.

use once_cell::sync::Lazy;
use regex::Regex;

/// Convert a Markdown-like text into a single string of HTML fragments.
///
/// Total over all inputs: never fails, never panics on malformed constructs.
/// Pure and deterministic — repeated calls on the same input are
/// byte-identical. Empty input yields an empty string.
pub fn format_markdown(text: &str) -> String {
    let mut state = FormatState::default();

    for raw in text.split('\n') {
        let line = raw.trim();

        // An open fence suspends every other rule.
        if state.fence.is_some() {
            if line.starts_with("```") {
                state.flush_fence();
            } else if let Some(fence) = state.fence.as_mut() {
                fence.body.push(raw.to_string());
            }
            continue;
        }

        // Rule 1: blank line.
        if line.is_empty() {
            state.flush_list();
            continue;
        }

        // Rule 2: heading. Content is emitted as-is, without inline spans.
        if let Some((level, content)) = parse_heading(line) {
            state.flush_table();
            state.flush_quote();
            state.out.push(format!("<h{level}>{content}</h{level}>"));
            continue;
        }

        // Rule 3: blockquote. Nesting level is marker count minus one.
        if let Some((level, content)) = parse_quote(line) {
            state.flush_table();
            let quote = state.quote.get_or_insert_with(OpenQuote::default);
            quote.entries.push(QuoteEntry {
                html: format_inline(content),
                level,
            });
            continue;
        }

        // Rule 4: table row. The first pipe-led line fixes the header; a
        // following separator row (cells of dashes/colons) is discarded;
        // everything after is data.
        if line.starts_with('|') {
            state.flush_quote();
            let cells = split_cells(line);
            match state.table {
                None => {
                    state.table = Some(OpenTable {
                        headers: cells,
                        rows: Vec::new(),
                    });
                }
                Some(ref mut table) => {
                    if !is_separator_cells(&cells) {
                        table.rows.push(cells);
                    }
                }
            }
            continue;
        }

        // Rule 5: task-list item.
        if let Some((checked, content)) = parse_task(line) {
            state.flush_table();
            state.flush_quote();
            let items = state.list_items(ListKind::Task);
            let checkbox = if checked {
                r#"<input type="checkbox" checked disabled />"#
            } else {
                r#"<input type="checkbox" disabled />"#
            };
            items.push(format!("<li>{checkbox}{}</li>", format_inline(content)));
            continue;
        }

        // Rule 6: unordered item. Indent comes from the raw line's leading
        // spaces, two spaces per level.
        if let Some(content) = parse_unordered(line) {
            state.flush_table();
            state.flush_quote();
            let indent = indent_level(raw);
            let items = state.list_items(ListKind::Unordered);
            items.push(render_item(indent, &format_inline(content.trim())));
            continue;
        }

        // Rule 7: ordered item. No inline spans here — only unordered and
        // task items get them.
        if let Some(content) = parse_ordered(line) {
            state.flush_table();
            state.flush_quote();
            let indent = indent_level(raw);
            let items = state.list_items(ListKind::Ordered);
            items.push(render_item(indent, content.trim()));
            continue;
        }

        // Rule 8: code fence opener.
        if let Some(language) = line.strip_prefix("```") {
            state.flush_table();
            state.flush_quote();
            state.fence = Some(OpenFence {
                language: language.trim().to_string(),
                body: Vec::new(),
            });
            continue;
        }

        // Rule 9: horizontal rule.
        if is_horizontal_rule(line) {
            state.flush_table();
            state.flush_quote();
            state.out.push("<hr />".to_string());
            continue;
        }

        // Rule 10: paragraph.
        state.flush_list();
        state.flush_table();
        state.flush_quote();
        state
            .out
            .push(format!("<p>{}</p>", format_inline(line)));
    }

    // Finalization: anything still open is flushed in a fixed order. An
    // unterminated fence keeps everything after its marker as body and is
    // still emitted as a closed fragment.
    state.flush_list();
    state.flush_table();
    state.flush_quote();
    state.flush_fence();

    state.out.concat()
}

// ── Open-block state ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
    Task,
}

struct OpenList {
    kind: ListKind,
    items: Vec<String>,
}

struct OpenTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Default)]
struct OpenQuote {
    entries: Vec<QuoteEntry>,
}

struct QuoteEntry {
    html: String,
    // Tracked from the marker count but flattened at render time.
    #[allow(dead_code)]
    level: usize,
}

struct OpenFence {
    language: String,
    body: Vec<String>,
}

#[derive(Default)]
struct FormatState {
    out: Vec<String>,
    list: Option<OpenList>,
    table: Option<OpenTable>,
    quote: Option<OpenQuote>,
    fence: Option<OpenFence>,
}

impl FormatState {
    /// Item buffer for a list of the given kind, flushing any open list of a
    /// different kind first. Lists never interleave.
    fn list_items(&mut self, kind: ListKind) -> &mut Vec<String> {
        if self.list.as_ref().is_some_and(|l| l.kind != kind) {
            self.flush_list();
        }
        &mut self
            .list
            .get_or_insert_with(|| OpenList {
                kind,
                items: Vec::new(),
            })
            .items
    }

    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            let tag = match list.kind {
                ListKind::Ordered => "ol",
                ListKind::Unordered | ListKind::Task => "ul",
            };
            self.out
                .push(format!("<{tag}>{}</{tag}>", list.items.concat()));
        }
    }

    fn flush_table(&mut self) {
        if let Some(table) = self.table.take() {
            let mut html = String::from("<table><thead><tr>");
            for header in &table.headers {
                html.push_str(&format!("<th>{header}</th>"));
            }
            html.push_str("</tr></thead><tbody>");
            for row in &table.rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str(&format!("<td>{cell}</td>"));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table>");
            self.out.push(html);
        }
    }

    /// Render the accumulated quote entries as one flat blockquote joined by
    /// line breaks. Nesting levels are tracked but not rendered distinctly.
    fn flush_quote(&mut self) {
        if let Some(quote) = self.quote.take() {
            let body: Vec<&str> = quote.entries.iter().map(|e| e.html.as_str()).collect();
            self.out
                .push(format!("<blockquote>{}</blockquote>", body.join("<br/>")));
        }
    }

    fn flush_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            let escaped = escape_html(&fence.body.join("\n"));
            self.out.push(format!(
                "<pre><code class=\"language-{}\">{escaped}</code></pre>",
                fence.language
            ));
        }
    }
}

// ── Line parsers ─────────────────────────────────────────────────────────────

/// 1–4 `#` followed by a space. The remainder is the heading content.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=4).contains(&level) {
        if let Some(content) = line[level..].strip_prefix(' ') {
            return Some((level, content));
        }
    }
    None
}

/// One or more `>` followed by a space. Returns (nesting level, content).
fn parse_quote(line: &str) -> Option<(usize, &str)> {
    let markers = line.chars().take_while(|&c| c == '>').count();
    if markers == 0 {
        return None;
    }
    let content = line[markers..].strip_prefix(' ')?;
    Some((markers - 1, content.trim_start()))
}

/// `- [ ]` or `- [x]` (case-insensitive x) followed by a space and content.
fn parse_task(line: &str) -> Option<(bool, &str)> {
    let rest = line.strip_prefix("- [")?;
    let mut chars = rest.chars();
    let checked = match chars.next()? {
        'x' | 'X' => true,
        ' ' => false,
        _ => return None,
    };
    let content = chars.as_str().strip_prefix("] ")?;
    Some((checked, content))
}

fn parse_unordered(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

fn parse_ordered(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

/// Three or more of the same rule character and nothing else.
fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&marker| line.chars().all(|c| c == marker))
}

/// Indent level of a list item: leading spaces on the raw line, two per level.
fn indent_level(raw: &str) -> usize {
    raw.chars().take_while(|&c| c == ' ').count() / 2
}

fn render_item(indent: usize, content: &str) -> String {
    if indent > 0 {
        format!("<li data-indent=\"{indent}\">{content}</li>")
    } else {
        format!("<li>{content}</li>")
    }
}

/// Split a pipe-led line into trimmed cells, dropping empty splits (the
/// leading/trailing pipes produce empty fragments).
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// A separator row's cells consist only of dashes and colons.
fn is_separator_cells(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|c| c.chars().all(|ch| ch == '-' || ch == ':'))
}

// ── Inline spans ─────────────────────────────────────────────────────────────
//
// Ordered, non-greedy, global substitutions. Order matters: images before
// links (both use bracket syntax), bold before italic (a lone `*` inside
// `**…**` would otherwise be consumed by the italic rule first).

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static RE_STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.*?)~~").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());

/// Apply the inline-span substitutions to a single line's content.
///
/// Used for blockquote entries, task and unordered items, and paragraphs.
/// Headings, ordered items and table cells are emitted as-is.
fn format_inline(content: &str) -> String {
    let s = RE_IMAGE.replace_all(content, r#"<img src="${2}" alt="${1}" />"#);
    let s = RE_LINK.replace_all(&s, r#"<a href="${2}">${1}</a>"#);
    let s = RE_BOLD.replace_all(&s, "<strong>${1}</strong>");
    let s = RE_ITALIC.replace_all(&s, "<em>${1}</em>");
    let s = RE_STRIKE.replace_all(&s, "<del>${1}</del>");
    let s = RE_CODE.replace_all(&s, "<code>${1}</code>");
    s.into_owned()
}

/// Entity-escape `&`, `<`, `>` for code-fence bodies. `&` first so already
/// produced entities are not double-escaped.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Tests ────────────────────────────────────────────────────────────────────
