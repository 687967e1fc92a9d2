use console::{measure_text_width, pad_str, style, truncate_str, Alignment, Style};

use crate::extractor::{SearchResult, TranslationDetail};

pub const MAX_CONTENT_CHARS: usize = 500;
const MAX_TITLE_WIDTH: usize = 70;
const DETAIL_WIDTH: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border { Round, Double }

struct BorderChars { tl: char, tr: char, bl: char, br: char, h: char, v: char }

impl Border {
    fn chars(self) -> BorderChars {
        match self {
            Border::Round => BorderChars { tl: '╭', tr: '╮', bl: '╰', br: '╯', h: '─', v: '│' },
            Border::Double => BorderChars { tl: '╔', tr: '╗', bl: '╚', br: '╝', h: '═', v: '║' },
        }
    }
}

/// A bordered box around `lines`. With `width` set, the box is exactly that
/// many columns wide and plain lines are word-wrapped to fit.
pub struct Panel {
    pub border: Border,
    pub color: Style,
    pub width: Option<usize>,
    pub padding: usize,
}

impl Panel {
    pub fn round(color: Style) -> Self { Panel { border: Border::Round, color, width: None, padding: 1 } }

    pub fn render(&self, lines: &[String]) -> String {
        let bc = self.border.chars();
        let inner = match self.width {
            Some(w) => w.saturating_sub(2 + 2 * self.padding).max(1),
            None => lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0),
        };
        let full = inner + 2 * self.padding;
        let pad = " ".repeat(self.padding);
        let v = self.color.apply_to(bc.v).to_string();

        let mut out = Vec::with_capacity(lines.len() + 2 + 2 * self.padding);
        out.push(self.color.apply_to(format!("{}{}{}", bc.tl, bc.h.to_string().repeat(full), bc.tr)).to_string());
        let blank = format!("{v}{}{v}", " ".repeat(full));
        for _ in 0..self.padding { out.push(blank.clone()); }
        for line in lines {
            let cell = pad_str(line, inner, Alignment::Left, Some("…"));
            out.push(format!("{v}{pad}{cell}{pad}{v}"));
        }
        for _ in 0..self.padding { out.push(blank.clone()); }
        out.push(self.color.apply_to(format!("{}{}{}", bc.bl, bc.h.to_string().repeat(full), bc.br)).to_string());
        out.join("\n")
    }
}

pub fn render_panel(text: &str, border: Border, color: Style) -> String {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    Panel { border, color, width: None, padding: 1 }.render(&lines)
}

/// `#`, `Title`, `Date` grid with a rule between every row.
pub fn render_results_table(results: &[SearchResult]) -> String {
    let header = ["Nº".to_string(), "Title".to_string(), "Date".to_string()];
    let rows: Vec<[String; 3]> = results
        .iter()
        .enumerate()
        .map(|(i, r)| [
            (i + 1).to_string(),
            truncate_str(&r.title, MAX_TITLE_WIDTH, "…").into_owned(),
            r.date.clone(),
        ])
        .collect();

    let mut widths = header.each_ref().map(|h| measure_text_width(h));
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) { *w = (*w).max(measure_text_width(cell)); }
    }

    let rule = |l: char, m: char, r: char| {
        let segs: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{l}{}{r}", segs.join(&m.to_string()))
    };
    let line = |cells: [String; 3]| {
        let segs: Vec<String> = cells.iter().zip(&widths).map(|(c, w)| format!(" {} ", pad_str(c, *w, Alignment::Left, None))).collect();
        format!("│{}│", segs.join("│"))
    };

    let mut out = vec![rule('┌', '┬', '┐')];
    out.push(line(header.map(|h| style(h).bold().to_string())));
    for row in rows {
        out.push(rule('├', '┼', '┤'));
        let [n, title, date] = row;
        out.push(line([
            style(n).cyan().to_string(),
            style(title).bold().to_string(),
            style(date).yellow().to_string(),
        ]));
    }
    out.push(rule('└', '┴', '┘'));
    out.join("\n")
}

pub fn render_detail_panel(detail: &TranslationDetail) -> String {
    let inner = DETAIL_WIDTH - 4;
    let mut lines: Vec<String> = Vec::new();
    let mut field = |label: &str, value: &str, value_style: &Style| {
        let label = format!("{label} ");
        let first_width = inner.saturating_sub(measure_text_width(&label)).max(1);
        let mut wrapped = wrap(value, first_width).into_iter();
        let first = wrapped.next().unwrap_or_default();
        lines.push(format!("{}{}", style(&label).bold(), value_style.apply_to(first)));
        for rest in wrapped { lines.push(value_style.apply_to(rest).to_string()); }
        lines.push(String::new());
    };

    let link = Style::new().blue().underlined();
    field("Title:", &detail.title, &Style::new());
    field("URL:", &detail.url, &link);
    field("Download link:", &detail.download_link, &link);

    lines.push(style("Description:").bold().to_string());
    let dim = Style::new().dim();
    for l in wrap(&truncate_content(&detail.content), inner) { lines.push(dim.apply_to(l).to_string()); }

    Panel { border: Border::Round, color: Style::new().white(), width: Some(DETAIL_WIDTH), padding: 1 }.render(&lines)
}

pub fn truncate_content(content: &str) -> String {
    if content.chars().count() <= MAX_CONTENT_CHARS { return content.to_string(); }
    let mut cut: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Greedy word wrap on plain text; words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for src in text.lines() {
        let mut cur = String::new();
        for word in src.split_whitespace() {
            for piece in split_long(word, width) {
                let need = if cur.is_empty() { piece.chars().count() } else { cur.chars().count() + 1 + piece.chars().count() };
                if need > width && !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
                if !cur.is_empty() { cur.push(' '); }
                cur.push_str(&piece);
            }
        }
        out.push(cur);
    }
    if out.is_empty() { out.push(String::new()); }
    out
}

fn split_long(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
