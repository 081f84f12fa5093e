//! Plain-text tables for terminal output.

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 6;
const COLUMN_GAP: &str = "  ";
/// Cells in a score bar.
pub const BAR_WIDTH: usize = 10;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Scores at or above this are painted as strengths, below `LOW_SCORE` as gaps.
const HIGH_SCORE: f64 = 0.6;
const LOW_SCORE: f64 = 0.4;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Rows of pre-formatted cells under a header.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells render as `-`.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let widths = self.fit(options.max_width);
        let aligns: Vec<Align> = (0..self.headers.len()).map(|i| self.align(i)).collect();

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(text, &width)| pad(&clip(text, width), width, Align::Left))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        let divider = "-".repeat(header.chars().count());

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(header);
        lines.push(divider);
        for row in &self.rows {
            let line = widths
                .iter()
                .zip(&aligns)
                .enumerate()
                .map(|(index, (&width, &align))| {
                    let text = row.get(index).map_or("-", String::as_str);
                    let cell = pad(&clip(text, width), width, align);
                    if options.color {
                        paint(cell, text)
                    } else {
                        cell
                    }
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            lines.push(line);
        }
        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                    .max()
                    .unwrap_or(MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Shrink the widest columns, one character at a time, until the table
    /// fits `max_width` or every column is at its floor.
    fn fit(&self, max_width: Option<usize>) -> Vec<usize> {
        let mut widths = self.natural_widths();
        let Some(max_width) = max_width else {
            return widths;
        };
        let floors: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();
        let gaps = COLUMN_GAP.len() * widths.len().saturating_sub(1);
        let mut overflow = (widths.iter().sum::<usize>() + gaps).saturating_sub(max_width);

        while overflow > 0 {
            let widest = widths
                .iter()
                .zip(&floors)
                .enumerate()
                .filter(|(_, (width, floor))| width > floor)
                .max_by_key(|(index, (width, _))| (**width, std::cmp::Reverse(*index)))
                .map(|(index, _)| index);
            let Some(index) = widest else {
                break;
            };
            widths[index] -= 1;
            overflow -= 1;
        }
        widths
    }

    /// Numeric columns (scores, counts) are right-aligned.
    fn align(&self, index: usize) -> Align {
        let mut cells = self
            .rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter(|cell| cell.as_str() != "-")
            .peekable();
        if cells.peek().is_some() && cells.all(|cell| cell.parse::<f64>().is_ok()) {
            Align::Right
        } else {
            Align::Left
        }
    }
}

/// A fixed-width bar for a score in `[0, 1]`.
#[must_use]
pub fn score_bar(score: f64) -> String {
    let filled = (0..BAR_WIDTH)
        .take_while(|step| {
            #[allow(clippy::cast_precision_loss)]
            let threshold = (*step as f64 + 0.5) / BAR_WIDTH as f64;
            score.clamp(0.0, 1.0) >= threshold
        })
        .count();
    let mut bar = String::with_capacity(BAR_WIDTH * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    bar
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

/// Wrap an already padded cell in a color chosen from its raw text.
fn paint(cell: String, raw: &str) -> String {
    match color_for(raw) {
        Some(code) => format!("\u{1b}[{code}m{cell}\u{1b}[0m"),
        None => cell,
    }
}

fn color_for(raw: &str) -> Option<&'static str> {
    let score = if raw.starts_with([FILLED, EMPTY]) {
        #[allow(clippy::cast_precision_loss)]
        let ratio = raw.chars().filter(|c| *c == FILLED).count() as f64 / BAR_WIDTH as f64;
        Some(ratio)
    } else if raw.contains('.') {
        raw.parse::<f64>().ok().filter(|v| (0.0..=1.0).contains(v))
    } else {
        None
    };

    if let Some(score) = score {
        return if score >= HIGH_SCORE {
            Some("32")
        } else if score < LOW_SCORE {
            Some("31")
        } else {
            None
        };
    }

    match raw {
        "enriched" => Some("32"),
        "unenriched" | "malformed_response" | "unknown_question" | "empty_input" => Some("33"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain() -> TableOptions {
        TableOptions {
            max_width: None,
            color: false,
        }
    }

    #[test]
    fn numeric_columns_align_right() {
        let mut table = Table::new(["stream", "overall"]);
        table.push(vec!["Physics".into(), "0.75".into()]);
        table.push(vec!["Nursing".into(), "0.625".into()]);
        let out = table.render(plain());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "stream   overall");
        assert_eq!(lines[2], "Physics     0.75");
        assert_eq!(lines[3], "Nursing    0.625");
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn wide_columns_are_clipped_to_fit() {
        let mut table = Table::new(["stream", "overall"]);
        table.push(vec![
            "Journalism & Mass Communication".into(),
            "0.640".into(),
        ]);
        let out = table.render(TableOptions {
            max_width: Some(20),
            color: false,
        });
        let row = out.lines().nth(2).expect("row line");
        assert_eq!(row.chars().count(), 20);
        assert!(row.contains('…'));
        assert!(row.ends_with("0.640"));
    }

    #[test]
    fn short_rows_are_filled_with_dashes() {
        let mut table = Table::new(["trait", "score"]);
        table.push(vec!["creativity".into()]);
        let out = table.render(plain());
        assert!(out.lines().nth(2).is_some_and(|l| l.trim_end().ends_with('-')));
    }

    #[test]
    fn score_bars_round_to_the_nearest_cell() {
        assert_eq!(score_bar(0.0), "░░░░░░░░░░");
        assert_eq!(score_bar(0.72), "███████░░░");
        assert_eq!(score_bar(1.0), "██████████");
        assert_eq!(score_bar(1.7), "██████████");
    }

    #[test]
    fn scores_and_statuses_pick_colors() {
        assert_eq!(color_for("0.812"), Some("32"));
        assert_eq!(color_for("0.250"), Some("31"));
        assert_eq!(color_for("0.500"), None);
        assert_eq!(color_for("5"), None);
        assert_eq!(color_for(&score_bar(0.9)), Some("32"));
        assert_eq!(color_for("unenriched"), Some("33"));
        assert_eq!(color_for("Physics"), None);
    }
}
