use std::io::{self, IsTerminal, Write};

use chrono::Local;
use lifegrid_shared::{Activity, LIFE_DOMAINS, WeekSelection, build_grid, find_domain};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Config;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    max_title_width: usize,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.color()?;
        let max_title_width = cfg.max_title_width()?.max(4);

        Ok(Self {
            color,
            max_title_width,
        })
    }

    #[tracing::instrument(skip(self, activities), fields(week = %selection.key()))]
    pub fn print_grid(
        &mut self,
        selection: &WeekSelection,
        activities: &[Activity],
    ) -> anyhow::Result<()> {
        let out = io::stdout().lock();
        self.write_grid(out, selection, activities)
    }

    pub fn write_grid<W: Write>(
        &self,
        mut writer: W,
        selection: &WeekSelection,
        activities: &[Activity],
    ) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.paint(&selection.label(), "1"))?;
        writeln!(writer)?;

        let columns = build_grid(LIFE_DOMAINS, activities, selection.key());
        let headers: Vec<String> = columns
            .iter()
            .map(|column| format!("{} {}", column.domain.icon.glyph(), column.domain.name))
            .collect();

        let depth = columns
            .iter()
            .map(|column| column.activities.len())
            .max()
            .unwrap_or(0);

        let mut rows = Vec::with_capacity(depth);
        for idx in 0..depth {
            let row: Vec<String> = columns
                .iter()
                .map(|column| {
                    column
                        .activities
                        .get(idx)
                        .map(|activity| self.card(activity))
                        .unwrap_or_default()
                })
                .collect();
            rows.push(row);
        }

        write_table(&mut writer, headers, rows)?;

        if depth == 0 {
            writeln!(writer, "no activities this week")?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn print_domains(&mut self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let headers = vec!["ID".to_string(), "Icon".to_string(), "Name".to_string()];
        let rows = LIFE_DOMAINS
            .iter()
            .map(|domain| {
                vec![
                    self.paint(domain.id, "33"),
                    domain.icon.glyph().to_string(),
                    domain.name.to_string(),
                ]
            })
            .collect();
        write_table(&mut out, headers, rows)
    }

    #[tracing::instrument(skip(self, activity), fields(id = %activity.id))]
    pub fn print_activity(&mut self, activity: &Activity) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let domain = find_domain(&activity.domain_id)
            .map(|domain| domain.name.to_string())
            .unwrap_or_else(|| activity.domain_id.clone());

        writeln!(out, "id        {}", activity.id)?;
        writeln!(out, "title     {}", activity.title)?;
        if !activity.description.trim().is_empty() {
            writeln!(out, "desc      {}", activity.description)?;
        }
        writeln!(out, "domain    {domain}")?;
        writeln!(out, "week      {}", activity.week())?;
        writeln!(out, "done      {}", if activity.completed { "yes" } else { "no" })?;
        writeln!(
            out,
            "created   {}",
            activity.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        )?;
        if let Some(modified) = activity.modified_at {
            writeln!(
                out,
                "modified  {}",
                modified.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }

    fn card(&self, activity: &Activity) -> String {
        let id = activity.id.to_string();
        let short_id = &id[..SHORT_ID_LEN];
        let mark = if activity.completed { "[x]" } else { "[ ]" };
        let title = truncate_to_width(&activity.title, self.max_title_width);
        let title = if activity.completed {
            self.paint(&title, "2")
        } else {
            title
        };
        format!("{mark} {} {title}", self.paint(short_id, "33"))
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width + 1 > max {
            break;
        }
        out.push(ch);
        used += width;
    }
    out.push('…');
    out
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        let visible_width = UnicodeWidthStr::width(headers[idx].as_str());
        let padding = widths[idx].saturating_sub(visible_width);
        write!(writer, "{}{} ", headers[idx], " ".repeat(padding))?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = row.get(idx).map(String::as_str).unwrap_or_default();
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
