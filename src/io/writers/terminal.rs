use super::sections::{sections, Section, Tone};
use crate::io::output::{OutputWriter, Report};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &Report<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", report.title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(report.title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_section(&mut self, section: &Section) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", section.heading.bold())?;

        if !section.headers.is_empty() && !section.rows.is_empty() {
            writeln!(self.writer, "{}", render_table(section))?;
        }
        for note in &section.notes {
            writeln!(self.writer, "  {note}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report<'_>) -> anyhow::Result<()> {
        self.write_header(report)?;
        for section in sections(&report.body) {
            self.write_section(&section)?;
        }
        Ok(())
    }
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Good => Some(Color::Green),
        Tone::Warn => Some(Color::Yellow),
        Tone::Bad => Some(Color::Red),
    }
}

fn render_table(section: &Section) -> Table {
    // Follows the same switch as `colored`, so --output files stay plain
    let colorize = colored::control::SHOULD_COLORIZE.should_colorize();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(section.headers.clone());

    for row in &section.rows {
        table.add_row(row.iter().map(|cell| {
            let rendered = Cell::new(&cell.text);
            match tone_color(cell.tone) {
                Some(color) if colorize => rendered.fg(color),
                _ => rendered,
            }
        }));
    }
    table
}
