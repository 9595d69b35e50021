use super::sections::{sections, Section};
use crate::io::output::{OutputWriter, Report};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &Report<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", report.title)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_section(&mut self, section: &Section) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", section.heading)?;
        writeln!(self.writer)?;

        if !section.headers.is_empty() && !section.rows.is_empty() {
            writeln!(self.writer, "| {} |", section.headers.join(" | "))?;
            let rule: Vec<String> = section
                .headers
                .iter()
                .map(|h| "-".repeat(h.len().max(3)))
                .collect();
            writeln!(self.writer, "|{}|", rule.join("|"))?;
            for row in &section.rows {
                let cells: Vec<String> = row.iter().map(|c| escape_cell(&c.text)).collect();
                writeln!(self.writer, "| {} |", cells.join(" | "))?;
            }
            writeln!(self.writer)?;
        }

        for note in &section.notes {
            writeln!(self.writer, "- {note}")?;
        }
        if !section.notes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report<'_>) -> anyhow::Result<()> {
        self.write_header(report)?;
        for section in sections(&report.body) {
            self.write_section(&section)?;
        }
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::ReportBody;
    use crate::roi::{DepartmentRoi, RiskLevel};

    #[test]
    fn test_department_table() {
        let report = Report::new(
            "Department ROI",
            ReportBody::Departments(vec![DepartmentRoi {
                department: "Finance".into(),
                total_investment: 250000.0,
                total_savings: 152800.0,
                roi: -38.88,
                process_count: 1,
                average_payback: 19.63,
                risk_level: RiskLevel::Medium,
            }]),
        );

        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer).write_report(&report).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Department ROI\n"));
        assert!(text.contains("| Department | Processes | Investment |"));
        assert!(text.contains("| Finance | 1 | $250,000 | $152,800 | -38.9% | 19.6 | medium |"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b c");
    }
}
