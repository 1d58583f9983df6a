use crate::analyzers::ChartEntry;
use crate::graphs::ChartRenderer;
use anyhow::Result;
use textplots::{Chart, Plot, Shape};

/// Prints the chart to stdout: a labelled bar list, then a textplots overview
pub struct TerminalChart {
    pub bar_width: usize,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self {
            bar_width: 50,
            plot_width: 120,
            plot_height: 40,
        }
    }
}

impl ChartRenderer for TerminalChart {
    fn render_bar_chart(&self, entries: &[ChartEntry]) -> Result<()> {
        print!("{}", render_text_bars(entries, self.bar_width));

        if entries.len() > 1 {
            let points: Vec<(f32, f32)> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| (i as f32, entry.count as f32))
                .collect();
            // textplots rejects canvases narrower than 32 columns
            Chart::new(
                self.plot_width.max(32),
                self.plot_height.max(3),
                0.0,
                entries.len() as f32,
            )
            .lineplot(&Shape::Bars(&points))
            .display();
        }
        Ok(())
    }
}

/// One line per entry: label, a bar scaled to the largest count, and the count
pub fn render_text_bars(entries: &[ChartEntry], bar_width: usize) -> String {
    if entries.is_empty() {
        return "No data\n".to_string();
    }

    let max_count = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let label_width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);

    let mut output = String::new();
    for entry in entries {
        let length = if max_count == 0 {
            0
        } else {
            ((entry.count as f64 / max_count as f64) * bar_width as f64).round() as usize
        };
        output.push_str(&format!(
            "{:>width$} | {} {}\n",
            entry.label,
            "█".repeat(length),
            entry.count,
            width = label_width
        ));
    }
    output
}
