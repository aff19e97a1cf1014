//! Heart-rate histogram display
//!
//! The chart is either shown as an interactive terminal screen (closed with
//! `q`/`Esc`) or written as plain text for non-interactive use.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Bar, BarChart, Block, Widget},
};
use vitals_stats::histogram::{Histogram, HistogramBin};

const TITLE: &str = "Heart Rate Distribution";
const X_TITLE: &str = "Heart Rate (BPM)";
const Y_TITLE: &str = "Patients";

/// Widest text bar, in characters.
const TEXT_BAR_WIDTH: u64 = 40;

/// Show the histogram full-screen until the user closes it.
pub fn show(histogram: &Histogram) -> anyhow::Result<()> {
    let mut viewer = HistogramViewer::new(histogram);
    ratatui::run(|terminal| viewer.run(terminal))?;
    Ok(())
}

#[derive(Debug)]
struct HistogramViewer<'a> {
    histogram: &'a Histogram,
    should_exit: bool,
}

impl<'a> HistogramViewer<'a> {
    fn new(histogram: &'a Histogram) -> Self {
        Self {
            histogram,
            should_exit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        // Layout: chart + help line at bottom
        let [chart_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        frame.render_widget(HistogramChart::new(self.histogram), chart_area);

        let help_text = Text::from("q/Esc: Close")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let KeyCode::Char('q') | KeyCode::Esc = key_event.code {
            self.should_exit = true;
        }
    }
}

/// Vertical bar chart of histogram bins, one bar per bin.
struct HistogramChart<'a> {
    histogram: &'a Histogram,
}

impl<'a> HistogramChart<'a> {
    fn new(histogram: &'a Histogram) -> Self {
        Self { histogram }
    }
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title(Line::from(TITLE).centered())
            .title(Line::from(Y_TITLE).right_aligned())
            .title_bottom(Line::from(X_TITLE).centered());
        let inner = block.inner(area);

        let num_bins = u16::try_from(self.histogram.bins.len())
            .unwrap_or(u16::MAX)
            .max(1);
        let bar_gap = 1;
        let bar_width = (inner.width / num_bins).saturating_sub(bar_gap).max(1);

        let bars = self
            .histogram
            .bins
            .iter()
            .map(|bin| Bar::with_label(bin_label(bin), bin.count).text_value(bin.count.to_string()))
            .collect::<Vec<_>>();
        let chart = BarChart::new(bars)
            .bar_width(bar_width)
            .bar_gap(bar_gap)
            .bar_style(Style::default().fg(Color::Cyan));

        Widget::render(block, area, buf);
        Widget::render(chart, inner, buf);
    }
}

fn bin_label(bin: &HistogramBin) -> String {
    format!("{:.0}-{:.0}", bin.range.start, bin.range.end)
}

/// Write the histogram as horizontal text bars scaled to the fullest bin.
pub fn write_text<W>(histogram: &Histogram, w: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(w)?;
    writeln!(w, "{TITLE}")?;
    writeln!(w, "{}", "-".repeat(40))?;

    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let len = bin.count * TEXT_BAR_WIDTH / max_count;
        let bar = "#".repeat(usize::try_from(len).unwrap_or(0));
        writeln!(
            w,
            "{:>7.1} - {:>7.1} | {bar} {}",
            bin.range.start, bin.range.end, bin.count
        )?;
    }
    writeln!(w, "({X_TITLE} vs. {Y_TITLE})")?;
    Ok(())
}
