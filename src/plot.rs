//! Area chart of word count per character per season.
//!
//! Series are built as plain data, then turned into a `plotly` figure. The
//! page written to disk carries plotly.js inline, so it opens offline.

use std::path::Path;

use plotly::common::{Fill, Font, Title, Visible};
use plotly::layout::{Axis, AxisType, Legend};
use plotly::{Layout, Plot, Scatter};

use crate::error::{Error, Result};
use crate::persist::write_atomic;
use crate::record::SpeakerSeasonCount;

/// Whether a series is drawn when the page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Listed in the legend, drawn once clicked.
    LegendOnly,
}

impl From<Visibility> for Visible {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => Visible::True,
            Visibility::LegendOnly => Visible::LegendOnly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<u64>,
    pub visible: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub data: Vec<Series>,
}

fn arial(size: usize, color: &'static str) -> Font {
    Font::new().family("Arial").size(size).color(color)
}

fn axis(title: &str, kind: AxisType, tick_size: usize) -> Axis {
    Axis::new()
        .title(Title::with_text(title).font(arial(18, "#7f7f7f")))
        .type_(kind)
        .fixed_range(true)
        .tick_font(arial(tick_size, "black"))
}

fn layout() -> Layout {
    Layout::new()
        .auto_size(true)
        // seasons are labels, not numbers
        .x_axis(axis("Season", AxisType::Category, 18))
        .y_axis(axis("Word Count", AxisType::Linear, 16))
        .legend(Legend::new().font(arial(16, "black")))
}

impl Chart {
    /// The plotly figure: one filled scatter trace per series, in order.
    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        for series in &self.data {
            let trace = Scatter::new(series.x.clone(), series.y.clone())
                .name(series.name.as_str())
                .fill(Fill::ToZeroY)
                .visible(series.visible.into());
            plot.add_trace(trace);
        }
        plot.set_layout(layout());
        plot
    }

    /// Figure JSON (`data` and `layout`) as plotly.js reads it.
    pub fn figure_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_plot())?)
    }
}

/// Somewhere a finished chart can be uploaded. Returns the chart's URL.
pub trait Publisher {
    fn publish(&self, chart: &Chart) -> Result<String>;
}

/// One series per name in `characters`, in that order. The first
/// `visible_count` are visible; the rest start hidden. A name with no rows
/// gets an empty series.
pub fn build_series(
    rows: &[SpeakerSeasonCount],
    characters: &[String],
    visible_count: usize,
) -> Vec<Series> {
    characters
        .iter()
        .enumerate()
        .map(|(rank, name)| {
            let (x, y) = rows
                .iter()
                .filter(|row| &row.speaker == name)
                .map(|row| (row.season.clone(), row.word_count))
                .unzip();
            Series {
                name: name.clone(),
                x,
                y,
                visible: if rank < visible_count {
                    Visibility::Visible
                } else {
                    Visibility::LegendOnly
                },
            }
        })
        .collect()
}

pub fn build_chart(rows: &[SpeakerSeasonCount], characters: &[String], visible_count: usize) -> Chart {
    Chart {
        data: build_series(rows, characters, visible_count),
    }
}

/// A standalone page that draws `chart`, with plotly.js inlined.
pub fn render_html(chart: &Chart) -> String {
    chart.to_plot().to_html()
}

pub fn write_chart(path: &Path, chart: &Chart) -> Result<()> {
    let html = render_html(chart);
    write_atomic(path, |out| {
        out.write_all(html.as_bytes())
            .map_err(|e| Error::io(path, e))
    })
}
