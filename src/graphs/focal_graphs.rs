use crate::analyzers::ChartEntry;
use crate::graphs::{ChartRenderer, GraphConfig};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::PathBuf;

/// Image file formats plotters can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

/// How bars are placed along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLayout {
    /// One evenly spaced bar per entry, labelled with its bucket label
    Categorical,
    /// Bars placed at their focal length; "no data" moves into the caption
    Numeric { bucket_width: i64 },
}

pub struct FocalLengthGraph {
    pub config: GraphConfig,
    pub output_path: PathBuf,
    pub format: ImageFormat,
    pub layout: AxisLayout,
}

impl FocalLengthGraph {
    pub fn new(config: GraphConfig, output_path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            config,
            output_path: output_path.into(),
            format,
            layout: AxisLayout::Categorical,
        }
    }

    pub fn with_layout(mut self, layout: AxisLayout) -> Self {
        self.layout = layout;
        self
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>, entries: &[ChartEntry]) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        match self.layout {
            AxisLayout::Categorical => self.draw_categorical(&root, entries)?,
            AxisLayout::Numeric { bucket_width } => {
                self.draw_numeric(&root, entries, bucket_width.max(1))?
            }
        }
        root.present()?;
        Ok(())
    }

    fn draw_categorical<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        entries: &[ChartEntry],
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let y_max = y_axis_max(entries.iter().map(|e| e.count));

        let mut chart = ChartBuilder::on(root)
            .caption(&self.config.title, ("sans-serif", 40).into_font())
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..entries.len()).into_segmented(), 0u64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&self.config.x_label)
            .y_desc(&self.config.y_label)
            .x_labels(entries.len().max(1))
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => entries
                    .get(*i)
                    .map(|entry| entry.label.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(4)
                .data(entries.iter().enumerate().map(|(i, entry)| (i, entry.count))),
        )?;

        chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
            EmptyElement::at((SegmentValue::CenterOf(i), entry.count))
                + Text::new(
                    entry.count.to_string(),
                    (-4, -18),
                    ("sans-serif", 14).into_font(),
                )
        }))?;

        Ok(())
    }

    fn draw_numeric<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        entries: &[ChartEntry],
        bucket_width: i64,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let NumericAxis {
            bars,
            no_data,
            x_range,
        } = NumericAxis::from_entries(entries, bucket_width);
        let y_max = y_axis_max(bars.iter().map(|(_, count)| *count));
        let caption = numeric_caption(&self.config.title, no_data);

        let mut chart = ChartBuilder::on(root)
            .caption(&caption, ("sans-serif", 40).into_font())
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, 0u64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&self.config.x_label)
            .y_desc(&self.config.y_label)
            .draw()?;

        chart.draw_series(bars.iter().map(|(focal, count)| {
            let mut bar = Rectangle::new([(*focal, 0), (*focal + bucket_width, *count)], BLUE.filled());
            bar.set_margin(0, 0, 2, 2);
            bar
        }))?;

        chart.draw_series(bars.iter().map(|(focal, count)| {
            EmptyElement::at((*focal, *count))
                + Text::new(count.to_string(), (4, -18), ("sans-serif", 14).into_font())
        }))?;

        Ok(())
    }
}

impl ChartRenderer for FocalLengthGraph {
    fn render_bar_chart(&self, entries: &[ChartEntry]) -> Result<()> {
        let size = (self.config.width, self.config.height);
        match self.format {
            ImageFormat::Png => {
                self.draw(BitMapBackend::new(&self.output_path, size).into_drawing_area(), entries)
            }
            ImageFormat::Svg => {
                self.draw(SVGBackend::new(&self.output_path, size).into_drawing_area(), entries)
            }
        }
    }
}

/// Bars and x range of the numeric layout; "no data" is counted separately
#[derive(Debug, PartialEq)]
struct NumericAxis {
    bars: Vec<(i64, u64)>,
    no_data: u64,
    x_range: std::ops::Range<i64>,
}

impl NumericAxis {
    fn from_entries(entries: &[ChartEntry], bucket_width: i64) -> Self {
        let bars: Vec<(i64, u64)> = entries
            .iter()
            .filter_map(|entry| entry.key.focal_length().map(|focal| (focal, entry.count)))
            .collect();
        let no_data = entries
            .iter()
            .filter(|entry| entry.key.focal_length().is_none())
            .map(|entry| entry.count)
            .sum();

        let x_min = bars.first().map_or(0, |(focal, _)| *focal);
        let x_max = bars
            .last()
            .map_or(bucket_width, |(focal, _)| focal.saturating_add(bucket_width));
        Self {
            bars,
            no_data,
            x_range: x_min..x_max,
        }
    }
}

fn numeric_caption(title: &str, no_data: u64) -> String {
    if no_data > 0 {
        format!("{title} (no data: {no_data})")
    } else {
        title.to_string()
    }
}

/// Top of the y axis, leaving room for the count labels above the tallest bar
fn y_axis_max(counts: impl Iterator<Item = u64>) -> u64 {
    let max = counts.max().unwrap_or(0);
    max + (max / 10).max(1)
}
