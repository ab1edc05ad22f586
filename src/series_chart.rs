use std::path::Path;

use ndarray::Array1;
use plotters::{
    coord::Shift,
    drawing::{DrawingArea, DrawingAreaErrorKind},
    prelude::*,
};

use crate::{
    aoa_error::AoaErrorSeries,
    array_factor::FarFieldPattern,
    error::{BeamError, Result},
};

pub struct SeriesChart {
    label: String,
    x: Array1<f64>,
    y: Array1<f64>,
}

impl SeriesChart {
    pub fn new(label: impl Into<String>, x: Array1<f64>, y: Array1<f64>) -> SeriesChart {
        SeriesChart {
            label: label.into(),
            x,
            y,
        }
    }

    pub fn from_pattern(label: impl Into<String>, pattern: &FarFieldPattern) -> SeriesChart {
        SeriesChart::new(label, pattern.angles_deg().clone(), pattern.gain_db().clone())
    }

    pub fn from_aoa_error(series: &AoaErrorSeries) -> SeriesChart {
        SeriesChart::new(
            format!("Baseline = {}m", series.baseline),
            series.snr_db.clone(),
            series.error_deg.clone(),
        )
    }

    // Points as drawn: anything below the floor, nulls included, sits on the floor.
    fn points(&self, floor: Option<f64>) -> Vec<(f64, f64)> {
        self.x
            .iter()
            .copied()
            .zip(self.y.iter().copied())
            .filter_map(|(x, y)| match floor {
                Some(floor) if !(y >= floor) => Some((x, floor)),
                _ if y.is_finite() => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    /// (min x, max x, min y, max y) over the drawable points.
    pub fn bounds(&self, floor: Option<f64>) -> Option<(f64, f64, f64, f64)> {
        let points = self.points(floor);
        let (min_x, max_x) = extent(points.iter().map(|p| p.0))?;
        let (min_y, max_y) = extent(points.iter().map(|p| p.1))?;
        Some((min_x, max_x, min_y, max_y))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub struct ChartSet {
    pub series: Vec<SeriesChart>,
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
    // Vertical reference line, e.g. the expected beam direction
    pub marker: Option<(String, f64)>,
    pub y_floor: Option<f64>,
    border_x: f64,
    border_y: f64,
}

impl ChartSet {
    pub fn new(
        caption: impl Into<String>,
        x_desc: impl Into<String>,
        y_desc: impl Into<String>,
    ) -> ChartSet {
        ChartSet {
            series: vec![],
            caption: caption.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            marker: None,
            y_floor: None,
            border_x: 0.02,
            border_y: 0.1,
        }
    }

    pub fn with_series(mut self, series: SeriesChart) -> ChartSet {
        self.series.push(series);
        self
    }

    pub fn with_marker(mut self, label: impl Into<String>, x: f64) -> ChartSet {
        self.marker = Some((label.into(), x));
        self
    }

    pub fn with_floor(mut self, y_floor: f64) -> ChartSet {
        self.y_floor = Some(y_floor);
        self
    }

    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (mut bottom_x, mut top_x, mut bottom_y, mut top_y) =
            (f64::MAX, -f64::MAX, f64::MAX, -f64::MAX);
        for bounds in self.series.iter().filter_map(|s| s.bounds(self.y_floor)) {
            bottom_x = bounds.0.min(bottom_x);
            top_x = bounds.1.max(top_x);
            bottom_y = bounds.2.min(bottom_y);
            top_y = bounds.3.max(top_y);
        }
        if bottom_x > top_x {
            // Nothing drawable
            return (0., 1., 0., 1.);
        }

        let dist_x = (top_x - bottom_x).clamp(1e-6, f64::MAX);
        let dist_y = (top_y - bottom_y).clamp(1e-6, f64::MAX);

        (
            bottom_x - dist_x * self.border_x / 2.,
            top_x + dist_x * self.border_x / 2.,
            bottom_y - dist_y * self.border_y / 2.,
            top_y + dist_y * self.border_y / 2.,
        )
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (bottom_x, top_x, bottom_y, top_y) = self.bounds();

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.caption, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(bottom_x..top_x, bottom_y..top_y)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .draw()?;

        for (i, series) in self.series.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            chart
                .draw_series(LineSeries::new(series.points(self.y_floor), &color))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if let Some((label, x)) = &self.marker {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(*x, bottom_y), (*x, top_y)],
                    RED,
                )))?
                .label(label.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    pub fn render_svg_string(&self, size: (u32, u32)) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            self.draw(&root).map_err(|e| BeamError::Plot(e.to_string()))?;
            root.present().map_err(|e| BeamError::Plot(e.to_string()))?;
        }
        Ok(svg)
    }

    pub fn write_svg(&self, path: impl AsRef<Path>, size: (u32, u32)) -> Result<()> {
        let svg = self.render_svg_string(size)?;
        std::fs::write(path, svg)?;
        Ok(())
    }
}
