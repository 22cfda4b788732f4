// src/output/chart.rs

use anyhow::{anyhow, ensure, Context, Result};
use chrono::{Local, NaiveDate};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::process::Record;

/// 6.4in x 4.8in at 600 dpi.
pub const CHART_SIZE: (u32, u32) = (3840, 2880);

const TITLE: &str = "Number of cases in staff and student populations";
/// Space between a bar and the segment edge, in points.
const BAR_GAP: f64 = 4.0;
const STAFF_COLOUR: RGBColor = RGBColor(31, 119, 180);
const STUDENT_COLOUR: RGBColor = RGBColor(255, 127, 14);

/// `<YYYY-MM-DD>-staff-student-covid-cases.png`
pub fn chart_file_name(today: NaiveDate) -> String {
    format!("{}-staff-student-covid-cases.png", today.format("%Y-%m-%d"))
}

/// Render the grouped staff/student bar chart into `dir`, named for today.
///
/// Returns the written path, or `None` when there is nothing to plot.
pub fn write_chart(dir: &Path, data: &[Record]) -> Result<Option<PathBuf>> {
    if data.is_empty() {
        warn!("no records; chart not written");
        return Ok(None);
    }
    let path = dir.join(chart_file_name(Local::now().date_naive()));
    render_bar_chart(&path, data, CHART_SIZE)?;
    info!(path = %path.display(), "wrote chart");
    Ok(Some(path))
}

/// Two bars per date (staff left, students right), value printed above each.
#[instrument(level = "debug", skip(data), fields(records = data.len()))]
pub fn render_bar_chart(path: &Path, data: &[Record], size: (u32, u32)) -> Result<()> {
    ensure!(!data.is_empty(), "no records to plot");

    // font sizes are given in points of a 100 dpi figure
    let scale = f64::from(size.1) / 480.0;
    let pt = |p: f64| p * scale;

    let dates: Vec<String> = data.iter().map(Record::iso_date).collect();
    let staff: Vec<i64> = data.iter().map(|r| r.staff_cases().unwrap_or(0)).collect();
    let students: Vec<i64> = data.iter().map(|r| r.student_cases().unwrap_or(0)).collect();

    let (y_min, y_max) = value_range(staff.iter().chain(&students).copied());
    let n = i32::try_from(data.len()).context("too many records to plot")?;
    // a one-value integer axis maps everything to its midpoint, so pad to two
    let segments = n.max(2);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    // one segment per date, index i holds dates[i]; any padding stays blank
    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", pt(12.0)))
        .margin(pt(6.0))
        .x_label_area_size(pt(90.0))
        .y_label_area_size(pt(40.0))
        .build_cartesian_2d((0..segments - 1).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    let x_label = |v: &SegmentValue<i32>| label_date(&dates, v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(segments as usize)
        .x_desc("Date")
        .y_desc("Cases")
        .x_label_formatter(&x_label)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_label_style(
            ("sans-serif", pt(10.0))
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .label_style(("sans-serif", pt(10.0)))
        .axis_desc_style(("sans-serif", pt(10.0)))
        .draw()
        .map_err(draw_err)?;

    let gap = pt(BAR_GAP) as u32;
    let legend_half = pt(5.0) as i32;
    let value_style = TextStyle::from(("sans-serif", pt(6.0)).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let lift = pt(3.0) as i32;

    for (label, values, half, colour) in [
        ("Staff", &staff, Half::Left, STAFF_COLOUR),
        ("Students", &students, Half::Right, STUDENT_COLOUR),
    ] {
        chart
            .draw_series(values.iter().enumerate().map(|(i, &v)| {
                let (x0, x1) = half.bounds(i as i32, segments);
                let mut bar = Rectangle::new([(x0, 0.0), (x1, v as f64)], colour.filled());
                match half {
                    Half::Left => bar.set_margin(0, 0, gap, 0),
                    Half::Right => bar.set_margin(0, 0, 0, gap),
                };
                bar
            }))
            .map_err(draw_err)?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - legend_half), (x + 2 * legend_half, y + legend_half)],
                    colour.filled(),
                )
            });

        // value labels, 3pt above the bar top, in pixel space
        for (i, &v) in values.iter().enumerate() {
            let (x0, x1) = half.bounds(i as i32, segments);
            let top = v.max(0) as f64;
            let (left, y) = chart.backend_coord(&(x0, top));
            let (right, _) = chart.backend_coord(&(x1, top));
            root.draw(&Text::new(
                v.to_string(),
                ((left + right) / 2, y - lift),
                value_style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", pt(10.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Which half of a date's segment a bar occupies.
#[derive(Clone, Copy)]
enum Half {
    Left,
    Right,
}

impl Half {
    fn bounds(self, i: i32, segments: i32) -> (SegmentValue<i32>, SegmentValue<i32>) {
        match self {
            Half::Left => (SegmentValue::Exact(i), SegmentValue::CenterOf(i)),
            Half::Right if i + 1 < segments => (SegmentValue::CenterOf(i), SegmentValue::Exact(i + 1)),
            Half::Right => (SegmentValue::CenterOf(i), SegmentValue::Last),
        }
    }
}

/// Axis label for segment `value`: the date it holds, blank past the end.
fn label_date(dates: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| dates.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// y-axis bounds: always include zero, with headroom for the value labels.
fn value_range(values: impl Iterator<Item = i64>) -> (f64, f64) {
    let (lo, hi) = values.fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = ((hi - lo) as f64).max(1.0);
    let lo = if lo < 0 { lo as f64 - span * 0.1 } else { 0.0 };
    (lo, hi as f64 + span * 0.1)
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("drawing chart: {}", e)
}
