use anyhow::Result;
use chrono::NaiveDateTime;
use plotters::prelude::*;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 320;

/// Most date labels drawn along the x axis.
const MAX_X_LABELS: usize = 8;

/// Render words-per-minute over time as an SVG line chart.
///
/// Points are plotted in the order given, one x step per session, and the
/// x labels show each session's date.
pub fn wpm_line_chart(points: &[(NaiveDateTime, u32)]) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let max_x = u32::try_from(points.len().saturating_sub(1))?.max(1);
        let max_wpm = points.iter().map(|&(_, wpm)| wpm).max().unwrap_or(0);
        // Headroom so the top point is not drawn on the border
        let y_top = max_wpm.saturating_add(max_wpm / 10).saturating_add(10);

        let mut chart = ChartBuilder::on(&root)
            .caption("words per minute", ("sans-serif", 20).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0u32..max_x, 0u32..y_top)?;

        let date_label = |x: &u32| {
            points
                .get(*x as usize)
                .map(|(date, _)| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .x_desc("date")
            .y_desc("wpm")
            .x_labels(points.len().clamp(1, MAX_X_LABELS))
            .x_label_formatter(&date_label)
            .draw()?;

        chart.draw_series(LineSeries::new(
            points
                .iter()
                .enumerate()
                .map(|(i, &(_, wpm))| (i as u32, wpm)),
            &BLUE,
        ))?;

        chart.draw_series(
            points
                .iter()
                .enumerate()
                .map(|(i, &(_, wpm))| Circle::new((i as u32, wpm), 3, BLUE.filled())),
        )?;

        root.present()?;
    }

    Ok(svg)
}
