use std::path::Path;

use anyhow::{ensure, Result};
use cache_topology::CacheLevel;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::samples::SchemeSeries;

const CHART_SIZE: (u32, u32) = (1100, 800);

/// Renders the latency-vs-size chart to an SVG file at `out_path`.
///
/// One line per scheme over a log-scaled size axis, with a dashed red
/// vertical marker at every cache level whose size is positive.
pub fn render(
    series: &[SchemeSeries],
    title: &str,
    caches: &[CacheLevel],
    out_path: &Path,
    ymax: Option<f64>,
) -> Result<()> {
    ensure!(!series.is_empty(), "no series to plot");

    let (x_min, x_max, y_peak) = extents(series);
    let y_max = ymax.unwrap_or(y_peak * 1.1);

    let root = SVGBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(
            (x_min..x_max)
                .log_scale()
                .with_key_points(power_of_two_key_points(x_min, x_max)),
            0.0..y_max,
        )?;

    chart
        .configure_mesh()
        .x_desc("Input size (bytes)")
        .y_desc("Inverse throughput (ns)")
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    for (index, scheme_series) in series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(
                scheme_series
                    .points
                    .iter()
                    .map(|&(size, latency)| (size as f64, latency)),
                color.stroke_width(2),
            ))?
            .label(&scheme_series.scheme)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    for cache in caches {
        if cache.bytes == 0 {
            continue;
        }
        let boundary = cache.bytes as f64;
        chart.draw_series(DashedLineSeries::new(
            [(boundary, 0.0), (boundary, y_max)],
            4,
            4,
            RED.stroke_width(1),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{} ", cache.label),
            (boundary, y_max * 0.02),
            ("sans-serif", 16)
                .into_font()
                .color(&RED)
                .pos(Pos::new(HPos::Right, VPos::Bottom)),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.5))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn extents(series: &[SchemeSeries]) -> (f64, f64, f64) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_peak = 0.0f64;
    for scheme_series in series {
        for &(size, latency) in &scheme_series.points {
            let size = size as f64;
            x_min = x_min.min(size);
            x_max = x_max.max(size);
            y_peak = y_peak.max(latency);
        }
    }
    // A log axis cannot start at zero.
    (x_min.max(1.0), x_max, y_peak)
}

/// Axis ticks at every power of two covered by the data range.
fn power_of_two_key_points(x_min: f64, x_max: f64) -> Vec<f64> {
    let mut points = Vec::new();
    let mut value: u64 = 1;
    while (value as f64) < x_min && value < u64::MAX / 2 {
        value <<= 1;
    }
    while (value as f64) <= x_max {
        points.push(value as f64);
        if value > u64::MAX / 2 {
            break;
        }
        value <<= 1;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SchemeSeries;
    use std::fs;

    fn series(scheme: &str, points: Vec<(u64, f64)>) -> SchemeSeries {
        SchemeSeries {
            scheme: scheme.to_string(),
            points,
        }
    }

    fn caches() -> Vec<CacheLevel> {
        vec![
            CacheLevel {
                bytes: 32 * 1024,
                label: "L1",
            },
            CacheLevel {
                bytes: 512 * 1024,
                label: "L2",
            },
            CacheLevel {
                bytes: 16384 * 1024,
                label: "L3",
            },
        ]
    }

    #[test]
    fn power_of_two_ticks_span_the_range() {
        assert_eq!(
            power_of_two_key_points(64.0, 1024.0),
            vec![64.0, 128.0, 256.0, 512.0, 1024.0]
        );
        assert_eq!(power_of_two_key_points(100.0, 300.0), vec![128.0, 256.0]);
    }

    #[test]
    fn renders_an_svg_across_cache_boundaries() {
        let out_dir = std::env::temp_dir().join(format!("latency_plot_{}", std::process::id()));
        fs::create_dir_all(&out_dir).unwrap();
        let out_path = out_dir.join("plot.svg");

        let data = vec![
            series(
                "binary_search",
                vec![(1024, 10.0), (65536, 25.0), (64 * 1024 * 1024, 80.0)],
            ),
            series(
                "eytzinger",
                vec![(1024, 8.0), (65536, 14.0), (64 * 1024 * 1024, 60.0)],
            ),
        ];

        render(&data, "test chart", &caches(), &out_path, None).unwrap();

        let svg = fs::read_to_string(&out_path).unwrap();
        assert!(svg.contains("<svg"));

        fs::remove_dir_all(&out_dir).ok();
    }

    #[test]
    fn zero_sized_cache_levels_are_not_drawn() {
        let out_dir =
            std::env::temp_dir().join(format!("latency_plot_zero_{}", std::process::id()));
        fs::create_dir_all(&out_dir).unwrap();
        let out_path = out_dir.join("plot.svg");

        let phantom = vec![CacheLevel {
            bytes: 0,
            label: "L4",
        }];
        let data = vec![series("binary_search", vec![(1024, 10.0), (4096, 12.0)])];

        render(&data, "test chart", &phantom, &out_path, Some(50.0)).unwrap();

        let svg = fs::read_to_string(&out_path).unwrap();
        assert!(!svg.contains("L4"));

        fs::remove_dir_all(&out_dir).ok();
    }

    #[test]
    fn empty_series_is_an_error() {
        let out_path = std::env::temp_dir().join("latency_plot_unwritten.svg");
        assert!(render(&[], "test chart", &caches(), &out_path, None).is_err());
    }
}
