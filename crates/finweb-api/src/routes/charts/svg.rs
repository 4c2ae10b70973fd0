//! Dashboard charts rendered to inline SVG with plotters

use finweb_config::ChartConfig;
use finweb_core::ChartData;
use finweb_utils::format_number;
use plotters::coord::ranged1d::SegmentValue;
use plotters::element::Pie;
use plotters::prelude::*;

const FONT: &str = "sans-serif";

/// Fallback for colours that are not `#RRGGBB`
const FALLBACK_COLOR: RGBColor = RGBColor(0xC9, 0xCB, 0xCF);

pub type ChartResult = Result<String, Box<dyn std::error::Error>>;

/// Vertical bar chart, one bar per data point
pub fn render_bar_chart(chart: &ChartData, config: &ChartConfig) -> ChartResult {
    let count = chart.data_points.len() as u32;
    let max = chart.max_value();
    let top = if max > 0.0 { max * 1.15 } else { 1.0 };
    let labels: Vec<&str> = chart.data_points.iter().map(|p| p.label.as_str()).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut plot = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 16).into_font())
            .margin(12)
            .x_label_area_size(28)
            .y_label_area_size(72)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..top)?;

        plot.configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|x: &SegmentValue<u32>| match x {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|l| l.to_string()).unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y: &f64| format_number(format!("{:.0}", y)))
            .label_style((FONT, 12).into_font().color(&RGBColor(55, 65, 81)))
            .axis_style(&RGBColor(156, 163, 175))
            .bold_line_style(&RGBColor(243, 244, 246))
            .draw()?;

        plot.draw_series(chart.data_points.iter().zip(0u32..).map(|(point, i)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), point.value)],
                hex_color(&point.color).filled(),
            );
            bar.set_margin(0, 0, 24, 24);
            bar
        }))?;

        plot.draw_series(chart.data_points.iter().zip(0u32..).map(|(point, i)| {
            Text::new(
                format_number(format!("{:.2}", point.value)),
                (SegmentValue::CenterOf(i), point.value),
                (FONT, 12).into_font(),
            )
        }))?;

        root.present()?;
    }
    Ok(svg)
}

/// Pie chart, each slice labelled with its category and `%.1f%%` share
pub fn render_pie_chart(chart: &ChartData, config: &ChartConfig) -> ChartResult {
    let sizes: Vec<f64> = chart.data_points.iter().map(|p| p.value).collect();
    let colors: Vec<RGBColor> = chart.data_points.iter().map(|p| hex_color(&p.color)).collect();
    let labels: Vec<String> = chart
        .data_points
        .iter()
        .map(|p| format!("{} {}", p.label, p.percentage_label()))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(&chart.title, (FONT, 16).into_font())?;

        if !sizes.is_empty() {
            let (width, height) = area.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.32;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style((FONT, 12).into_font().color(&RGBColor(17, 24, 39)));
            area.draw(&pie)?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// `#RRGGBB` to a plotters colour
fn hex_color(hex: &str) -> RGBColor {
    let digits = hex.trim_start_matches('#');
    let channel = |at: usize| digits.get(at..at + 2).and_then(|c| u8::from_str_radix(c, 16).ok());

    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => RGBColor(r, g, b),
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finweb_core::{ChartDataPoint, ChartType};

    fn point(label: &str, value: f64, percentage: f64, color: &str) -> ChartDataPoint {
        ChartDataPoint {
            label: label.to_string(),
            value,
            percentage,
            color: color.to_string(),
        }
    }

    fn bar_data(income: f64, expense: f64) -> ChartData {
        ChartData {
            chart_type: ChartType::Bar,
            title: "Income vs Expense".to_string(),
            data_points: vec![
                point("Income", income, 0.0, "#4BC0C0"),
                point("Expense", expense, 0.0, "#FF6384"),
            ],
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4BC0C0"), RGBColor(0x4B, 0xC0, 0xC0));
        assert_eq!(hex_color("ff6384"), RGBColor(0xFF, 0x63, 0x84));
        assert_eq!(hex_color("#FFF"), FALLBACK_COLOR);
        assert_eq!(hex_color("#GG0000"), FALLBACK_COLOR);
    }

    #[test]
    fn test_bar_chart_renders_svg_with_labels_and_colors() {
        let svg = render_bar_chart(&bar_data(52000.0, 18000.0), &ChartConfig::default()).unwrap();
        let lower = svg.to_lowercase();

        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Income vs Expense"));
        assert!(svg.contains("Income"));
        assert!(svg.contains("Expense"));
        assert!(svg.contains("52,000.00"));
        assert!(lower.contains("#4bc0c0"));
        assert!(lower.contains("#ff6384"));
    }

    #[test]
    fn test_bar_chart_with_zero_values() {
        let svg = render_bar_chart(&bar_data(0.0, 0.0), &ChartConfig::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_pie_chart_labels_slices_with_one_decimal_percentages() {
        let chart = ChartData {
            chart_type: ChartType::Pie,
            title: "Expense by Category".to_string(),
            data_points: vec![
                point("Rent", 15000.0, 83.333, "#FFCE56"),
                point("Food", 3000.0, 16.666, "#36A2EB"),
            ],
        };
        let svg = render_pie_chart(&chart, &ChartConfig::default()).unwrap();

        assert!(svg.contains("Expense by Category"));
        assert!(svg.contains("Rent 83.3%"));
        assert!(svg.contains("Food 16.7%"));
        assert!(svg.to_lowercase().contains("#ffce56"));
    }

    #[test]
    fn test_single_slice_pie() {
        let chart = ChartData {
            chart_type: ChartType::Pie,
            title: "Expense by Category".to_string(),
            data_points: vec![point("Food", 3000.0, 100.0, "#36A2EB")],
        };
        let svg = render_pie_chart(&chart, &ChartConfig::default()).unwrap();

        assert!(svg.contains("Food 100.0%"));
        assert!(!svg.contains("NaN"));
    }
}
