use tracing::warn;

use crate::charts::figure::{Figure, Layout, Trace};
use crate::charts::returns::{cumulative_returns, pct_changes};
use crate::models::DateRange;
use crate::services::TickerDataset;

/// Minimum price points a ticker needs before return charts include it
const MIN_POINTS_FOR_RETURNS: usize = 2;

/// Build the group's charts in their fixed dashboard order.
///
/// Trace ordering inside every chart follows dataset ordering, which follows
/// the group's declared ticker ordering. A chart with nothing to draw is
/// omitted and logged, never rendered empty.
pub fn render_group(group_name: &str, range: DateRange, datasets: &[TickerDataset]) -> Vec<Figure> {
    let mut figures = Vec::new();

    let builders: [(&str, Option<Figure>); 4] = [
        ("price line", price_line_chart(group_name, datasets)),
        ("return distribution", returns_box_chart(datasets)),
        ("revenue", revenue_bar_chart(datasets)),
        ("cumulative return", cumulative_return_chart(range, datasets)),
    ];

    for (label, figure) in builders {
        match figure {
            Some(figure) => figures.push(figure),
            None => warn!(chart = label, group = group_name, "Chart omitted, no drawable data"),
        }
    }

    figures
}

/// Close price vs. date, one trace per ticker
fn price_line_chart(group_name: &str, datasets: &[TickerDataset]) -> Option<Figure> {
    let traces: Vec<Trace> = datasets
        .iter()
        .filter(|d| !d.series.is_empty())
        .map(|d| Trace::line(d.symbol(), d.series.dates(), d.series.closes()))
        .collect();

    if traces.is_empty() {
        return None;
    }

    Some(Figure::new(
        traces,
        Layout::new(format!("📈 Price Trend Over Time ({})", group_name)).y_title("Close price"),
    ))
}

/// Distribution of daily percentage returns, one box per ticker
fn returns_box_chart(datasets: &[TickerDataset]) -> Option<Figure> {
    let traces: Vec<Trace> = datasets
        .iter()
        .filter(|d| d.series.len() >= MIN_POINTS_FOR_RETURNS)
        .map(|d| {
            let returns: Vec<f64> = pct_changes(&d.series.closes())
                .into_iter()
                .map(|r| r * 100.0)
                .collect();
            Trace::box_plot(d.symbol(), returns)
        })
        .collect();

    if traces.is_empty() {
        return None;
    }

    Some(Figure::new(
        traces,
        Layout::new("📦 Daily Return Distribution").y_title("Daily return (%)"),
    ))
}

/// Reported revenue, one bar per fiscal period per ticker, grouped by period
fn revenue_bar_chart(datasets: &[TickerDataset]) -> Option<Figure> {
    let traces: Vec<Trace> = datasets
        .iter()
        .filter_map(|d| {
            let revenue = d.financials.revenue()?;
            let periods: Vec<String> = revenue.iter().map(|p| p.year_label()).collect();
            let values: Vec<f64> = revenue.iter().map(|p| p.value).collect();
            Some(Trace::bar(d.symbol(), periods, values))
        })
        .collect();

    if traces.is_empty() {
        return None;
    }

    Some(Figure::new(
        traces,
        Layout::new("💰 Reported Revenue")
            .x_title("Fiscal year")
            .y_title("Revenue")
            .grouped_bars(),
    ))
}

/// Cumulative return curve per ticker over the fetched range
fn cumulative_return_chart(range: DateRange, datasets: &[TickerDataset]) -> Option<Figure> {
    let traces: Vec<Trace> = datasets
        .iter()
        .filter(|d| d.series.len() >= MIN_POINTS_FOR_RETURNS)
        .map(|d| {
            let curve: Vec<f64> = cumulative_returns(&d.series.closes())
                .into_iter()
                .map(|r| r * 100.0)
                .collect();
            Trace::line(d.symbol(), d.series.dates(), curve)
        })
        .collect();

    if traces.is_empty() {
        return None;
    }

    Some(Figure::new(
        traces,
        Layout::new(format!("📉 Cumulative Return ({})", range)).y_title("Cumulative return (%)"),
    ))
}
