// Chart panel recompute logic over the bundled sample datasets
use crate::domain::dataset::Dataset;
use crate::domain::figure::{FigureSpec, Trace};
use crate::infrastructure::sample_data::SampleData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const STOCK_DATE_FORMAT: &str = "%Y-%m-%d";

/// A clicked point on the iris scatter, as reported by the front end.
#[derive(Debug, Clone, Deserialize)]
pub struct PointClick {
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// The one selectable metric of the tips panel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipsMetric {
    TotalBill,
    Tip,
}

impl TipsMetric {
    fn column(self) -> &'static str {
        match self {
            TipsMetric::TotalBill => "total_bill",
            TipsMetric::Tip => "tip",
        }
    }

    /// Lowercase name used in the summary line.
    fn display(self) -> &'static str {
        match self {
            TipsMetric::TotalBill => "total bill",
            TipsMetric::Tip => "tip",
        }
    }

    /// Title-case name used in the figure title.
    fn title(self) -> &'static str {
        match self {
            TipsMetric::TotalBill => "Total Bill",
            TipsMetric::Tip => "Tip",
        }
    }
}

/// Inclusive date range selected on the stocks panel.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One panel as mounted by the dashboard shell: identity, default figure and
/// summary, and the control the front end wires to the update endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PanelView {
    pub id: &'static str,
    pub label: &'static str,
    pub heading: &'static str,
    pub prompt: &'static str,
    pub figure: FigureSpec,
    pub summary: String,
    pub controls: PanelControls,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelControls {
    Click,
    MetricSelect {
        options: Vec<MetricOption>,
        selected: &'static str,
    },
    DatePicker {
        min: NaiveDate,
        max: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Figure plus summary recomputed for one interaction event.
#[derive(Debug, Clone, Serialize)]
pub struct PanelUpdate {
    pub figure: FigureSpec,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardLayout {
    pub panels: Vec<PanelView>,
}

/// Builds the three panel views and recomputes them on interaction events.
/// Every output is a pure function of the event inputs and the bundled
/// sample data; the uploaded dataset is never consulted.
#[derive(Clone)]
pub struct PanelService {
    samples: Arc<SampleData>,
}

impl PanelService {
    pub fn new(samples: Arc<SampleData>) -> Self {
        Self { samples }
    }

    pub fn dashboard(&self) -> DashboardLayout {
        DashboardLayout {
            panels: vec![self.iris_panel(), self.tips_panel(), self.stocks_panel()],
        }
    }

    // --- iris scatter ---

    pub fn iris_panel(&self) -> PanelView {
        PanelView {
            id: "iris",
            label: "Iris Analysis",
            heading: "Iris Dataset Explorer",
            prompt: "Click on points to see details",
            figure: self.iris_figure(),
            summary: "Click on a point to see details".to_string(),
            controls: PanelControls::Click,
        }
    }

    /// Summary for a clicked point. The figure itself never changes.
    pub fn describe_iris_click(&self, click: &PointClick) -> String {
        format!(
            "Selected Iris: Species={}, Sepal Width={:.2}, Sepal Length={:.2}",
            click.label.as_deref().unwrap_or("N/A"),
            click.x,
            click.y
        )
    }

    fn iris_figure(&self) -> FigureSpec {
        let iris = &self.samples.iris;
        let species = text_or_empty(iris, "species");
        let widths = numeric_or_empty(iris, "sepal_width");
        let lengths = numeric_or_empty(iris, "sepal_length");

        let traces = distinct(species)
            .into_iter()
            .map(|name| {
                let mut x = Vec::new();
                let mut y = Vec::new();
                for (i, value) in species.iter().enumerate() {
                    if value == name {
                        x.push(widths[i]);
                        y.push(lengths[i]);
                    }
                }
                Trace::scatter(name, x, y)
            })
            .collect();

        FigureSpec::new("Iris Dataset Analysis", "sepal_width", "sepal_length", traces)
    }

    // --- tips box plot ---

    pub fn tips_panel(&self) -> PanelView {
        // The idle figure keeps the generic title; the summary already
        // reflects the default metric selection.
        let mut figure = self.tips_figure(TipsMetric::TotalBill);
        figure.title = "Restaurant Tips Analysis".to_string();

        PanelView {
            id: "tips",
            label: "Tips Analysis",
            heading: "Restaurant Tips Analysis",
            prompt: "Explore tips data by day and smoking status",
            figure,
            summary: self.tips_summary(TipsMetric::TotalBill),
            controls: PanelControls::MetricSelect {
                options: vec![
                    MetricOption {
                        value: "total_bill",
                        label: "Total Bill",
                    },
                    MetricOption {
                        value: "tip",
                        label: "Tip Amount",
                    },
                ],
                selected: "total_bill",
            },
        }
    }

    pub fn update_tips(&self, metric: TipsMetric) -> PanelUpdate {
        PanelUpdate {
            figure: self.tips_figure(metric),
            summary: self.tips_summary(metric),
        }
    }

    fn tips_figure(&self, metric: TipsMetric) -> FigureSpec {
        let tips = &self.samples.tips;
        let smokers = text_or_empty(tips, "smoker");
        let days = text_or_empty(tips, "day");
        let values = numeric_or_empty(tips, metric.column());

        let traces = distinct(smokers)
            .into_iter()
            .map(|name| {
                let mut x = Vec::new();
                let mut y = Vec::new();
                for (i, value) in smokers.iter().enumerate() {
                    if value == name {
                        x.push(days[i].clone());
                        y.push(values[i]);
                    }
                }
                Trace::boxes(name, x, y)
            })
            .collect();

        FigureSpec::new(
            format!("Restaurant {} Analysis", metric.title()),
            "day",
            metric.column(),
            traces,
        )
    }

    /// Mean of the selected metric over the whole sample dataset, formatted
    /// as currency.
    fn tips_summary(&self, metric: TipsMetric) -> String {
        let mean = self.samples.tips.mean(metric.column()).unwrap_or(0.0);
        format!("Average {}: ${:.2}", metric.display(), mean)
    }

    // --- stocks line ---

    pub fn stocks_panel(&self) -> PanelView {
        let (min, max) = self
            .stock_date_bounds()
            .unwrap_or((NaiveDate::default(), NaiveDate::default()));
        let update = self.update_stocks(&DateRange {
            start: min,
            end: max,
        });

        PanelView {
            id: "stocks",
            label: "Stock Analysis",
            heading: "Stock Price Tracker",
            prompt: "Select date range to analyze",
            figure: update.figure,
            summary: update.summary,
            controls: PanelControls::DatePicker {
                min,
                max,
                start: min,
                end: max,
            },
        }
    }

    /// Recompute the line figure and the price delta over the inclusive
    /// range. An empty selection reports no data instead of indexing into
    /// nothing.
    pub fn update_stocks(&self, range: &DateRange) -> PanelUpdate {
        let filtered: Vec<(String, f64)> = self
            .stock_rows()
            .into_iter()
            .filter(|(date, _, _)| *date >= range.start && *date <= range.end)
            .map(|(_, raw, value)| (raw, value))
            .collect();

        let summary = match (filtered.first(), filtered.last()) {
            (Some((_, first)), Some((_, last))) => {
                format!("Price Change: ${:.2}", last - first)
            }
            _ => "No data in selected range".to_string(),
        };

        let (x, y) = filtered.into_iter().unzip();
        PanelUpdate {
            figure: FigureSpec::new(
                "Google Stock Prices",
                "date",
                "GOOG",
                vec![Trace::line("GOOG", x, y)],
            ),
            summary,
        }
    }

    /// Rows of the stocks dataset with their parsed date, in file order.
    /// Rows whose date does not parse are skipped.
    fn stock_rows(&self) -> Vec<(NaiveDate, String, f64)> {
        let stocks = &self.samples.stocks;
        let dates = text_or_empty(stocks, "date");
        let values = numeric_or_empty(stocks, "GOOG");

        dates
            .iter()
            .zip(values)
            .filter_map(|(raw, value)| {
                NaiveDate::parse_from_str(raw, STOCK_DATE_FORMAT)
                    .ok()
                    .map(|date| (date, raw.clone(), *value))
            })
            .collect()
    }

    fn stock_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let rows = self.stock_rows();
        let min = rows.iter().map(|(date, _, _)| *date).min()?;
        let max = rows.iter().map(|(date, _, _)| *date).max()?;
        Some((min, max))
    }
}

fn text_or_empty<'a>(dataset: &'a Dataset, name: &str) -> &'a [String] {
    dataset.text(name).unwrap_or(&[])
}

fn numeric_or_empty<'a>(dataset: &'a Dataset, name: &str) -> &'a [f64] {
    dataset.numeric(name).unwrap_or(&[])
}

/// Distinct values in first-appearance order, which fixes the trace order of
/// grouped figures.
fn distinct(values: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value.as_str()) {
            seen.push(value);
        }
    }
    seen
}
