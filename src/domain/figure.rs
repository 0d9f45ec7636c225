// Declarative figure descriptions rendered by the dashboard front end
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Box,
    Line,
}

/// A value on the x axis: numeric for scatter plots, textual for category and
/// date axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Text(String),
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Number(value)
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Text(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Text(value.to_string())
    }
}

/// One series of a figure. Grouped/colored charts are expressed as one trace
/// per category value, named after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub kind: TraceKind,
    pub name: String,
    pub x: Vec<AxisValue>,
    pub y: Vec<f64>,
}

impl Trace {
    pub fn scatter(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            name: name.into(),
            x: x.into_iter().map(AxisValue::from).collect(),
            y,
        }
    }

    pub fn boxes(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Box,
            name: name.into(),
            x: x.into_iter().map(AxisValue::from).collect(),
            y,
        }
    }

    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Line,
            name: name.into(),
            x: x.into_iter().map(AxisValue::from).collect(),
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub traces: Vec<Trace>,
}

impl FigureSpec {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        traces: Vec<Trace>,
    ) -> Self {
        Self {
            title: title.into(),
            x_title: x_title.into(),
            y_title: y_title.into(),
            traces,
        }
    }
}
