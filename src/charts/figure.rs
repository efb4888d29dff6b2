use serde::Serialize;

use crate::error::Result;

/// A single renderable data series in Plotly's JSON trace format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        name: String,
        x: Vec<String>,
        y: Vec<f64>,
        mode: String,
    },
    Bar {
        name: String,
        x: Vec<String>,
        y: Vec<f64>,
    },
    Box {
        name: String,
        y: Vec<f64>,
    },
}

impl Trace {
    /// Line trace (close price, cumulative return, ...)
    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Trace::Scatter {
            name: name.into(),
            x,
            y,
            mode: "lines".to_string(),
        }
    }

    pub fn bar(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Trace::Bar {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn box_plot(name: impl Into<String>, y: Vec<f64>) -> Self {
        Trace::Box {
            name: name.into(),
            y,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Trace::Scatter { name, .. } | Trace::Bar { name, .. } | Trace::Box { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub color: String,
}

/// Figure-level styling, shared across all dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paper_bgcolor: "#ffffff".to_string(),
            plot_bgcolor: "#ffffff".to_string(),
            font: Font {
                family: "Arial, sans-serif".to_string(),
                color: "#333333".to_string(),
            },
            xaxis: None,
            yaxis: None,
            barmode: None,
        }
    }

    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.xaxis = Some(Axis {
            title: title.into(),
        });
        self
    }

    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.yaxis = Some(Axis {
            title: title.into(),
        });
        self
    }

    /// Side-by-side bars per x value, one per trace
    pub fn grouped_bars(mut self) -> Self {
        self.barmode = Some("group".to_string());
        self
    }
}

/// One chart: ordered traces plus layout, serialized into the dashboard as a
/// div and a Plotly.newPlot call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self { data, layout }
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// HTML block embedding this figure under the given element id
    pub fn to_inline_html(&self, div_id: &str) -> Result<String> {
        let data = serde_json::to_string(&self.data)?;
        let layout = serde_json::to_string(&self.layout)?;
        Ok(format!(
            "<div id=\"{div_id}\" class=\"chart\"></div>\n\
             <script>Plotly.newPlot(\"{div_id}\", {data}, {layout}, {{\"responsive\": true}});</script>"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_serializes_with_plotly_type_tag() {
        let trace = Trace::box_plot("JPM", vec![0.1, -0.2]);
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["type"], "box");
        assert_eq!(json["name"], "JPM");

        let trace = Trace::line("JPM", vec!["2024-01-01".to_string()], vec![1.0]);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines");
    }

    #[test]
    fn test_layout_omits_unset_options() {
        let json = serde_json::to_value(Layout::new("t")).unwrap();
        assert!(json.get("barmode").is_none());
        assert!(json.get("xaxis").is_none());

        let json = serde_json::to_value(Layout::new("t").grouped_bars().x_title("Period")).unwrap();
        assert_eq!(json["barmode"], "group");
        assert_eq!(json["xaxis"]["title"], "Period");
    }

    #[test]
    fn test_inline_html_targets_div_id() {
        let figure = Figure::new(
            vec![Trace::bar("JPM", vec!["2023".to_string()], vec![1.0])],
            Layout::new("Revenue"),
        );

        let html = figure.to_inline_html("chart-3").unwrap();
        assert!(html.contains("<div id=\"chart-3\""));
        assert!(html.contains("Plotly.newPlot(\"chart-3\""));
    }
}
