mod publisher;

pub use publisher::{publish, Destination};

use tracing::warn;

use crate::charts::Figure;
use crate::constants::PLOTLY_CDN_URL;

/// Shared style template wrapping every chart in a card
const STYLE_TEMPLATE: &str = r#"
    body { font-family: Arial, sans-serif; background: #f4f6f8; padding: 20px; }
    h1 { text-align: center; color: #003366; }
    .chart-container { margin-bottom: 50px; border: 1px solid #ccc; background: white; padding: 15px; border-radius: 10px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
"#;

/// The final artifact: ordered figures plus the style template, serialized
/// once per run into a single HTML document
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub figures: Vec<Figure>,
}

impl Dashboard {
    pub fn new(title: String, figures: Vec<Figure>) -> Self {
        Self { title, figures }
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Render the self-contained HTML document, figures in input order.
    ///
    /// Element ids are sequential so identical input always produces
    /// identical output.
    pub fn to_html(&self) -> String {
        let mut sections = String::new();

        for (idx, figure) in self.figures.iter().enumerate() {
            let div_id = format!("chart-{}", idx);
            match figure.to_inline_html(&div_id) {
                Ok(block) => {
                    sections.push_str("<div class=\"chart-container\">\n");
                    sections.push_str(&block);
                    sections.push_str("\n</div>\n");
                }
                Err(e) => {
                    warn!(chart = idx, error = %e, "Chart serialization failed, omitting");
                }
            }
        }

        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <style>{style}</style>\n\
             <script src=\"{plotly}\"></script>\n\
             </head>\n\
             <body>\n\
             <h1>{title}</h1>\n\
             {sections}\
             </body>\n\
             </html>\n",
            title = self.title,
            style = STYLE_TEMPLATE,
            plotly = PLOTLY_CDN_URL,
            sections = sections,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Layout, Trace};

    fn figure(name: &str) -> Figure {
        Figure::new(
            vec![Trace::bar(name, vec!["2023".to_string()], vec![1.0])],
            Layout::new(name),
        )
    }

    #[test]
    fn test_html_embeds_figures_in_input_order() {
        let dashboard = Dashboard::new(
            "US Banks Dashboard".to_string(),
            vec![figure("first"), figure("second")],
        );

        let html = dashboard.to_html();
        assert!(html.contains("<title>US Banks Dashboard</title>"));
        assert!(html.contains(PLOTLY_CDN_URL));
        assert!(html.contains("chart-container"));

        let first = html.find("\"first\"").unwrap();
        let second = html.find("\"second\"").unwrap();
        assert!(first < second);

        assert!(html.contains("id=\"chart-0\""));
        assert!(html.contains("id=\"chart-1\""));
    }

    #[test]
    fn test_html_is_deterministic() {
        let dashboard = Dashboard::new("D".to_string(), vec![figure("a")]);
        assert_eq!(dashboard.to_html(), dashboard.to_html());
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::new("D".to_string(), Vec::new());
        assert!(dashboard.is_empty());
        assert!(!dashboard.to_html().contains("chart-container"));
    }
}
