use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ViewFormatter;

/// Factory for creating view formatters
///
/// Keeps the choice of formatter adapter in the application layer so the
/// CLI only deals with `OutputFormat`.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use resgraph::application::dto::OutputFormat;
    /// use resgraph::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ViewFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use resgraph::application::dto::OutputFormat;
    /// use resgraph::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Rendering JSON view model...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Rendering JSON view model...",
            OutputFormat::Markdown => "📝 Rendering Markdown report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ViewKind;
    use crate::application::read_models::{
        DiagnosticsView, InventoryReadModel, ProjectedViews, SnapshotView,
    };
    use crate::inventory::domain::{FilterState, GraphExport};

    fn empty_model() -> InventoryReadModel {
        InventoryReadModel {
            snapshot: SnapshotView::default(),
            filters: FilterState::new(),
            visible_count: 0,
            views: ProjectedViews::default(),
            selection: None,
            graph: GraphExport {
                nodes: Vec::new(),
                edges: Vec::new(),
            },
            diagnostics: DiagnosticsView::default(),
        }
    }

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter.format(&empty_model(), ViewKind::Summary).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
    }

    #[test]
    fn test_create_markdown_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown);
        let output = formatter.format(&empty_model(), ViewKind::Summary).unwrap();
        assert!(output.starts_with('#'));
    }

    #[test]
    fn test_progress_message_json() {
        let message = FormatterFactory::progress_message(OutputFormat::Json);
        assert_eq!(message, "📝 Rendering JSON view model...");
    }

    #[test]
    fn test_progress_message_markdown() {
        let message = FormatterFactory::progress_message(OutputFormat::Markdown);
        assert_eq!(message, "📝 Rendering Markdown report...");
    }
}
