use crate::application::dto::ViewKind;
use crate::application::read_models::InventoryReadModel;
use crate::shared::Result;

/// ViewFormatter port for rendering inventory views
///
/// This port abstracts the presentation of the read model in different
/// output formats (JSON, Markdown, etc.). Formatters only render; they
/// never filter or resolve anything themselves.
pub trait ViewFormatter {
    /// Formats the requested view(s) of the read model
    ///
    /// # Arguments
    /// * `model` - Read model of the latest pipeline pass
    /// * `view` - Which view to render (`ViewKind::All` renders everything)
    ///
    /// # Returns
    /// Formatted content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &InventoryReadModel, view: ViewKind) -> Result<String>;
}
