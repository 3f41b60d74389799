use crate::escape::html_escape;

/// Iframe snippet the host offers for embedding a published form.
pub fn generate(title: &str) -> String {
    format!(
        "<iframe\n  src=\"YOUR_FORM_URL_HERE\"\n  width=\"100%\"\n  height=\"800\"\n  style=\"border: none;\"\n  title=\"{}\"\n></iframe>\n",
        html_escape(title)
    )
}
