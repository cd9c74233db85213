//! Placeholder substitution for badge hover text.
//!
//! Templates use `{name}` placeholders. Every supplied placeholder is replaced at each
//! occurrence; placeholders without a value are left in place.

/// Renders `template` by replacing `{name}` with `value` for every `(name, value)` pair.
///
/// ```
/// use partner_badge::core::template::render_template;
///
/// let text = render_template("Hello {who}!", &[("who", "Acme")]);
/// assert_eq!(text, "Hello Acme!");
/// ```
#[must_use]
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |rendered, (name, value)| {
            rendered.replace(&format!("{{{name}}}"), value)
        })
}
