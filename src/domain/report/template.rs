/// Substitute `{{name}}` placeholders in report SQL and message templates.
///
/// The variable set is closed and supplied by the caller; unknown
/// placeholders are left untouched so a typo is visible in the output
/// instead of silently vanishing.
pub fn fill_placeholders(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
