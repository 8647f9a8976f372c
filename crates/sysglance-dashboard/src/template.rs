/// Template loading and `{{ name }}` substitution.
///
/// Substitution is a single left-to-right pass: values are inserted
/// verbatim and never rescanned, so a value that happens to contain `{{`
/// cannot pull in another variable. Placeholders with no matching variable
/// are left exactly as written.
use crate::error::DashboardError;
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in page used when no template file is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Variable name to already-rendered value.
pub type Variables = BTreeMap<String, String>;

/// Read a template file. An empty (or whitespace-only) file is an error.
pub fn load_template(path: &Path) -> Result<String, DashboardError> {
    let content = std::fs::read_to_string(path).map_err(|source| DashboardError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(DashboardError::EmptyTemplate {
            path: path.to_path_buf(),
        });
    }
    Ok(content)
}

/// Replace every `{{ name }}` whose trimmed name is in `vars`.
pub fn substitute(template: &str, vars: &Variables) -> String {
    let mut out = String::with_capacity(template.len() + template.len() / 2);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else {
            // Unterminated; keep the remainder as-is.
            out.push_str(&rest[open..]);
            return out;
        };
        let whole = &rest[open..open + 2 + close + 2];
        match vars.get(inner[..close].trim()) {
            Some(value) => out.push_str(value),
            None => out.push_str(whole),
        }
        rest = &inner[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Names of placeholders in `template` that `vars` does not define.
pub fn unresolved<'t>(template: &'t str, vars: &Variables) -> Vec<&'t str> {
    let mut missing = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else { break };
        let name = inner[..close].trim();
        if !vars.contains_key(name) && !missing.contains(&name) {
            missing.push(name);
        }
        rest = &inner[close + 2..];
    }
    missing
}
