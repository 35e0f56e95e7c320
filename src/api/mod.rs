pub mod blogs;
pub mod health;
pub mod install;
pub mod menus;
pub mod publish;
pub mod routes;
pub mod settings;

/// The trimmed value when it is present and not blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Names of the required fields that are absent or blank.
pub(crate) fn missing<'a>(fields: &[(&'a str, &Option<String>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect()
}
