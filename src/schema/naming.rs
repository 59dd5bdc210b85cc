//! Field and model name conversions

/// Convert a camelCase or PascalCase key to snake_case.
///
/// Purely lexical: an underscore goes before every ASCII uppercase letter that
/// is not the first character, then the whole string is lowercased. Runs of
/// capitals are split letter by letter (`HTMLPage` -> `h_t_m_l_page`).
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Convert a snake_case name to PascalCase (`line_items` -> `LineItems`)
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Base class name for a nested object found under `field_name`
pub(crate) fn model_base_name(field_name: &str, list_item: bool) -> String {
    let mut name: String = to_pascal_case(field_name)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    if !name.chars().next().is_some_and(char::is_alphabetic) {
        name.insert_str(0, "Model");
    }
    if list_item {
        name.push_str("Item");
    }
    name
}
