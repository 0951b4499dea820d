//! CSS custom-property generation for the configurator's styling section.

use crate::models::StyleForm;

/// Ordered custom-property overrides, without the leading `--`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides(Vec<(&'static str, String)>);

impl StyleOverrides {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// Values that mean "leave the overlay default alone".
fn is_unset(property: &str, value: &str) -> bool {
    match property {
        "text-color" => value == "#ffffff",
        "font-weight" => value == "Select Weight",
        "text-transform" => value == "none",
        _ => false,
    }
}

pub fn style_overrides(form: &StyleForm) -> StyleOverrides {
    if !form.custom_styling {
        return StyleOverrides::default();
    }

    let fields: [(&'static str, &Option<String>); 6] = [
        ("font-size", &form.font_size),
        ("font-weight", &form.font_weight),
        ("text-color", &form.color),
        ("letter-spacing", &form.letter_spacing),
        ("text-transform", &form.text_transform),
        ("text-shadow", &form.text_shadow),
    ];

    StyleOverrides(
        fields
            .into_iter()
            .filter_map(|(property, value)| {
                let value = value.as_deref()?;
                if value.is_empty() || is_unset(property, value) {
                    return None;
                }
                Some((property, value.to_string()))
            })
            .collect(),
    )
}

/// Render a `:root` block, or an empty string when nothing is overridden.
pub fn generate_css(form: &StyleForm) -> String {
    let overrides = style_overrides(form);
    if overrides.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = overrides
        .iter()
        .map(|(property, value)| format!("  --{}: {};", property, value))
        .collect();

    format!(":root {{\n{}\n}}", lines.join("\n"))
}
