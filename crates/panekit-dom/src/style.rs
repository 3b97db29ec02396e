//! Inline style declarations and computed-value defaults

/// Ordered `property: value` pairs parsed from a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a: b; c: d`. Malformed declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut decl = Self::new();
        for part in css.split(';') {
            let Some((name, value)) = part.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if !name.is_empty() && !value.is_empty() {
                decl.set(name, value);
            }
        }
        decl
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let property = normalize(property);
        self.entries
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property. An empty value removes it, as in CSSOM.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = normalize(property);
        let value = value.trim();
        if value.is_empty() {
            self.remove(&property);
            return;
        }
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((property, value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let property = normalize(property);
        let index = self.entries.iter().position(|(name, _)| *name == property)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to attribute form
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `backgroundColor` and `background-color` name the same property
fn normalize(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.trim().chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Initial value used when nothing is set or inherited
pub(crate) fn initial_value(property: &str) -> &'static str {
    match normalize(property).as_str() {
        "padding" | "padding-top" | "padding-right" | "padding-bottom" | "padding-left" => "0px",
        "margin" | "margin-top" | "margin-right" | "margin-bottom" | "margin-left" => "0px",
        "background" | "background-color" => "rgba(0, 0, 0, 0)",
        "color" => "rgb(0, 0, 0)",
        "opacity" => "1",
        "display" => "inline",
        "visibility" => "visible",
        "font-size" => "16px",
        "width" | "height" => "auto",
        _ => "",
    }
}

/// Properties that take the parent's computed value when unset
pub(crate) fn is_inherited(property: &str) -> bool {
    matches!(
        normalize(property).as_str(),
        "color" | "visibility" | "font-size" | "font-family" | "font-weight" | "line-height"
            | "text-align"
    )
}
