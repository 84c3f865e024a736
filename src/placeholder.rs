use dioxus::prelude::*;

/// Ordered CSS declarations for the placeholder's inner box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InnerStyle(Vec<(String, String)>);

impl InnerStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((property.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declarations as a `style` attribute value, in insertion order.
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(property, value)| format!("{property}:{value};"))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for InnerStyle
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Fixed-size stand-in rendered while the gate is hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// Single block filled with a background color.
    Filled {
        height: u32,
        width: u32,
        background: String,
    },
    /// Sized block wrapping an inner box styled by the caller. No background is applied.
    Framed {
        height: u32,
        width: u32,
        inner: InnerStyle,
    },
}

impl Placeholder {
    /// An inner style, when given, takes precedence over `background`.
    pub fn new(height: u32, width: u32, background: &str, inner: Option<&InnerStyle>) -> Self {
        match inner {
            Some(inner) => Placeholder::Framed {
                height,
                width,
                inner: inner.clone(),
            },
            None => Placeholder::Filled {
                height,
                width,
                background: background.to_owned(),
            },
        }
    }

    pub fn size(&self) -> (u32, u32) {
        match self {
            Placeholder::Filled { height, width, .. } | Placeholder::Framed { height, width, .. } => {
                (*height, *width)
            }
        }
    }

    pub fn outer_style(&self) -> String {
        match self {
            Placeholder::Filled {
                height,
                width,
                background,
            } => format!("height:{height}px;width:{width}px;background:{background};"),
            Placeholder::Framed { height, width, .. } => format!("height:{height}px;width:{width}px;"),
        }
    }

    pub fn inner_style(&self) -> Option<String> {
        match self {
            Placeholder::Filled { .. } => None,
            Placeholder::Framed { inner, .. } => Some(inner.to_css()),
        }
    }

    pub fn render(&self) -> Element {
        let outer = self.outer_style();
        match self.inner_style() {
            Some(inner) => rsx! {
                div { style: "{outer}",
                    div { style: "{inner}" }
                }
            },
            None => rsx! {
                div { style: "{outer}" }
            },
        }
    }
}
