//! Element property maps and their attribute-application rules.

use std::fmt;
use std::rc::Rc;

use rill_reactive::{State, Watch};

use crate::event::Event;

pub(crate) type Handler = Rc<dyn Fn(&Event)>;

/// A property value before string coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A string value, emitted as-is.
    Str(String),
    /// A boolean; on whitelisted attribute names this toggles presence, on
    /// any other name it string-coerces like every other value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! attr_value_from_int {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

attr_value_from_int!(i8 i16 i32 i64 u8 u16 u32);

/// Inline style: either a verbatim CSS string or property/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// A raw `style` attribute value, emitted verbatim.
    Raw(String),
    /// Property/value pairs; camelCase property names convert to kebab-case.
    Pairs(Vec<(String, String)>),
}

impl Style {
    pub(crate) fn to_css(&self) -> String {
        match self {
            Self::Raw(css) => css.clone(),
            Self::Pairs(pairs) => pairs
                .iter()
                .map(|(name, value)| format!("{}:{value}", kebab_case(name)))
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

impl From<&str> for Style {
    fn from(css: &str) -> Self {
        Self::Raw(css.to_string())
    }
}

impl From<String> for Style {
    fn from(css: String) -> Self {
        Self::Raw(css)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Style {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<(String, String)>> for Style {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Pairs(pairs)
    }
}

pub(crate) enum PropEntry {
    Attr(String, AttrValue),
    Style(Style),
    Listener(String, Handler),
}

/// A property map for one element, built fluently.
///
/// Entries apply in insertion order. The `watch` declaration and the `html`
/// flag are consumed by the builder and never reach the attribute applier.
#[derive(Default)]
#[must_use]
pub struct Props {
    entries: Vec<PropEntry>,
    watch: Watch,
    raw_html: bool,
}

impl Props {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `class` attribute.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value.into())
    }

    /// Sets the `id` attribute.
    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value.into())
    }

    /// Sets a generic attribute. camelCase keys convert to kebab-case.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.entries
            .push(PropEntry::Attr(key.into(), value.into()));
        self
    }

    /// Sets a boolean attribute. Sugar for `attr(key, flag)`.
    pub fn flag(self, key: impl Into<String>, flag: bool) -> Self {
        self.attr(key, flag)
    }

    /// Sets the inline style.
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.entries.push(PropEntry::Style(style.into()));
        self
    }

    /// Binds a listener for `event` on this element.
    pub fn on(mut self, event: impl Into<String>, handler: impl Fn(&Event) + 'static) -> Self {
        self.entries
            .push(PropEntry::Listener(event.into(), Rc::new(handler)));
        self
    }

    /// Declares a dependency on one state cell. May be called repeatedly; the
    /// declarations accumulate.
    pub fn watch<T: 'static>(mut self, cell: &State<T>) -> Self {
        self.watch.extend(Watch::from(cell));
        self
    }

    /// Folds a prepared [`Watch`] declaration into this map.
    pub fn watch_all(mut self, watch: impl Into<Watch>) -> Self {
        self.watch.extend(watch.into());
        self
    }

    /// Marks literal content as raw markup instead of text.
    pub fn html(mut self, raw: bool) -> Self {
        self.raw_html = raw;
        self
    }

    pub(crate) fn into_parts(self) -> (Vec<PropEntry>, Watch, bool) {
        (self.entries, self.watch, self.raw_html)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("entries", &self.entries.len())
            .field("watch", &self.watch)
            .field("raw_html", &self.raw_html)
            .finish()
    }
}

/// Converts a camelCase key to its kebab-case attribute form.
///
/// Keys that are already lowercase pass through unchanged.
#[must_use]
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_converts_camel_keys() {
        assert_eq!(kebab_case("dataValue"), "data-value");
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("ariaLabelledBy"), "aria-labelled-by");
        assert_eq!(kebab_case("class"), "class");
    }

    #[test]
    fn style_pairs_join_with_converted_names() {
        let style = Style::from([("fontSize", "12px"), ("color", "red")]);
        assert_eq!(style.to_css(), "font-size:12px;color:red");
    }

    #[test]
    fn style_string_passes_through() {
        let style = Style::from("margin: 0; padding: 0");
        assert_eq!(style.to_css(), "margin: 0; padding: 0");
    }

    #[test]
    fn attr_values_string_coerce() {
        assert_eq!(AttrValue::from(3).to_string(), "3");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttrValue::from(false).to_string(), "false");
        assert_eq!(AttrValue::from("x").to_string(), "x");
    }
}
