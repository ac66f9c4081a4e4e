//! Data tables: the standard tag list behind the shorthand constructors and
//! the boolean-attribute whitelist.

use rill_core::NodeId;

use crate::builder::{Builder, ElementArgs};

/// Attribute names whose boolean values toggle bare-attribute presence.
/// A boolean on any other name string-coerces like a normal value.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Returns `true` for names in the boolean-attribute whitelist.
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(&name)
}

macro_rules! tag_shorthands {
    ($($tag:ident)*) => {
        /// Shorthand constructors, one per standard HTML tag. Each is a thin
        /// argument-normalizing wrapper over [`Builder::elem`].
        impl Builder {
            $(
                #[doc = concat!("Builds a `<", stringify!($tag), ">` element under the current insertion parent.")]
                pub fn $tag<M>(&mut self, args: impl ElementArgs<M>) -> NodeId {
                    self.elem(stringify!($tag), args)
                }
            )*
        }
    };
}

tag_shorthands! {
    a abbr address area article aside audio
    b base bdi bdo blockquote body br button
    canvas caption cite code col colgroup
    data datalist dd del details dfn dialog div dl dt
    em embed
    fieldset figcaption figure footer form
    h1 h2 h3 h4 h5 h6 head header hgroup hr html
    i iframe img input ins
    kbd
    label legend li link
    main map mark menu meta meter
    nav noscript
    object ol optgroup option output
    p picture pre progress
    q
    rp rt ruby
    s samp script section select slot small source span strong style sub summary sup
    table tbody td template textarea tfoot th thead time title tr track
    u ul
    var video
    wbr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_covers_the_common_form_attributes() {
        for name in ["checked", "disabled", "readonly", "required", "selected"] {
            assert!(is_boolean_attribute(name), "{name} must be whitelisted");
        }
        assert!(!is_boolean_attribute("value"));
        assert!(!is_boolean_attribute("data-checked"));
    }
}
