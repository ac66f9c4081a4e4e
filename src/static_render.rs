//! Static string generation: the same builder closures, no reactivity.

use rill_core::Document;

use crate::app::Runtime;
use crate::builder::Builder;

/// Runs `build` against a throwaway document and returns the resulting HTML.
///
/// Watch declarations bind to a sink that is discarded before anything could
/// notify it, and event bindings land in a listener table that is dropped
/// with the runtime, so the output carries no reactivity or handler
/// artifacts. Pure: for a deterministic closure, two calls produce
/// byte-identical strings.
#[must_use]
pub fn render_static(build: impl FnOnce(&mut Builder)) -> String {
    let runtime = Runtime::new(Document::new());
    let root = runtime.document().root();
    let mut builder = Builder::new(runtime.clone(), root);
    build(&mut builder);
    let document = runtime.document();
    document.inner_html(root)
}
