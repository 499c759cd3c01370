//! Base stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! The sheet is discovered before any document rule, so at equal specificity
//! the document wins. Lengths are written in `px`: the layout core resolves
//! only pixel dimensions.

use std::sync::OnceLock;

use crate::parser::{CSSParser, Stylesheet};

const UA_CSS: &str = r"
/* [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements) */
base, head, link, meta, script, style, template, title {
    display: none;
}

/* [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3) */
address, article, aside, blockquote, body, center, dd, div, dl, dt,
figcaption, figure, footer, form, h1, h2, h3, h4, h5, h6, header, hr,
html, li, main, nav, ol, p, pre, section, ul {
    display: block;
}

/* [§ 15.3.5 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3) */
b, strong, th {
    font-weight: bold;
}

i, em, cite, var {
    font-style: italic;
}

u, ins {
    text-decoration: underline;
}

/* [§ 15.3.6 Sections and headings](https://html.spec.whatwg.org/multipage/rendering.html#sections-and-headings) */
h1, h2, h3, h4, h5, h6 {
    font-weight: bold;
}

h1 { font-size: 32px; }
h2 { font-size: 24px; }
h3 { font-size: 19px; }
";

/// Return the parsed base stylesheet, parsing only once.
#[must_use]
pub fn ua_stylesheet() -> &'static Stylesheet {
    static STYLESHEET: OnceLock<Stylesheet> = OnceLock::new();
    STYLESHEET.get_or_init(|| CSSParser::from_source(UA_CSS).parse_stylesheet())
}
