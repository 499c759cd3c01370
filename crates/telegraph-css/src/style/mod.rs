//! Property values, the property registry and resolved property maps
//!
//! - [CSS 2.1 Appendix F: Full property table](https://www.w3.org/TR/CSS21/propidx.html)
//! - [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//! - [CSS 2.1 § 9.2.4 The display property](https://www.w3.org/TR/CSS21/visuren.html#display-prop)

pub mod computed;
mod declaration;
mod display;
pub mod properties;
mod value;

pub use computed::{ComputedEntry, PropertyMap};
pub use declaration::{DeclarationName, Priority, PropertyDeclaration};
pub use display::Display;
pub use properties::{Property, Shorthand};
pub use value::Value;
