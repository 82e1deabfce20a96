pub mod document;
pub mod node;
pub mod selection;

pub use document::*;
pub use node::*;
pub use selection::*;
