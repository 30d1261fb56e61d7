mod macros;
pub mod format;
pub mod parsing;
pub mod traits;

pub use format::fmt_general;
pub use traits::GeneralFormat;
