use crate::format::fmt_general;

/// Formatting with a fixed number of significant digits, in the manner of C's `%g`.
pub trait GeneralFormat {
    fn fmt_general(&self, precision: usize) -> String;
}

macro_rules! impl_general_format_for_floats {
    ($($t: ty),*$(,)?) => {
        $(impl GeneralFormat for $t {
            fn fmt_general(&self, precision: usize) -> String {
                fmt_general(*self, precision)
            }
        })*
    };
}
impl_general_format_for_floats!(f32, f64);
