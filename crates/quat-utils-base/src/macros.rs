/// Implements [`Sum`](std::iter::Sum) for a type with an additive `ZERO` constant.
///
/// Terms are reduced pairwise, so rounding error grows with the logarithm of the number of terms
/// rather than linearly.
#[macro_export]
macro_rules! impl_sum {
    ($t:ty) => {
        impl ::std::iter::Sum for $t {
            fn sum<I>(xs: I) -> $t
            where
                I: Iterator<Item = $t>,
            {
                let mut stack: Vec<$t> = Vec::new();
                for (i, x) in xs.enumerate() {
                    let mut s = x;
                    for _ in 0..(i + 1).trailing_zeros() {
                        if let Some(prev) = stack.pop() {
                            s = prev + s;
                        }
                    }
                    stack.push(s);
                }
                stack.into_iter().fold(<$t>::ZERO, |acc, x| acc + x)
            }
        }

        impl<'a> ::std::iter::Sum<&'a $t> for $t {
            fn sum<I>(xs: I) -> $t
            where
                I: Iterator<Item = &'a $t>,
            {
                xs.cloned().sum()
            }
        }
    };
}

/// Implements [`Product`](std::iter::Product) for a type with a multiplicative `ONE` constant.
///
/// Factors are reduced pairwise like [`impl_sum`], always keeping the earlier factor on the left,
/// so the result is correct for non-commutative multiplication.
#[macro_export]
macro_rules! impl_product {
    ($t:ty) => {
        impl ::std::iter::Product for $t {
            fn product<I>(xs: I) -> $t
            where
                I: Iterator<Item = $t>,
            {
                let mut stack: Vec<$t> = Vec::new();
                for (i, x) in xs.enumerate() {
                    let mut s = x;
                    for _ in 0..(i + 1).trailing_zeros() {
                        if let Some(prev) = stack.pop() {
                            s = prev * s;
                        }
                    }
                    stack.push(s);
                }
                stack.into_iter().fold(<$t>::ONE, |acc, x| acc * x)
            }
        }

        impl<'a> ::std::iter::Product<&'a $t> for $t {
            fn product<I>(xs: I) -> $t
            where
                I: Iterator<Item = &'a $t>,
            {
                xs.cloned().product()
            }
        }
    };
}
