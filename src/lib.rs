use anyhow::Context;
use paste::paste;
use quat_utils_proc_macro::define_func;

pub mod exercises;
pub mod quat;

pub use quat::{Quaternion, QuaternionError};

#[cfg(target_arch = "wasm32")]
wasm_minimal_protocol::initiate_protocol!();

trait FromWasmInput: Sized {
    fn from_wasm_input(arg: &[u8]) -> Result<Self, anyhow::Error>;
}

trait IntoWasmOutput {
    fn into_wasm_output(self) -> Vec<u8>;
}

fn decode_text(arg: &[u8]) -> Result<String, anyhow::Error> {
    let src = std::str::from_utf8(arg).context("Argument is not valid UTF-8.")?;
    Ok(src.replace('\u{2212}', "-"))
}

impl FromWasmInput for Quaternion {
    fn from_wasm_input(arg: &[u8]) -> Result<Self, anyhow::Error> {
        let src = decode_text(arg)?;
        src.parse::<Quaternion>()
            .with_context(|| format!("Invalid quaternion `{src}`."))
            .inspect_err(|err| log::debug!("rejected plugin argument: {err:#}"))
    }
}

/// Several quaternions separated by `;`. Blank input is an empty list.
impl FromWasmInput for Vec<Quaternion> {
    fn from_wasm_input(arg: &[u8]) -> Result<Self, anyhow::Error> {
        let src = decode_text(arg)?;
        if src.trim().is_empty() {
            return Ok(Vec::new());
        }
        src.split(';')
            .map(|item| Quaternion::from_wasm_input(item.as_bytes()))
            .collect()
    }
}

impl IntoWasmOutput for Quaternion {
    fn into_wasm_output(self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl IntoWasmOutput for f64 {
    fn into_wasm_output(self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }
}

impl IntoWasmOutput for [f64; 4] {
    fn into_wasm_output(self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(32);
        for x in self {
            out.extend_from_slice(x.to_le_bytes().as_ref());
        }
        out
    }
}

impl IntoWasmOutput for bool {
    fn into_wasm_output(self) -> Vec<u8> {
        vec![u8::from(self)]
    }
}

macro_rules! define_binary_func {
    ($name: ident, $method: ident) => {
        paste! {
            define_func!([<quaternion_ $name>], |p: Quaternion, q: Quaternion| p.$method(q));
        }
    };
}

macro_rules! define_fold_func {
    ($name: ident) => {
        paste! {
            define_func!([<quaternion_ $name>], |ps: Vec<Quaternion>| ps.into_iter().$name::<Quaternion>());
        }
    };
}

define_binary_func!(add, add);
define_binary_func!(mul, multiply);
define_fold_func!(sum);
define_fold_func!(product);

define_func!(quaternion_conj, |p: Quaternion| p.conjugate());
define_func!(quaternion_coefficients, |p: Quaternion| p.coefficients());
define_func!(quaternion_real, |p: Quaternion| p.a());
define_func!(quaternion_eq, |p: Quaternion, q: Quaternion| p == q);
define_func!(quaternion_repr, |p: Quaternion| p);
