extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, Pat, parse_macro_input};

/// Defines a plugin function from a closure with typed parameters.
///
/// `define_func!(name, |p: Quaternion, q: Quaternion| p.add(q))` expands to a function taking
/// one `&[u8]` per closure parameter. Each argument is decoded with `FromWasmInput`, the closure
/// result is encoded with `IntoWasmOutput`, and decoding errors are returned as
/// `anyhow::Error`. Both traits must be in scope where the macro is invoked. The function is
/// exported through `wasm_minimal_protocol::wasm_func` when compiling for `wasm32`.
#[proc_macro]
pub fn define_func(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DefineFuncInput);

    let func_name = input.func_name;
    let closure = input.closure;

    let arg_types = match get_arg_types(&closure) {
        Ok(arg_types) => arg_types,
        Err(err) => return err.to_compile_error().into(),
    };
    let n_args = arg_types.len();

    let arg_declarations = (0..n_args).map(|i| {
        let arg_name = Ident::new(&format!("arg{}", i), Span::call_site());
        quote! { #arg_name: &[u8] }
    });
    let var_declarations = arg_types.iter().enumerate().map(|(i, &arg_type)| {
        let arg_name = Ident::new(&format!("arg{}", i), Span::call_site());
        let var_name = Ident::new(&format!("num{}", i), Span::call_site());
        quote! {
            let #var_name = <#arg_type>::from_wasm_input(#arg_name)?;
        }
    });
    let closure_args = (0..n_args).map(|i| {
        let var_name = Ident::new(&format!("num{}", i), Span::call_site());
        quote! { #var_name }
    });

    let expanded = quote! {
        #[cfg_attr(target_arch = "wasm32", ::wasm_minimal_protocol::wasm_func)]
        pub fn #func_name(#(#arg_declarations),*) -> Result<Vec<u8>, anyhow::Error> {
            #(#var_declarations)*
            let result = (#closure)(#(#closure_args),*);
            Ok(result.into_wasm_output())
        }
    };

    TokenStream::from(expanded)
}

fn get_arg_types(closure: &syn::ExprClosure) -> syn::Result<Vec<&syn::Type>> {
    closure
        .inputs
        .iter()
        .enumerate()
        .map(|(index, input)| match input {
            Pat::Type(pat_type) => Ok(pat_type.ty.as_ref()),
            other => Err(syn::Error::new_spanned(
                other,
                format!("missing type annotation for closure parameter at index {index}"),
            )),
        })
        .collect()
}

struct DefineFuncInput {
    func_name: Ident,
    closure: syn::ExprClosure,
}

impl syn::parse::Parse for DefineFuncInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let func_name: Ident = input.parse()?;
        input.parse::<syn::Token![,]>()?;
        let closure: syn::ExprClosure = input.parse()?;

        Ok(DefineFuncInput { func_name, closure })
    }
}
