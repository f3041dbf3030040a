use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, LitStr, PatType, ReturnType, Type};

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "f64"),
        _ => false,
    }
}

/// Turns `fn name(a: f64, b: f64) -> f64 { .. }` into a builtin with the
/// calling convention of the evaluator: `fn name(args: &[f64]) -> Result<f64, EvalError>`.
///
/// The argument count is checked before the body runs. The name reported in
/// arity errors defaults to the Rust identifier and can be overridden with
/// `#[builtin_fn(name = "addPercent")]`.
#[proc_macro_attribute]
pub fn builtin_fn(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut builtin_name: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            builtin_name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported builtin_fn property"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let attrs = &input.attrs;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        _ => {
            return syn::Error::new_spanned(&input.sig, "builtin functions must return f64")
                .to_compile_error()
                .into();
        }
    }

    let reported_name = builtin_name
        .map(|lit| lit.value())
        .unwrap_or_else(|| fn_name.to_string());

    let mut arg_extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return syn::Error::new_spanned(arg, "builtin functions cannot take self")
                .to_compile_error()
                .into();
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => {
                return syn::Error::new_spanned(pat, "unsupported argument pattern")
                    .to_compile_error()
                    .into();
            }
        };
        if !is_f64(ty) {
            return syn::Error::new_spanned(ty, "builtin arguments must be f64")
                .to_compile_error()
                .into();
        }

        arg_extractions.push(quote! {
            let #arg_name: f64 = args[#i];
        });
    }

    let args_len = arg_extractions.len();
    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) -> ::core::result::Result<f64, crate::error::EvalError> {
            if args.len() != #args_len {
                return Err(crate::error::EvalError::arity(#reported_name, #args_len, args.len()));
            }

            #(#arg_extractions)*

            Ok(#fn_body)
        }
    };

    TokenStream::from(expanded)
}
