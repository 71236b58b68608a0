use kitsmith_core::error::Error;
use kitsmith_core::{FieldType, Result};
use syn::{GenericArgument, PathArguments, PathSegment, Type, TypePath};

/// Resolves a parameter/result type expression.
///
/// Recognized shapes: bare identifiers, two-segment `pkg::Name` paths,
/// `Vec<T>` / `[T]` / `[T; N]`, and one outermost `Option<T>`. Anything
/// else aborts extraction entirely — a silently dropped field would corrupt
/// every downstream generator.
pub fn resolve_type(ty: &Type, context: &str) -> Result<FieldType> {
    if let Type::Path(path) = ty {
        if let Some(inner) = wrapper_argument(path, "Option", context)? {
            return Ok(resolve_base(inner, context)?.option());
        }
    }
    resolve_base(ty, context)
}

fn resolve_base(ty: &Type, context: &str) -> Result<FieldType> {
    match ty {
        Type::Path(path) if path.qself.is_none() => {
            if let Some(inner) = wrapper_argument(path, "Vec", context)? {
                return Ok(resolve_base(inner, context)?.vec());
            }
            let segments: Vec<&PathSegment> = path.path.segments.iter().collect();
            match segments.as_slice() {
                [name] => {
                    ensure_plain(name, context)?;
                    Ok(FieldType::local(name.ident.to_string()))
                }
                [package, name] => {
                    ensure_plain(package, context)?;
                    ensure_plain(name, context)?;
                    Ok(FieldType::foreign(
                        package.ident.to_string(),
                        name.ident.to_string(),
                    ))
                }
                _ => Err(Error::unsupported_type(
                    context,
                    format!("path with {} segments", segments.len()),
                )),
            }
        }
        Type::Slice(slice) => Ok(resolve_base(&slice.elem, context)?.vec()),
        Type::Array(array) => Ok(resolve_base(&array.elem, context)?.vec()),
        other => Err(Error::unsupported_type(context, shape_name(other))),
    }
}

/// `Some(inner)` when the path is a bare `wrapper<T>` with exactly one type
/// argument.
fn wrapper_argument<'a>(
    path: &'a TypePath,
    wrapper: &str,
    context: &str,
) -> Result<Option<&'a Type>> {
    if path.qself.is_some() || path.path.segments.len() != 1 {
        return Ok(None);
    }
    let segment = &path.path.segments[0];
    if segment.ident != wrapper {
        return Ok(None);
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Ok(None);
    };
    match args.args.iter().collect::<Vec<_>>().as_slice() {
        [GenericArgument::Type(inner)] => Ok(Some(inner)),
        _ => Err(Error::unsupported_type(
            context,
            format!("`{wrapper}` with unrecognized arguments"),
        )),
    }
}

fn ensure_plain(segment: &PathSegment, context: &str) -> Result<()> {
    if segment.arguments.is_none() {
        return Ok(());
    }
    Err(Error::unsupported_type(
        context,
        format!("generic arguments on `{}`", segment.ident),
    ))
}

fn shape_name(ty: &Type) -> &'static str {
    match ty {
        Type::Reference(_) => "reference",
        Type::BareFn(_) => "function pointer",
        Type::TraitObject(_) => "trait object",
        Type::ImplTrait(_) => "impl trait",
        Type::Tuple(_) => "tuple",
        Type::Ptr(_) => "raw pointer",
        Type::Paren(_) => "parenthesized type",
        Type::Group(_) => "grouped type",
        Type::Infer(_) => "inferred type",
        Type::Never(_) => "never type",
        Type::Macro(_) => "macro type",
        _ => "unrecognized type expression",
    }
}
