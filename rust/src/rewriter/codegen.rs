use crate::signature::FunctionSignature;

/// `<macro>!(self.<name>(<arg1>, ..., <argN>))`
pub fn call_expression(call_macro: &str, signature: &FunctionSignature) -> String {
    let args = signature
        .arguments
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}!(self.{}({}))", call_macro, signature.name, args)
}

/// `    <name> { <arg1>: <type1>, ..., <argN>: <typeN> },` plus a newline.
///
/// The brace form is kept even without fields (`name {  },`).
pub fn enum_variant(signature: &FunctionSignature) -> String {
    let fields = signature
        .arguments
        .iter()
        .map(|a| format!("{}: {}", a.name, a.type_text))
        .collect::<Vec<_>>()
        .join(", ");
    format!("    {} {{ {} }},\n", signature.name, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Argument;

    fn signature(name: &str, args: &[(&str, &str)]) -> FunctionSignature {
        FunctionSignature {
            name: name.to_string(),
            arguments: args.iter().map(|(n, t)| Argument::new(*n, *t)).collect(),
            return_type: None,
        }
    }

    #[test]
    fn call_uses_bare_names_in_order() {
        let sig = signature("compute", &[("width", "u32"), ("label", "&str")]);
        assert_eq!(
            call_expression("simple", &sig),
            "simple!(self.compute(width, label))"
        );
    }

    #[test]
    fn zero_arguments() {
        let sig = signature("flush", &[]);
        assert_eq!(call_expression("simple", &sig), "simple!(self.flush())");
        assert_eq!(enum_variant(&sig), "    flush {  },\n");
    }

    #[test]
    fn variant_keeps_types_verbatim() {
        let sig = signature("fill", &[("buf", "&mut Vec<u8>"), ("n", "usize")]);
        assert_eq!(enum_variant(&sig), "    fill { buf: &mut Vec<u8>, n: usize },\n");
    }
}
