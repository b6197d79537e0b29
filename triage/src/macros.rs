/// Helper macro that implements [`Display`](std::fmt::Display) for an enum.
///
/// It will use [`serde`] to serialize the enum to a string, and then display that string,
/// so the displayed value is always the wire name of the variant.
#[macro_export]
macro_rules! enum_display_serde {
    ($name:ident) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match ::serde_json::to_value(self) {
                    Ok(::serde_json::Value::String(s)) => f.write_str(&s),
                    _ => Err(::std::fmt::Error),
                }
            }
        }
    };
}
