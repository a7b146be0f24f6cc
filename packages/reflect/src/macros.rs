/// Implement `Record` and `Reflect` for a struct.
///
/// Each entry maps a declared field name to the Rust field that holds it.
/// Declared names are what queries see, after case folding, so they are
/// usually written capitalized:
///
/// ```rust
/// use dql_reflect::{reflect_record, ReflectNodeSetExt};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// reflect_record!(Point { "X" => x, "Y" => y });
///
/// let p = Point { x: 1, y: 2 };
/// let set = dql_reflect::nodes(&p);
/// assert_eq!(set.attr_value("x").unwrap(), dql_reflect::Value::Integer(1));
/// ```
///
/// Fields are reported in the order written here.
#[macro_export]
macro_rules! reflect_record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields(&self) -> $crate::Fields<'_> {
                let fields: ::std::vec::Vec<(&'static str, &dyn $crate::Reflect)> =
                    ::std::vec![$(($name, &self.$field as &dyn $crate::Reflect)),*];
                ::std::boxed::Box::new(fields.into_iter())
            }

            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::Reflect> {
                match name {
                    $($name => ::std::option::Option::Some(&self.$field as &dyn $crate::Reflect),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl $crate::Reflect for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::record(self)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::record_value(self)
            }
        }
    };
}
