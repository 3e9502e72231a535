//! `Record`: what a record type exposes so the mapper can persist it.
//!
//! Implemented by hand for full control, or generated with [`impl_record!`]
//! for a `Default` struct whose persisted fields are `Option<T>`.

use crate::descriptor::TypeDescriptor;
use crate::errors::RecordError;
use crate::types::{PrimitiveKind, Value};

/// A record type bound to a table.
pub trait Record: Sized {
    /// Field metadata and storage naming. Called once per gateway.
    fn descriptor() -> TypeDescriptor;

    /// Construct an empty instance with every field absent.
    fn instantiate() -> Result<Self, RecordError>;

    /// Current value of a field, `None` when absent.
    fn read_field(&self, identifier: &str) -> Option<Value>;

    /// Assign a field from a decoded value.
    fn write_field(&mut self, identifier: &str, value: Value) -> Result<(), RecordError>;
}

/// Rust types that map onto a primitive kind.
pub trait FieldValue: Sized {
    const KIND: PrimitiveKind;

    fn to_value(&self) -> Value;

    /// Unwrap a value of the matching kind, handing it back otherwise.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! field_value {
    ($ty:ty, $variant:ident) => {
        impl FieldValue for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$variant;

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

field_value!(String, Text);
field_value!(i32, Integer32);
field_value!(i64, Integer64);
field_value!(f64, Float64);
field_value!(Vec<u8>, Binary);

/// Implement [`Record`] for a `Default` struct with `Option<T>` fields.
///
/// ```
/// use rowmap_core::impl_record;
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: Option<i32>,
///     name: Option<String>,
/// }
///
/// impl_record!(User as "users" {
///     id: i32,
///     name: String as "user_name",
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident $(as $table:literal)? {
        $($field:ident : $fty:ty $(as $column:literal)?),* $(,)?
    }) => {
        impl $crate::traits::Record for $ty {
            fn descriptor() -> $crate::descriptor::TypeDescriptor {
                #[allow(unused_mut)]
                let mut builder = $crate::descriptor::TypeDescriptor::builder(stringify!($ty));
                $( builder = builder.table($table); )?
                $(
                    builder = builder.field(
                        $crate::descriptor::FieldDescriptor::new(
                            stringify!($field),
                            <$fty as $crate::traits::FieldValue>::KIND,
                        )
                        $( .column($column) )?
                    );
                )*
                builder.build()
            }

            fn instantiate() -> ::core::result::Result<Self, $crate::errors::RecordError> {
                Ok(<Self as ::core::default::Default>::default())
            }

            fn read_field(&self, identifier: &str) -> ::core::option::Option<$crate::types::Value> {
                match identifier {
                    $(
                        stringify!($field) => self
                            .$field
                            .as_ref()
                            .map(<$fty as $crate::traits::FieldValue>::to_value),
                    )*
                    _ => None,
                }
            }

            fn write_field(
                &mut self,
                identifier: &str,
                value: $crate::types::Value,
            ) -> ::core::result::Result<(), $crate::errors::RecordError> {
                match identifier {
                    $(
                        stringify!($field) => {
                            let actual = value.kind();
                            let v = <$fty as $crate::traits::FieldValue>::from_value(value)
                                .map_err(|_| $crate::errors::RecordError::KindMismatch {
                                    field: identifier.to_string(),
                                    expected: <$fty as $crate::traits::FieldValue>::KIND,
                                    actual,
                                })?;
                            self.$field = Some(v);
                            Ok(())
                        }
                    )*
                    _ => Err($crate::errors::RecordError::UnknownField {
                        type_name: stringify!($ty).to_string(),
                        field: identifier.to_string(),
                    }),
                }
            }
        }
    };
}
