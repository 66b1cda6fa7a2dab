//! Trait plumbing shared by validated string newtypes

/// Implement the string conversions every validated newtype exposes.
///
/// The type must provide `fn new(raw: impl Into<String>) -> Result<Self, $err>`
/// and store the original string in `$field`. Serde support comes from
/// `#[serde(try_from = "String", into = "String")]` on the type itself, which
/// routes decoding through the same constructor.
macro_rules! impl_validated_string {
    ($($ty:ident . $field:tt => $err:ty),* $(,)?) => {
        $(
            impl $ty {
                /// The validated string, exactly as supplied
                pub fn as_str(&self) -> &str {
                    &self.$field
                }
            }

            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&self.$field)
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    &self.$field
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.$field
                }
            }

            impl TryFrom<String> for $ty {
                type Error = $err;

                fn try_from(value: String) -> ::std::result::Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl TryFrom<&str> for $ty {
                type Error = $err;

                fn try_from(value: &str) -> ::std::result::Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl ::std::str::FromStr for $ty {
                type Err = $err;

                fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                    Self::new(s)
                }
            }
        )*
    };
}

/// Declare a closed set of protocol values with fixed wire names.
///
/// Generates the enum with serde renames plus `ALL`, `as_str`, `Display` and a
/// `FromStr` that rejects anything outside the set with
/// [`ValidationError::UnknownValue`](crate::error::ValidationError::UnknownValue).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Wire name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)*
                    other => Err($crate::error::ValidationError::UnknownValue {
                        type_name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Declare unit types that stand for exactly one string on the wire.
///
/// Decoding any other string fails with
/// [`ValidationError::IncorrectValue`](crate::error::ValidationError::IncorrectValue);
/// encoding always writes the literal.
macro_rules! literal_marker {
    ($($(#[$meta:meta])* $name:ident => $value:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl $name {
                /// The only accepted value
                pub const VALUE: &'static str = $value;

                /// Accept `found` only if it equals [`Self::VALUE`]
                ///
                /// # Errors
                ///
                /// Returns [`ValidationError::IncorrectValue`](crate::error::ValidationError::IncorrectValue) otherwise.
                pub fn check(found: &str) -> ::std::result::Result<Self, $crate::error::ValidationError> {
                    if found == Self::VALUE {
                        Ok(Self)
                    } else {
                        Err($crate::error::ValidationError::IncorrectValue {
                            expected: Self::VALUE,
                            found: found.to_string(),
                        })
                    }
                }

                /// The literal
                pub fn as_str(&self) -> &'static str {
                    Self::VALUE
                }
            }

            impl ::serde::Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                where
                    S: ::serde::Serializer,
                {
                    serializer.serialize_str(Self::VALUE)
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    let found = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                    Self::check(&found).map_err(::serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use impl_validated_string;
pub(crate) use literal_marker;
pub(crate) use wire_enum;
