#[macro_export]
macro_rules! impl_string_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }
    };
}

#[macro_export]
macro_rules! impl_scalar_newtype {
    ($name:ident, $inner:ty) => {
        impl $name {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}
