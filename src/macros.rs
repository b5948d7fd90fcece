//! Accessor generation macros
//!
//! These macros eliminate repetitive match code on fieldless kind enums.
//! They use `paste` internally for identifier concatenation.

/// Generate `is_xxx` predicates for a fieldless enum
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool` - variant check
///
/// # Example
/// ```ignore
/// impl NodeKind {
///     impl_kind_predicates!(Scalar, Mapping);
///     // Expands to: pub const fn is_scalar(&self) -> bool { ... } etc.
/// }
/// ```
#[macro_export]
macro_rules! impl_kind_predicates {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " $variant " node"]
                #[inline]
                pub const fn [<is_ $variant:lower>](&self) -> bool {
                    matches!(self, Self::$variant)
                }
            )*
        }
    };
}

/// Generate `label(&self) -> &'static str` mapping each variant to a fixed string
///
/// # Example
/// ```ignore
/// impl_kind_labels!(Added => "added", Deleted => "deleted");
/// ```
#[macro_export]
macro_rules! impl_kind_labels {
    ($($variant:ident => $label:literal),* $(,)?) => {
        /// Stable lowercase label, used in reports and logs
        pub const fn label(&self) -> &'static str {
            match self {
                $(Self::$variant => $label,)*
            }
        }
    };
}
