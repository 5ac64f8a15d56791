//! Element kinds for kernel coefficients and filtered values

use std::fmt::{self, Debug, Display};

use num_traits::{Float, Num, NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Closed set of element kinds a kernel coefficient or array cell can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ElementKind {
    /// Whether this is a floating point kind
    pub fn is_float(self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }

    /// Rust name of the kind
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Bool => "bool",
            ElementKind::I8 => "i8",
            ElementKind::I16 => "i16",
            ElementKind::I32 => "i32",
            ElementKind::I64 => "i64",
            ElementKind::U8 => "u8",
            ElementKind::U16 => "u16",
            ElementKind::U32 => "u32",
            ElementKind::U64 => "u64",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How boolean mask coefficients are encoded into a numeric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaskEncoding {
    /// `true -> 0`, `false -> -inf`: additive structuring function for
    /// morphology. Floating point kinds only.
    #[default]
    Flat,
    /// `true -> 1`, `false -> 0`: multiplicative weight for linear filters.
    Indicator,
}

/// Trait for types that can be stored as kernel coefficients.
///
/// Implemented for `bool` and every numeric primitive. Conversions between
/// kinds go through this trait so that they are written once for the whole
/// closed set of kinds.
pub trait Coefficient: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Kind tag of this type
    const KIND: ElementKind;

    /// Build a value of this kind from any numeric value.
    ///
    /// Returns `None` for `bool` and for values not representable here.
    fn from_number<N: ToPrimitive>(n: N) -> Option<Self>;

    /// Convert this value to another coefficient kind, `None` if no
    /// numeric conversion exists.
    fn cast<U: Coefficient>(self) -> Option<U>;

    /// Boolean flag carried by this value (`None` for numeric kinds).
    fn as_flag(self) -> Option<bool>;

    /// Encode a mask flag into this kind.
    fn from_flag(flag: bool, encoding: MaskEncoding) -> Option<Self>;
}

impl Coefficient for bool {
    const KIND: ElementKind = ElementKind::Bool;

    fn from_number<N: ToPrimitive>(_n: N) -> Option<Self> {
        None
    }

    fn cast<U: Coefficient>(self) -> Option<U> {
        None
    }

    fn as_flag(self) -> Option<bool> {
        Some(self)
    }

    fn from_flag(flag: bool, _encoding: MaskEncoding) -> Option<Self> {
        Some(flag)
    }
}

/// Numeric cell values: every primitive integer and float.
///
/// Any numeric kind can be a filter's source; filters compute in a
/// [`FloatElement`] kind that the source widens into.
pub trait Numeric: Coefficient + Num + NumCast + PartialOrd {}

/// Floating point kinds a filter can work in.
pub trait FloatElement: Numeric + Float {}

macro_rules! impl_numeric_int {
    ($t:ty, $kind:ident) => {
        impl Coefficient for $t {
            const KIND: ElementKind = ElementKind::$kind;

            fn from_number<N: ToPrimitive>(n: N) -> Option<Self> {
                <$t as NumCast>::from(n)
            }

            fn cast<U: Coefficient>(self) -> Option<U> {
                U::from_number(self)
            }

            fn as_flag(self) -> Option<bool> {
                None
            }

            fn from_flag(flag: bool, encoding: MaskEncoding) -> Option<Self> {
                match encoding {
                    MaskEncoding::Indicator => Some(if flag { 1 } else { 0 }),
                    MaskEncoding::Flat => None,
                }
            }
        }

        impl Numeric for $t {}
    };
}

macro_rules! impl_numeric_float {
    ($t:ty, $kind:ident) => {
        impl Coefficient for $t {
            const KIND: ElementKind = ElementKind::$kind;

            fn from_number<N: ToPrimitive>(n: N) -> Option<Self> {
                <$t as NumCast>::from(n)
            }

            fn cast<U: Coefficient>(self) -> Option<U> {
                U::from_number(self)
            }

            fn as_flag(self) -> Option<bool> {
                None
            }

            fn from_flag(flag: bool, encoding: MaskEncoding) -> Option<Self> {
                Some(match (encoding, flag) {
                    (MaskEncoding::Flat, true) => 0.0,
                    (MaskEncoding::Flat, false) => <$t>::NEG_INFINITY,
                    (MaskEncoding::Indicator, true) => 1.0,
                    (MaskEncoding::Indicator, false) => 0.0,
                })
            }
        }

        impl Numeric for $t {}

        impl FloatElement for $t {}
    };
}

impl_numeric_int!(i8, I8);
impl_numeric_int!(i16, I16);
impl_numeric_int!(i32, I32);
impl_numeric_int!(i64, I64);
impl_numeric_int!(u8, U8);
impl_numeric_int!(u16, U16);
impl_numeric_int!(u32, U32);
impl_numeric_int!(u64, U64);
impl_numeric_float!(f32, F32);
impl_numeric_float!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(<bool as Coefficient>::KIND, ElementKind::Bool);
        assert_eq!(<u16 as Coefficient>::KIND, ElementKind::U16);
        assert_eq!(<f32 as Coefficient>::KIND, ElementKind::F32);
        assert!(ElementKind::F64.is_float());
        assert!(!ElementKind::I64.is_float());
        assert_eq!(ElementKind::U8.to_string(), "u8");
    }

    #[test]
    fn test_numeric_cast() {
        assert_eq!(3i32.cast::<f64>(), Some(3.0));
        assert_eq!(2.5f64.cast::<u8>(), Some(2));
        assert_eq!((-1.0f64).cast::<u8>(), None);
        assert_eq!(300i32.cast::<u8>(), None);
        assert_eq!(1.0f64.cast::<bool>(), None);
        assert_eq!(true.cast::<f64>(), None);
    }

    #[test]
    fn test_flag_encodings() {
        assert_eq!(f64::from_flag(true, MaskEncoding::Flat), Some(0.0));
        assert_eq!(
            f32::from_flag(false, MaskEncoding::Flat),
            Some(f32::NEG_INFINITY)
        );
        assert_eq!(f64::from_flag(false, MaskEncoding::Indicator), Some(0.0));
        assert_eq!(i32::from_flag(true, MaskEncoding::Indicator), Some(1));
        assert_eq!(i32::from_flag(true, MaskEncoding::Flat), None);
        assert_eq!(bool::from_flag(false, MaskEncoding::Flat), Some(false));
    }
}
