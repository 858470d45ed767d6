//! Field module - explicit presence marker for schema columns

/// A schema column that is either present with a validated value or absent.
///
/// Every expected column of a record is carried as a `Field`, so downstream
/// stages have a total function over the schema. `Absent` is never equal to
/// any present value: `Field::Present(0.0)`, `Field::Present(String::new())`
/// and `Field::Absent` are three distinct states.
///
/// # Examples
///
/// ```
/// use docket_domain::Field;
///
/// let count: Field<f64> = Field::Present(2.0);
/// assert_eq!(count.map(|c| c * 2.0), Field::Present(4.0));
///
/// let missing: Field<f64> = Field::Absent;
/// assert!(missing.is_absent());
/// assert_ne!(missing, Field::Present(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Value was supplied and passed validation
    Present(T),

    /// Value was missing or explicitly null at the boundary
    Absent,
}

impl<T> Field<T> {
    /// Whether the field carries a value
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Whether the field is the absent marker
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Borrow the inner value, if any
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }

    /// Convert `&Field<T>` into `Field<&T>`
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Present(value) => Field::Present(value),
            Field::Absent => Field::Absent,
        }
    }

    /// Transform the present value, leaving `Absent` untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Present(value) => Field::Present(f(value)),
            Field::Absent => Field::Absent,
        }
    }

    /// Fallible transform of the present value
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Field<U>, E> {
        match self {
            Field::Present(value) => f(value).map(Field::Present),
            Field::Absent => Ok(Field::Absent),
        }
    }

    /// Unwrap the present value or fall back to `default`
    pub fn present_or(self, default: T) -> T {
        match self {
            Field::Present(value) => value,
            Field::Absent => default,
        }
    }

    /// Convert into an `Option`, mapping `Absent` to `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        }
    }
}
