/// A single model field cell.
///
/// The wire protocol distinguishes three states, so a plain `Option<T>` is not
/// enough:
/// - `Unset`: the key is absent from the wire object
/// - `Null`: the key is present with an explicit `null`
/// - `Value(v)`: the key is present with a value
///
/// `Option<Option<T>>` converts losslessly in both directions (outer = presence,
/// inner = nullability).
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// `true` when the field will be emitted on the wire (either null or a value).
    pub fn is_present(&self) -> bool {
        !self.is_unset()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Field<U>, E> {
        Ok(match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)?),
        })
    }

    pub fn into_option_option(self) -> Option<Option<T>> {
        match self {
            Field::Unset => None,
            Field::Null => Some(None),
            Field::Value(v) => Some(Some(v)),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> From<Option<Option<T>>> for Field<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Field::Unset,
            Some(None) => Field::Null,
            Some(Some(v)) => Field::Value(v),
        }
    }
}

/// A plain `Option` maps `None` to `Null`: callers that use an `Option` are
/// explicitly setting the field.
impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Field::Null,
            Some(v) => Field::Value(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_option_round_trip_keeps_all_three_states() {
        for cell in [Field::Unset, Field::Null, Field::Value(7)] {
            let back: Field<i32> = cell.clone().into_option_option().into();
            assert_eq!(back, cell);
        }
    }

    #[test]
    fn plain_option_none_means_explicit_null() {
        let cell: Field<i32> = Option::<i32>::None.into();
        assert!(cell.is_null());
        assert!(cell.is_present());
    }
}
