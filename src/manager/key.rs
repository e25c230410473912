use crate::KeyError;

/// The key argument of the [`Manager`](crate::Manager) operations.
///
/// A key is valid when it names exactly one stack. It can be built from a
/// name, from an optional name, or from a slice of optional names so callers
/// that collect keys loosely can pass them through and let the manager reject
/// the bad ones.
///
/// # Examples
/// ```
/// # use doundo::{Key, KeyError};
/// assert_eq!(Key::from("Stack1").name(), Ok("Stack1"));
/// assert_eq!(Key::from(&[Some("Stack1")]).name(), Ok("Stack1"));
/// assert_eq!(Key::from(None::<&str>).name(), Err(KeyError::Missing));
/// assert_eq!(Key::from(&[None, Some("B")]).name(), Err(KeyError::Arity(2)));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Key<'a> {
    /// No key at all.
    Missing,
    /// A single name.
    Name(&'a str),
    /// Any number of optional names.
    Parts(&'a [Option<&'a str>]),
}

impl<'a> Key<'a> {
    /// Returns the name if the key names exactly one stack.
    ///
    /// # Errors
    /// Returns [`KeyError::Missing`] if no name was given and
    /// [`KeyError::Arity`] if more than one part was given.
    pub fn name(self) -> Result<&'a str, KeyError> {
        match self {
            Key::Name(name) | Key::Parts(&[Some(name)]) => Ok(name),
            Key::Missing | Key::Parts(&[None]) | Key::Parts(&[]) => Err(KeyError::Missing),
            Key::Parts(parts) => Err(KeyError::Arity(parts.len())),
        }
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<Option<&'a str>> for Key<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(Key::Missing, Key::Name)
    }
}

impl<'a> From<&'a [Option<&'a str>]> for Key<'a> {
    fn from(parts: &'a [Option<&'a str>]) -> Self {
        Key::Parts(parts)
    }
}

impl<'a, const N: usize> From<&'a [Option<&'a str>; N]> for Key<'a> {
    fn from(parts: &'a [Option<&'a str>; N]) -> Self {
        Key::Parts(parts)
    }
}

impl<'a> From<Option<&'a [Option<&'a str>]>> for Key<'a> {
    fn from(parts: Option<&'a [Option<&'a str>]>) -> Self {
        parts.map_or(Key::Missing, Key::Parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        let name = String::from("Stack2");
        assert_eq!(Key::from(&name).name(), Ok("Stack2"));
        assert_eq!(Key::from(Some("Stack1")).name(), Ok("Stack1"));
        assert_eq!(Key::from(&[] as &[Option<&str>]).name(), Err(KeyError::Missing));
        assert_eq!(Key::from(&[None::<&str>]).name(), Err(KeyError::Missing));
        assert_eq!(Key::from(&[Some("A"), Some("B")]).name(), Err(KeyError::Arity(2)));
        assert_eq!(Key::from(None::<&[Option<&str>]>).name(), Err(KeyError::Missing));
    }
}
