//! Common utilities for connector service

/// Masking for secret values handed to connectors (shared secrets, security keys).
pub mod masking {
    use std::{fmt, marker::PhantomData};

    use serde::{Deserialize, Deserializer};

    /// Formatting strategy used by the [`Secret`] `Debug` implementation.
    pub trait Strategy<T> {
        fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    }

    /// Prints the type name of the wrapped value instead of the value.
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub enum WithType {}

    impl<T> Strategy<T> for WithType {
        fn fmt(_val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "*** {} ***", std::any::type_name::<T>())
        }
    }

    /// Value which is never printed through `Debug`.
    #[derive(Clone, PartialEq, Eq, Hash)]
    pub struct Secret<T, S = WithType> {
        inner: T,
        strategy: PhantomData<S>,
    }

    impl<T, S> Secret<T, S> {
        pub fn new(value: T) -> Self {
            Self {
                inner: value,
                strategy: PhantomData,
            }
        }
    }

    impl<T, S> From<T> for Secret<T, S> {
        fn from(value: T) -> Self {
            Self::new(value)
        }
    }

    impl<T: Default, S> Default for Secret<T, S> {
        fn default() -> Self {
            Self::new(T::default())
        }
    }

    impl<T, S: Strategy<T>> fmt::Debug for Secret<T, S> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            S::fmt(&self.inner, f)
        }
    }

    impl<'de, T: Deserialize<'de>, S> Deserialize<'de> for Secret<T, S> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            T::deserialize(deserializer).map(Self::new)
        }
    }

    pub trait ExposeInterface<T> {
        fn expose(self) -> T;
    }

    impl<T, S> ExposeInterface<T> for Secret<T, S> {
        fn expose(self) -> T {
            self.inner
        }
    }

    pub trait PeekInterface<T> {
        fn peek(&self) -> &T;
    }

    impl<T, S> PeekInterface<T> for Secret<T, S> {
        fn peek(&self) -> &T {
            &self.inner
        }
    }
}

pub use masking::{ExposeInterface, PeekInterface, Secret, Strategy, WithType};

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod ext_traits;

// Re-export commonly used items
pub use errors::{CryptoError, CustomResult, ParsingError};
