/// Type-state markers for the builder pattern
///
/// These types are used to track which fields have been set
/// in the builder at compile-time, preventing invalid configurations.
use std::marker::PhantomData;

/// Marker trait for URL state
pub trait UrlState {}

/// URL has not been set
pub struct NoUrl;
impl UrlState for NoUrl {}

/// URL has been set
pub struct HasUrl;
impl UrlState for HasUrl {}

/// Marker trait for Parser state
pub trait ParserState {}

/// Parser has not been set
pub struct NoParser;
impl ParserState for NoParser {}

/// Parser has been set
pub struct HasParser;
impl ParserState for HasParser {}

/// Phantom marker to prevent direct construction
#[derive(Debug, Clone, Copy)]
pub struct TypeState<U, P> {
    _url: PhantomData<U>,
    _parser: PhantomData<P>,
}

impl<U, P> TypeState<U, P> {
    pub(crate) fn new() -> Self {
        Self {
            _url: PhantomData,
            _parser: PhantomData,
        }
    }
}

impl<U, P> Default for TypeState<U, P> {
    fn default() -> Self {
        Self::new()
    }
}
