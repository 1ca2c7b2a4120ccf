use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use time::OffsetDateTime;

pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> Clone for CreatedAt<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CreatedAt<T> {}

impl<T> PartialEq for CreatedAt<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for CreatedAt<T> {}

impl<T> Debug for CreatedAt<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CreatedAt").field(&self.0).finish()
    }
}

impl<T> AsRef<OffsetDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for OffsetDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}
