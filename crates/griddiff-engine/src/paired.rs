//! Side-tagged optional pairs.
//!
//! A [`Paired`] holds up to two values of the same type, one for side [`Side::A`] and one for
//! side [`Side::B`]. It is the currency of every correspondence the engine produces: an aligned
//! pair of indices, an index present on one side only, or two halves of a mismatched cell.
//!
//! ```ignore
//! let p = Paired::of(1, 2);
//! assert!(p.is_paired());
//! assert_eq!(p.reverse(), Paired::of(2, 1));
//!
//! let only = Paired::only_a(7);
//! assert!(only.b().is_err());
//! assert_eq!(*only.b_or(&0), 0);
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::{EngineError, Result};

/// Which of the two compared sources a value belongs to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, A first.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// An immutable pair of optional values, compared and hashed by value.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Paired<T> {
    a: Option<T>,
    b: Option<T>,
}

impl<T> Paired<T> {
    /// Both sides present.
    pub fn of(a: T, b: T) -> Self {
        Paired {
            a: Some(a),
            b: Some(b),
        }
    }

    /// Only side A present.
    pub fn only_a(a: T) -> Self {
        Paired { a: Some(a), b: None }
    }

    /// Only side B present.
    pub fn only_b(b: T) -> Self {
        Paired { a: None, b: Some(b) }
    }

    /// Either side may be absent, including both.
    pub fn of_nullable(a: Option<T>, b: Option<T>) -> Self {
        Paired { a, b }
    }

    pub fn a(&self) -> Result<&T> {
        self.a.as_ref().ok_or(EngineError::NotFound(Side::A))
    }

    pub fn b(&self) -> Result<&T> {
        self.b.as_ref().ok_or(EngineError::NotFound(Side::B))
    }

    /// The value on `side`, or [`EngineError::NotFound`] if that side is absent.
    pub fn get(&self, side: Side) -> Result<&T> {
        match side {
            Side::A => self.a(),
            Side::B => self.b(),
        }
    }

    pub fn a_opt(&self) -> Option<&T> {
        self.a.as_ref()
    }

    pub fn b_opt(&self) -> Option<&T> {
        self.b.as_ref()
    }

    pub fn get_opt(&self, side: Side) -> Option<&T> {
        match side {
            Side::A => self.a.as_ref(),
            Side::B => self.b.as_ref(),
        }
    }

    pub fn a_or<'s>(&'s self, other: &'s T) -> &'s T {
        self.a.as_ref().unwrap_or(other)
    }

    pub fn b_or<'s>(&'s self, other: &'s T) -> &'s T {
        self.b.as_ref().unwrap_or(other)
    }

    pub fn is_paired(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    pub fn is_only_a(&self) -> bool {
        self.a.is_some() && self.b.is_none()
    }

    pub fn is_only_b(&self) -> bool {
        self.a.is_none() && self.b.is_some()
    }

    pub fn is_only(&self, side: Side) -> bool {
        self.is_present(side) && !self.is_present(side.opposite())
    }

    pub fn is_present(&self, side: Side) -> bool {
        self.get_opt(side).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }

    pub fn as_ref(&self) -> Paired<&T> {
        Paired {
            a: self.a.as_ref(),
            b: self.b.as_ref(),
        }
    }

    /// Applies `f` to each present side; absent sides stay absent.
    pub fn map<U, F>(self, mut f: F) -> Paired<U>
    where
        F: FnMut(T) -> U,
    {
        Paired {
            a: self.a.map(&mut f),
            b: self.b.map(&mut f),
        }
    }

    /// Like [`Paired::map`], but `f` may itself decide a side is absent.
    pub fn flat_map<U, F>(self, mut f: F) -> Paired<U>
    where
        F: FnMut(T) -> Option<U>,
    {
        Paired {
            a: self.a.and_then(&mut f),
            b: self.b.and_then(&mut f),
        }
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Side, &T),
    {
        if let Some(a) = &self.a {
            f(Side::A, a);
        }
        if let Some(b) = &self.b {
            f(Side::B, b);
        }
    }

    /// Swaps the two sides.
    pub fn reverse(self) -> Self {
        Paired {
            a: self.b,
            b: self.a,
        }
    }

    pub fn into_options(self) -> (Option<T>, Option<T>) {
        (self.a, self.b)
    }
}

impl<T: fmt::Display> fmt::Display for Paired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        match &self.a {
            Some(a) => write!(f, "{}", a)?,
            None => write!(f, "-")?,
        }
        write!(f, ", ")?;
        match &self.b {
            Some(b) => write!(f, "{}", b)?,
            None => write!(f, "-")?,
        }
        write!(f, ")")
    }
}
