//! Error taxonomy shared by the map, its views and their iterators.

use core::fmt;
use snafu::Snafu;

/// Which of the three live views an argument or receiver is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ViewKind {
    Keys,
    Values,
    Entries,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Keys => "key view",
            ViewKind::Values => "value view",
            ViewKind::Entries => "entry view",
        })
    }
}

/// Contract violations. Every failure is reported before the store is
/// touched, so an `Err` never leaves a partial mutation behind.
#[derive(Debug, Clone, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("null {what} is not allowed"))]
    NullArgument { what: &'static str },

    #[snafu(display("invalid argument: {details}"))]
    InvalidArgument { details: String },

    #[snafu(display("expected an element of the {expected}, found one of the {found}"))]
    TypeMismatch { expected: ViewKind, found: ViewKind },

    #[snafu(display("{operation} is not supported on a map view"))]
    UnsupportedOperation { operation: &'static str },

    #[snafu(display("iterator has no more elements"))]
    NoSuchElement,

    #[snafu(display("remove() requires a preceding successful next()"))]
    IllegalIteratorState,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
