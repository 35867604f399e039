//! Domain names.
//!
//! This module provides [`Name`], the type for absolute domain names,
//! together with everything needed to create, inspect, and compare
//! such names.
//!
//! A domain name is a sequence of *labels* of up to 63 octets each,
//! ending in the empty *root label*. In wire format every label is
//! preceded by a length octet and the whole name may not be longer than
//! 255 octets. In presentation format labels are separated by dots and
//! unusual octets are escaped with a backslash. [`Name`] can be created
//! from and converted into both formats, and provides the structural
//! operations — splitting, reversing, concatenating, case folding —
//! used when processing zones.
//!
//! Comparing names happens label by label starting from the root, with
//! ASCII case ignored. This is the canonical DNS name order defined for
//! DNSSEC in [RFC 4034]; [`Name::compare`] exposes the full outcome of
//! such a comparison as a [`NameComparisonResult`] including the
//! hierarchical [`NameRelation`] between the two names.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

mod absolute;
mod builder;
mod compare;
mod label;

pub use self::absolute::{
    FromWireError, LongNameError, Name, NameIter, OutOfRange,
};
pub use self::builder::{FromTextError, NameBuilder, PushError};
pub use self::compare::{NameComparisonResult, NameRelation};
pub use self::label::{Label, LongLabelError};
