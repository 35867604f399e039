//! A library for DNS domain names.
//!
//! This crate provides the domain name value type used when processing
//! DNS data: parsing names from their dotted presentation format or from
//! the length-prefixed wire format of a DNS packet, converting them back
//! to either form, and comparing them under the canonical DNS name order
//! used for DNSSEC and zone processing.
//!
//! The main type is [`Name`] in the [name] module. It always represents
//! an absolute name, i.e., one that ends in the root label, and it always
//! stays within the limits the DNS imposes on names: 255 octets of wire
//! data and 63 octets per label.
//!
//! Reading from and writing to wire-format data happens through two small
//! abstractions: the [`Parser`] in the [parse] module is a cursor over an
//! octet sequence, while the [`ComposeTarget`] trait in the [compose]
//! module describes a buffer that wire data can be appended to. A message
//! renderer that performs name compression can plug in via
//! [`ComposeTarget::append_name`].
//!
//! [`ComposeTarget`]: compose::ComposeTarget
//! [`ComposeTarget::append_name`]: compose::ComposeTarget::append_name
//! [`Name`]: name::Name
//! [`Parser`]: parse::Parser

pub mod compose;
pub mod name;
pub mod parse;

pub use self::compose::ComposeTarget;
pub use self::name::{Name, NameComparisonResult, NameRelation};
pub use self::parse::Parser;
