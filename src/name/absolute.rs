//! Absolute domain names.
//!
//! This is a private module. Its public types are re-exported by the
//! parent module.

use core::cmp::Ordering;
use core::str::FromStr;
use core::{cmp, fmt, hash, ops};
use derive_more::Display;
use crate::compose::ComposeTarget;
use crate::parse::{Parser, ShortBuf};
use super::builder::{FromTextError, NameBuilder};
use super::compare::{NameComparisonResult, NameRelation};
use super::label::Label;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The type holds a correctly encoded, absolute domain name: a sequence
/// of labels in wire format, i.e., each preceded by its length octet,
/// ending in the empty root label. Alongside the octets it keeps the
/// position of each label so that labels can be addressed by their
/// index, with index 0 being the left-most, most specific label and the
/// last index the root label.
///
/// Names can be created by parsing presentation format via
/// [`from_text`] or the `FromStr` impl, by decoding wire format via
/// [`from_wire`] or [`from_slice`], through a [`NameBuilder`], or by
/// deriving them from existing names via [`split`], [`reverse`], and
/// [`concatenate`]. All constructors enforce the DNS limits: no more
/// than 255 octets of wire data, no more than 63 octets per label.
///
/// All comparisons between names — [`compare`] as well as the ordinary
/// comparison operators and `Hash` — ignore ASCII case and follow the
/// canonical DNS name order of [RFC 4034].
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
/// [`compare`]: Self::compare
/// [`concatenate`]: Self::concatenate
/// [`from_slice`]: Self::from_slice
/// [`from_text`]: Self::from_text
/// [`from_wire`]: Self::from_wire
/// [`reverse`]: Self::reverse
/// [`split`]: Self::split
#[derive(Clone)]
pub struct Name {
    /// The name in wire format, ending in the root label.
    octets: Vec<u8>,

    /// The position of each label in `octets`.
    ///
    /// The positions are strictly increasing and the last one is the
    /// position of the root label.
    offsets: Vec<u8>,
}

/// # Limits and wire format constants
///
impl Name {
    /// The maximum length of a name in wire format.
    pub const MAX_WIRE: usize = 255;

    /// The maximum number of labels of a name, including the root label.
    pub const MAX_LABELS: usize = 128;

    /// The maximum length of a single label.
    pub const MAX_LABELLEN: usize = 63;

    /// The largest message offset a compression pointer can carry.
    pub const MAX_COMPRESS_POINTER: u16 = 0x3FFF;

    /// The two top bits marking a compression pointer in a length octet.
    pub const COMPRESS_POINTER_MARK8: u8 = 0xC0;

    /// The compression pointer marker in a full 16 bit pointer.
    pub const COMPRESS_POINTER_MARK16: u16 = 0xC000;
}

/// # Creation
///
impl Name {
    /// Creates a name from its buffer and label positions.
    ///
    /// The caller has to provide a buffer that is a correctly encoded
    /// absolute name together with the matching label positions.
    pub(super) fn from_parts(octets: Vec<u8>, offsets: Vec<u8>) -> Self {
        debug_assert!(octets.len() <= Self::MAX_WIRE);
        debug_assert!(offsets.len() <= Self::MAX_LABELS);
        debug_assert_eq!(octets.last(), Some(&0));
        debug_assert_eq!(
            offsets.last().copied(),
            Some((octets.len() - 1) as u8)
        );
        Name { octets, offsets }
    }

    /// Returns a name consisting of the root label only.
    pub fn root() -> Self {
        Name {
            octets: vec![0],
            offsets: vec![0],
        }
    }

    /// Creates a name from its presentation format.
    ///
    /// The labels of the name are separated by dots. An actual dot,
    /// backslash, or space within a label has to be escaped by a
    /// preceding backslash, and any octet value can be given as a
    /// backslash followed by its three digit decimal value. A trailing
    /// dot is allowed but not required; the root label is appended
    /// either way. The string `"."` results in the root name.
    ///
    /// If `downcase` is true, ASCII letters are folded to lowercase as
    /// the labels are stored.
    pub fn from_text(
        text: &str,
        downcase: bool,
    ) -> Result<Self, FromTextError> {
        if text.is_empty() {
            return Err(FromTextError::IncompleteName);
        }
        if text == "." {
            return Ok(Self::root());
        }
        let mut builder = NameBuilder::with_capacity(text.len() + 1);
        builder.append_text(text, downcase)?;
        Ok(builder.into_name())
    }

    /// Takes a name from the beginning of a wire-format parser.
    ///
    /// Reads length-prefixed labels starting at the parser's current
    /// position until the root label terminates the name. On success
    /// the parser is positioned right after the root label. On error
    /// the parser's position is undefined.
    ///
    /// Compression pointers are not followed: a length octet with the
    /// [`COMPRESS_POINTER_MARK8`][Self::COMPRESS_POINTER_MARK8] bits
    /// set is reported as [`FromWireError::FormErr`], as is any other
    /// reserved label type. Running out of data results in
    /// [`FromWireError::InvalidBufferPosition`].
    ///
    /// If `downcase` is true, ASCII letters are folded to lowercase as
    /// the labels are stored.
    pub fn from_wire<T: AsRef<[u8]>>(
        parser: &mut Parser<T>,
        downcase: bool,
    ) -> Result<Self, FromWireError> {
        let mut octets = Vec::new();
        let mut offsets = Vec::new();
        loop {
            let head = parser.parse_u8()?;
            if head == 0 {
                offsets.push(octets.len() as u8);
                octets.push(0);
                break;
            }
            if head & Self::COMPRESS_POINTER_MARK8
                == Self::COMPRESS_POINTER_MARK8
            {
                // A compression pointer. Names read through this
                // interface have to be pointer free.
                return Err(FromWireError::FormErr);
            }
            let len = usize::from(head);
            if len > Self::MAX_LABELLEN {
                // The reserved label types.
                return Err(FromWireError::FormErr);
            }
            if octets.len() + len + 2 > Self::MAX_WIRE {
                return Err(FromWireError::TooLongName);
            }
            offsets.push(octets.len() as u8);
            octets.push(head);
            let start = octets.len();
            octets.resize(start + len, 0);
            parser.parse_buf(&mut octets[start..])?;
            if downcase {
                octets[start..].make_ascii_lowercase();
            }
        }
        Ok(Name { octets, offsets })
    }

    /// Creates a name from a slice containing its complete wire format.
    ///
    /// This will only succeed if the slice contains exactly one
    /// correctly encoded absolute name. Trailing octets are reported
    /// as [`FromWireError::FormErr`].
    pub fn from_slice(slice: &[u8]) -> Result<Self, FromWireError> {
        let mut parser = Parser::from_ref(slice);
        let name = Self::from_wire(&mut parser, false)?;
        if parser.remaining() != 0 {
            return Err(FromWireError::FormErr);
        }
        Ok(name)
    }
}

/// # Conversion
///
impl Name {
    /// Returns a reference to the wire format of the name.
    pub fn as_slice(&self) -> &[u8] {
        &self.octets
    }

    /// Returns the length of the name in wire format.
    ///
    /// This is never zero and never more than
    /// [`MAX_WIRE`][Self::MAX_WIRE].
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Appends the wire format of the name to a compose target.
    ///
    /// Returns the number of octets appended to the target. If the
    /// target performs name compression, this may be less than
    /// [`len`][Self::len].
    pub fn to_wire<T: ComposeTarget + ?Sized>(
        &self,
        target: &mut T,
    ) -> usize {
        target.append_name(self)
    }

    /// Returns the presentation format of the name.
    ///
    /// The returned string always ends in a dot for the root label;
    /// parsing it back via [`from_text`][Self::from_text] yields the
    /// name it was produced from.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// # Properties and labels
///
impl Name {
    /// Returns whether the name is the root label only.
    pub fn is_root(&self) -> bool {
        self.octets.len() == 1
    }

    /// Returns whether the name is a wildcard name.
    ///
    /// A wildcard name is a name whose left-most label is exactly the
    /// single character `*`.
    pub fn is_wildcard(&self) -> bool {
        self.first().is_wildcard()
    }

    /// Returns the number of labels in the name.
    ///
    /// The root label counts, so this is at least 1.
    pub fn label_count(&self) -> usize {
        self.offsets.len()
    }

    /// Returns a reference to the first, most specific label.
    ///
    /// For the root name this is the root label itself.
    pub fn first(&self) -> &Label {
        self.label(0)
    }

    /// Returns an iterator over the labels of the name.
    pub fn iter(&self) -> NameIter {
        NameIter {
            name: self,
            range: 0..self.label_count(),
        }
    }

    /// Returns the wire-format octet at the given position.
    ///
    /// Positions at or beyond [`len`][Self::len] result in an error.
    pub fn at(&self, pos: usize) -> Result<u8, OutOfRange> {
        self.octets.get(pos).copied().ok_or(OutOfRange)
    }

    /// Returns the label with the given index.
    fn label(&self, index: usize) -> &Label {
        let start = usize::from(self.offsets[index]);
        let len = usize::from(self.octets[start]);
        unsafe {
            Label::from_slice_unchecked(
                &self.octets[start + 1..start + 1 + len],
            )
        }
    }
}

/// # Comparison
///
impl Name {
    /// Compares the name with another name under the canonical order.
    ///
    /// Names are compared label by label, starting with the root label
    /// and proceeding towards the most specific label, with ASCII case
    /// ignored. Within a label octets compare by value and a label that
    /// is a strict prefix of another label sorts before it. This is the
    /// canonical DNS name order defined in
    /// [section 6.1 of RFC 4034][RFC4034-6.1].
    ///
    /// Besides the ordering, the returned [`NameComparisonResult`]
    /// reports how many labels the names share counted from the root
    /// and how the names relate hierarchically: whether one is an
    /// ancestor of the other, they are equal, or they merely share a
    /// common ancestor.
    ///
    /// The comparison operators of `PartialOrd`, `Ord`, and `PartialEq`
    /// are all derived from this comparison and agree with its order.
    ///
    /// [RFC4034-6.1]: https://tools.ietf.org/html/rfc4034#section-6.1
    pub fn compare(&self, other: &Name) -> NameComparisonResult {
        let left = self.label_count();
        let right = other.label_count();
        let mut common = 0;
        for i in 1..=cmp::min(left, right) {
            match self.label(left - i).cmp(other.label(right - i)) {
                Ordering::Equal => common += 1,
                order => {
                    return NameComparisonResult::new(
                        order,
                        common,
                        NameRelation::CommonAncestor,
                    )
                }
            }
        }
        let (order, relation) = match left.cmp(&right) {
            Ordering::Less => (Ordering::Less, NameRelation::SuperDomain),
            Ordering::Equal => (Ordering::Equal, NameRelation::Equal),
            Ordering::Greater => {
                (Ordering::Greater, NameRelation::SubDomain)
            }
        };
        NameComparisonResult::new(order, common, relation)
    }
}

/// # Structural operations
///
impl Name {
    /// Returns a new name made of `count` labels starting at `first`.
    ///
    /// Label index 0 is the left-most, most specific label. If the
    /// root label is not within the requested range, it is appended so
    /// that the result is an absolute name again.
    ///
    /// Requesting zero labels or labels beyond the end of the name
    /// results in an error.
    pub fn split(
        &self,
        first: usize,
        count: usize,
    ) -> Result<Name, OutOfRange> {
        let labels = self.label_count();
        if count == 0 || first >= labels || count > labels - first {
            return Err(OutOfRange);
        }
        let start = usize::from(self.offsets[first]);
        let end = match self.offsets.get(first + count) {
            Some(&end) => usize::from(end),
            None => self.octets.len(),
        };
        let mut octets = self.octets[start..end].to_vec();
        let mut offsets: Vec<u8> = self.offsets[first..first + count]
            .iter()
            .map(|&pos| pos - start as u8)
            .collect();
        if first + count < labels {
            // The root label was not part of the range.
            offsets.push(octets.len() as u8);
            octets.push(0);
        }
        Ok(Name { octets, offsets })
    }

    /// Returns a new name with the order of the labels reversed.
    ///
    /// The root label stays at the end: reversing `www.example.com.`
    /// yields `com.example.www.`. Reversing the root name yields the
    /// root name.
    pub fn reverse(&self) -> Name {
        if self.is_root() {
            return self.clone();
        }
        let mut octets = Vec::with_capacity(self.octets.len());
        let mut offsets = Vec::with_capacity(self.offsets.len());
        for index in (0..self.label_count() - 1).rev() {
            let label = self.label(index);
            offsets.push(octets.len() as u8);
            octets.push(label.len() as u8);
            octets.extend_from_slice(label.as_slice());
        }
        offsets.push(octets.len() as u8);
        octets.push(0);
        Name { octets, offsets }
    }

    /// Returns a new name with `other` appended in place of the root.
    ///
    /// The result consists of all of this name's labels except its
    /// root label, followed by the entirety of `other`. If the
    /// combined name would exceed [`MAX_WIRE`][Self::MAX_WIRE] octets,
    /// an error is returned.
    pub fn concatenate(&self, other: &Name) -> Result<Name, LongNameError> {
        let prefix = self.octets.len() - 1;
        if prefix + other.octets.len() > Self::MAX_WIRE {
            return Err(LongNameError);
        }
        let mut octets = Vec::with_capacity(prefix + other.octets.len());
        octets.extend_from_slice(&self.octets[..prefix]);
        octets.extend_from_slice(&other.octets);
        let mut offsets =
            Vec::with_capacity(self.offsets.len() - 1 + other.offsets.len());
        offsets.extend_from_slice(&self.offsets[..self.offsets.len() - 1]);
        offsets.extend(other.offsets.iter().map(|&pos| pos + prefix as u8));
        Ok(Name { octets, offsets })
    }

    /// Folds all ASCII letters of the name to lowercase, in place.
    ///
    /// Returns a reference to the name itself so folding can be chained
    /// with other operations.
    pub fn downcase(&mut self) -> &mut Self {
        // Length octets are at most 63 and thus below b'A'; folding the
        // whole buffer only ever touches label content.
        self.octets.make_ascii_lowercase();
        self
    }
}

//--- Default

impl Default for Name {
    /// Returns the root name.
    fn default() -> Self {
        Self::root()
    }
}

//--- FromStr

impl FromStr for Name {
    type Err = FromTextError;

    /// Parses a string into an absolute domain name.
    ///
    /// Equivalent to [`Name::from_text`] without case folding: the
    /// string is taken to be an absolute name whether it ends in a dot
    /// or not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, false)
    }
}

//--- PartialEq and Eq

impl PartialEq for Name {
    /// Tests equality ignoring ASCII case.
    fn eq(&self, other: &Self) -> bool {
        self.octets.eq_ignore_ascii_case(&other.octets)
    }
}

impl Eq for Name {}

//--- PartialOrd and Ord

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// Returns the ordering between `self` and `other`.
    ///
    /// Domain name order is determined according to the 'canonical DNS
    /// name order' as defined in
    /// [section 6.1 of RFC 4034][RFC4034-6.1]. This is the order field
    /// of [`Name::compare`].
    ///
    /// [RFC4034-6.1]: https://tools.ietf.org/html/rfc4034#section-6.1
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).order()
    }
}

//--- Hash

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for label in self.iter() {
            label.hash(state)
        }
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Label;
    type IntoIter = NameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    /// Formats the name in presentation format.
    ///
    /// Every label is followed by a dot, including the last one before
    /// the root label, so the output always ends in a dot and the root
    /// name is formatted as a single dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.iter() {
            if !label.is_root() {
                write!(f, "{}.", label)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    /// Serializes the name in presentation format.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl<'de> serde::de::Visitor<'de> for NameVisitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name in presentation format")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Name, E> {
                Name::from_text(v, false).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

//------------ NameIter ------------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct NameIter<'a> {
    name: &'a Name,
    range: ops::Range<usize>,
}

impl<'a> Iterator for NameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|index| self.name.label(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a> DoubleEndedIterator for NameIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|index| self.name.label(index))
    }
}

impl<'a> ExactSizeIterator for NameIter<'a> {}

//------------ FromWireError -------------------------------------------------

/// An error happened while decoding a wire-format name.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FromWireError {
    /// The data ended before the name was terminated by the root label.
    #[display(fmt = "invalid buffer position")]
    InvalidBufferPosition,

    /// An unsupported wire encoding was encountered.
    ///
    /// This covers compression pointers, which are not followed when
    /// decoding through this interface, as well as the reserved label
    /// types.
    #[display(fmt = "message format error")]
    FormErr,

    /// The name exceeds the limit of 255 octets.
    #[display(fmt = "long domain name")]
    TooLongName,
}

impl std::error::Error for FromWireError {}

impl From<ShortBuf> for FromWireError {
    fn from(_: ShortBuf) -> FromWireError {
        FromWireError::InvalidBufferPosition
    }
}

//------------ LongNameError -------------------------------------------------

/// A name operation would have exceeded the limit of 255 octets.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display(fmt = "long domain name")]
pub struct LongNameError;

impl std::error::Error for LongNameError {}

//------------ OutOfRange ----------------------------------------------------

/// An index into a name was outside its valid range.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display(fmt = "index out of range")]
pub struct OutOfRange;

impl std::error::Error for OutOfRange {}

//============ Testing =======================================================
