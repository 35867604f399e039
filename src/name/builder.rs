//! Building a domain name.
//!
//! This is a private module for tidiness. `NameBuilder` and its error
//! types are re-exported by the parent module.

use core::ops;
use derive_more::Display;
use super::absolute::Name;

/// The maximum length of the name under construction.
///
/// Since the root label still needs to be appended to make the name
/// absolute, this is one less than the maximum wire length.
const MAX_RELATIVE: usize = Name::MAX_WIRE - 1;

//------------ NameBuilder ---------------------------------------------------

/// Builds a domain name step by step by appending data.
///
/// The name builder is the most fundamental way to construct a new
/// domain name. It wraps an octet buffer and allows adding single
/// octets or entire labels while enforcing the label and name length
/// limits. Once all labels have been added, [`into_name`] appends the
/// root label and returns the finished [`Name`].
///
/// [`into_name`]: NameBuilder::into_name
#[derive(Clone, Default)]
pub struct NameBuilder {
    /// The buffer the name is built in, in wire format.
    octets: Vec<u8>,

    /// The start position of each finished or started label.
    offsets: Vec<u8>,

    /// The position in `octets` where the current label started.
    ///
    /// If this is `None` we currently do not have a label.
    head: Option<usize>,
}

impl NameBuilder {
    /// Creates a new, empty name builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty builder with a given buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NameBuilder {
            octets: Vec::with_capacity(capacity),
            offsets: Vec::new(),
            head: None,
        }
    }

    /// Returns whether there currently is a label under construction.
    ///
    /// This returns `false` if the name is still empty or if the last
    /// thing that happened was a call to [`end_label`][Self::end_label].
    pub fn in_label(&self) -> bool {
        self.head.is_some()
    }

    /// Pushes an octet to the end of the current label.
    ///
    /// Starts a new label if necessary. Returns an error if pushing the
    /// octet would exceed the size limits for labels or names.
    pub fn push(&mut self, ch: u8) -> Result<(), PushError> {
        let len = self.octets.len();
        if let Some(head) = self.head {
            if len - head > Name::MAX_LABELLEN {
                return Err(PushError::LongLabel);
            }
            if len >= MAX_RELATIVE {
                return Err(PushError::LongName);
            }
            self.octets.push(ch);
        } else {
            if len + 2 > MAX_RELATIVE {
                return Err(PushError::LongName);
            }
            self.head = Some(len);
            self.offsets.push(len as u8);
            self.octets.push(0);
            self.octets.push(ch);
        }
        Ok(())
    }

    /// Ends the current label.
    ///
    /// If there isn't a current label, does nothing.
    pub fn end_label(&mut self) {
        if let Some(head) = self.head {
            let len = self.octets.len() - head - 1;
            self.octets[head] = len as u8;
            self.head = None;
        }
    }

    /// Appends a byte slice as a complete label.
    ///
    /// If there currently is a label under construction, it will be
    /// ended before appending `label`. An empty slice is ignored.
    ///
    /// Returns an error if `label` exceeds the label size limit of 63
    /// octets or appending the label would exceed the name size limit.
    pub fn append_label(&mut self, label: &[u8]) -> Result<(), PushError> {
        if label.is_empty() {
            return Ok(());
        }
        if label.len() > Name::MAX_LABELLEN {
            return Err(PushError::LongLabel);
        }
        self.end_label();
        if self.octets.len() + label.len() + 1 > MAX_RELATIVE {
            return Err(PushError::LongName);
        }
        self.offsets.push(self.octets.len() as u8);
        self.octets.push(label.len() as u8);
        self.octets.extend_from_slice(label);
        Ok(())
    }

    /// Appends a name given in presentation format.
    ///
    /// The text's labels are separated by dots. An actual dot, backslash,
    /// or space within a label has to be escaped by a preceding
    /// backslash, and any other octet value can be given as a backslash
    /// followed by its three digit decimal value. If `downcase` is true,
    /// ASCII letters are folded to lowercase as they are stored.
    ///
    /// The final label is only ended if the text ended in a dot, which
    /// can be checked via [`in_label`][Self::in_label].
    pub fn append_text(
        &mut self,
        text: &str,
        downcase: bool,
    ) -> Result<(), FromTextError> {
        let mut bytes = text.bytes();
        while let Some(ch) = bytes.next() {
            match ch {
                b'.' => {
                    if !self.in_label() {
                        return Err(FromTextError::EmptyLabel);
                    }
                    self.end_label();
                }
                b'\\' => {
                    let ch = parse_escape(&mut bytes)?;
                    self.push_folded(ch, downcase)?;
                }
                _ => self.push_folded(ch, downcase)?,
            }
        }
        Ok(())
    }

    /// Pushes an octet, optionally folding ASCII letters to lowercase.
    fn push_folded(&mut self, ch: u8, downcase: bool) -> Result<(), PushError> {
        self.push(if downcase { ch.to_ascii_lowercase() } else { ch })
    }

    /// Appends the root label to the name and returns it as a [`Name`].
    ///
    /// If there currently is a label under construction, ends the label
    /// first. I.e., you don't have to call [`end_label`][Self::end_label]
    /// explicitly.
    pub fn into_name(mut self) -> Name {
        self.end_label();
        self.offsets.push(self.octets.len() as u8);
        self.octets.push(0);
        Name::from_parts(self.octets, self.offsets)
    }
}

//--- Deref and AsRef

impl ops::Deref for NameBuilder {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.octets.as_ref()
    }
}

impl AsRef<[u8]> for NameBuilder {
    fn as_ref(&self) -> &[u8] {
        self.octets.as_ref()
    }
}

//------------ Escape sequences ----------------------------------------------

/// Parses the contents of an escape sequence from `bytes`.
///
/// The backslash should already have been taken out of `bytes`. A
/// digit starts a three digit decimal octet value; anything else is
/// taken literally.
fn parse_escape<I: Iterator<Item = u8>>(
    bytes: &mut I,
) -> Result<u8, FromTextError> {
    let ch = bytes.next().ok_or(FromTextError::IncompleteName)?;
    if ch.is_ascii_digit() {
        let mut value = u32::from(ch - b'0');
        for _ in 0..2 {
            let ch = bytes.next().ok_or(FromTextError::IncompleteName)?;
            if !ch.is_ascii_digit() {
                return Err(FromTextError::BadEscape);
            }
            value = value * 10 + u32::from(ch - b'0');
        }
        if value > 255 {
            return Err(FromTextError::BadEscape);
        }
        Ok(value as u8)
    } else {
        Ok(ch)
    }
}

//------------ PushError -----------------------------------------------------

/// An error happened while trying to push data to a name builder.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum PushError {
    /// The current label would exceed the limit of 63 octets.
    #[display(fmt = "long label")]
    LongLabel,

    /// The name would exceed the limit of 255 octets.
    #[display(fmt = "long domain name")]
    LongName,
}

impl std::error::Error for PushError {}

//------------ FromTextError -------------------------------------------------

/// An error happened while parsing a name in presentation format.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FromTextError {
    /// An empty label was encountered somewhere other than the end.
    #[display(fmt = "empty label")]
    EmptyLabel,

    /// A label has more than 63 octets.
    #[display(fmt = "long label")]
    TooLongLabel,

    /// The name has more than 255 octets in wire format.
    #[display(fmt = "long domain name")]
    TooLongName,

    /// An illegal escape sequence was encountered.
    ///
    /// Escape sequences are a backslash character followed by either a
    /// three digit decimal octet value or a single other character.
    #[display(fmt = "illegal escape sequence")]
    BadEscape,

    /// The input was empty or ended in the middle of an escape sequence.
    #[display(fmt = "incomplete name")]
    IncompleteName,
}

impl std::error::Error for FromTextError {}

impl From<PushError> for FromTextError {
    fn from(err: PushError) -> FromTextError {
        match err {
            PushError::LongLabel => FromTextError::TooLongLabel,
            PushError::LongName => FromTextError::TooLongName,
        }
    }
}

//============ Testing =======================================================
