//! Input parser.

mod error;
#[cfg(test)]
mod tests;

use bstr::BStr;

pub use self::error::{ErrorKind, IStrError};

pub(self) type Result<T> = std::result::Result<T, IStrError>;

pub(crate) const NL: u8 = b'\n';

/// Helper to process input.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    /// The data being processed.
    data: &'static [u8],
    /// Index of the data in the original input.
    index: usize,
}

impl IStr {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'static [u8], index: usize) -> Self {
        Self { data, index }
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the current input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Get remaining binary string of the input.
    #[inline]
    pub fn as_bstr(&self) -> &'static BStr {
        BStr::new(self.data)
    }

    /// Length of the first line, not counting the terminating newline.
    ///
    /// Errors with [ErrorKind::ExpectedLine] if the input contains no
    /// newline at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::IStr;
    ///
    /// let input = IStr::new(b"abc\nde\n", 0);
    /// assert_eq!(input.line_len().unwrap(), 3);
    ///
    /// let input = IStr::new(b"abc", 0);
    /// assert!(input.line_len().is_err());
    /// ```
    #[inline]
    pub fn line_len(&self) -> Result<usize> {
        match memchr::memchr(NL, self.data) {
            Some(n) => Ok(n),
            None => Err(IStrError::new(
                self.index..self.index + self.data.len(),
                ErrorKind::ExpectedLine,
            )),
        }
    }
}
