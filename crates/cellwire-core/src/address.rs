//! Row, column and cell address types.
//!
//! Addresses are 1-based: row 1 is the first row and column 1 is column "A".
//! Zero indices are rejected at construction, so a value of any of these
//! types always names a real cell location.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::base26::{letters_to_column, nonzero_column_to_letters};
use crate::error::{Error, Result};

/// A row address: a positive integer, displayed in decimal ("7").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowAddress(NonZeroU32);

impl RowAddress {
    pub fn new(index: NonZeroU32) -> Self {
        Self(index)
    }

    /// The 1-based row index.
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl From<NonZeroU32> for RowAddress {
    fn from(index: NonZeroU32) -> Self {
        Self::new(index)
    }
}

impl TryFrom<u32> for RowAddress {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        let index = NonZeroU32::new(index).ok_or(Error::InvalidRowIndex)?;
        Ok(Self::new(index))
    }
}

impl FromStr for RowAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(s.to_string());

        // digits only; u32::from_str would also take a leading '+'
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: u32 = s.parse().map_err(|_| invalid())?;
        Self::try_from(index).map_err(|_| invalid())
    }
}

impl fmt::Display for RowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column address: a positive integer, displayed as bijective base-26
/// letters ("A" is 1, "Z" is 26, "AA" is 27).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColAddress(NonZeroU32);

impl ColAddress {
    pub fn new(index: NonZeroU32) -> Self {
        Self(index)
    }

    /// The 1-based column index.
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl From<NonZeroU32> for ColAddress {
    fn from(index: NonZeroU32) -> Self {
        Self::new(index)
    }
}

impl TryFrom<u32> for ColAddress {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        let index = NonZeroU32::new(index).ok_or(Error::InvalidColumnIndex)?;
        Ok(Self::new(index))
    }
}

impl FromStr for ColAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let index = letters_to_column(s)?;
        Self::try_from(index)
    }
}

impl fmt::Display for ColAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&nonzero_column_to_letters(self.0))
    }
}

/// Address of a single cell: column letters followed by the row number,
/// e.g. "B7" is column 2, row 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellAddress {
    row: RowAddress,
    col: ColAddress,
}

impl CellAddress {
    pub fn new(row: RowAddress, col: ColAddress) -> Self {
        Self { row, col }
    }

    /// Build an address from raw 1-based indices, validating each
    /// independently.
    ///
    /// # Examples
    /// ```
    /// use cellwire_core::CellAddress;
    ///
    /// let addr = CellAddress::from_indices(7, 2).unwrap();
    /// assert_eq!(addr.to_string(), "B7");
    ///
    /// assert!(CellAddress::from_indices(0, 2).is_err());
    /// assert!(CellAddress::from_indices(7, 0).is_err());
    /// ```
    pub fn from_indices(row: u32, col: u32) -> Result<Self> {
        Ok(Self {
            row: RowAddress::try_from(row)?,
            col: ColAddress::try_from(col)?,
        })
    }

    pub fn row(&self) -> RowAddress {
        self.row
    }

    pub fn col(&self) -> ColAddress {
        self.col
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(s.to_string());

        let letters_end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(letters_end);

        if letters.is_empty() || digits.is_empty() {
            return Err(invalid());
        }

        let col: ColAddress = letters.parse().map_err(|_| invalid())?;
        let row: RowAddress = digits.parse().map_err(|_| invalid())?;

        Ok(Self { row, col })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}
