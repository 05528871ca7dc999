//! Composite address parsing.
//!
//! The dataset encodes every location as a single string of the form
//! `"<street> (<postcode> <district>)"`, e.g. `"Hauptstr. 1 (50667 Altstadt)"`.

/// Error returned when a composite address does not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("no '(' opening the postcode and district")]
    MissingOpenParen,

    #[error("no ')' closing the postcode and district")]
    MissingCloseParen,

    #[error("no street before '('")]
    MissingStreet,

    #[error("no postcode starting with a digit after '('")]
    MissingPostcode,

    #[error("no district after the postcode")]
    MissingDistrict,
}

/// The three parts of a composite address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub address: String,
    pub postcode: String,
    pub district: String,
}

impl ParsedAddress {
    /// Fallback for a string that could not be parsed: the text before the
    /// first `(` (or the whole string without one) becomes the street part,
    /// postcode and district stay empty.
    pub fn unparsed(raw: &str) -> Self {
        let street = raw.split_once('(').map_or(raw, |(street, _)| street);
        Self {
            address: street.trim().to_string(),
            postcode: String::new(),
            district: String::new(),
        }
    }
}

/// Parse a composite address into street, postcode and district.
///
/// The street is everything before the first `(`. The bracketed part runs up
/// to the last `)` and is split at its last whitespace: the postcode before
/// it, which must start with a digit, and the district after it. A district
/// is therefore always a single word; `"51149 Porz Gremberghoven"` yields
/// the postcode `"51149 Porz"`.
///
/// # Examples
///
/// ```
/// use station_directory::stations::{AddressError, parse_address};
///
/// let parsed = parse_address("Hauptstr. 1 (50667 Altstadt)").unwrap();
/// assert_eq!(parsed.address, "Hauptstr. 1");
/// assert_eq!(parsed.postcode, "50667");
/// assert_eq!(parsed.district, "Altstadt");
///
/// assert_eq!(parse_address("Hauptstr. 1"), Err(AddressError::MissingOpenParen));
/// ```
pub fn parse_address(raw: &str) -> Result<ParsedAddress, AddressError> {
    let (street, rest) = raw.split_once('(').ok_or(AddressError::MissingOpenParen)?;
    let close = rest.rfind(')').ok_or(AddressError::MissingCloseParen)?;

    let street = street.trim();
    if street.is_empty() {
        return Err(AddressError::MissingStreet);
    }

    let inner = rest[..close].trim();
    let starts_with_digit = |s: &str| s.starts_with(|c: char| c.is_ascii_digit());

    let Some((postcode, district)) = inner.rsplit_once(char::is_whitespace) else {
        // A lone token is a postcode without district, or no postcode at all.
        return Err(if starts_with_digit(inner) {
            AddressError::MissingDistrict
        } else {
            AddressError::MissingPostcode
        });
    };

    let postcode = postcode.trim_end();
    if !starts_with_digit(postcode) {
        return Err(AddressError::MissingPostcode);
    }

    Ok(ParsedAddress {
        address: street.to_string(),
        postcode: postcode.to_string(),
        district: district.to_string(),
    })
}
