//! # CareChain Types
//!
//! Small validated text types shared by the CareChain crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A medication name in display form, paired with its case-folded lookup key.
///
/// Display form is title-cased (`co-trimoxazole` becomes `Co-Trimoxazole`); the
/// key is the lower-cased display form and is what interaction lookups compare.
/// Equality is on the display form, so two names that only differ in their
/// original casing collapse to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MedicationName {
    display: String,
    key: String,
}

impl MedicationName {
    /// Builds a medication name from free text.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        let display = title_case(text.as_str());
        let key = display.to_lowercase();
        Ok(Self { display, key })
    }

    /// Title-cased name for output.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Case-folded name for lookups.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for MedicationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

impl AsRef<str> for MedicationName {
    fn as_ref(&self) -> &str {
        &self.display
    }
}

impl serde::Serialize for MedicationName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> serde::Deserialize<'de> for MedicationName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MedicationName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Title-cases text word by word.
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise, so digits and punctuation start a new word
/// (`5mg` becomes `5Mg`, `co-trimoxazole` becomes `Co-Trimoxazole`).
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}
