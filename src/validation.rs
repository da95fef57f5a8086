//! Form validation
//!
//! Every form is checked field by field before anything is sent or stored. A failed form reports
//! all offending fields at once.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

use crate::addresses::{AddressLabel, NewAddress};

const EMAIL_LOCAL_SYMBOLS: &str = "._%+-";
const EMAIL_DOMAIN_SYMBOLS: &str = ".-";
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Blank after trimming.
    #[error("is required")]
    Required,

    /// Shorter than the minimum length.
    #[error("must be at least {min} characters")]
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// Not exactly the required length.
    #[error("must be exactly {expected} characters")]
    WrongLength {
        /// Required length.
        expected: usize,
    },

    /// Not a valid email address.
    #[error("is not a valid email address")]
    InvalidEmail,

    /// Not a 10 digit phone number.
    #[error("must be a 10 digit phone number")]
    InvalidPhone,

    /// Neither a valid email nor a valid phone number.
    #[error("must be a valid email address or 10 digit phone number")]
    InvalidContact,

    /// Missing a letter or digit, too short, or contains unsupported characters.
    #[error("must be 8+ characters with a letter and a number")]
    WeakPassword,

    /// Does not match the field it confirms.
    #[error("does not match")]
    Mismatch,
}

/// Field name to reason, for every field that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, FieldError>);

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (field, reason) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{field} {reason}")?;
            first = false;
        }

        Ok(())
    }
}

impl ValidationErrors {
    fn check(&mut self, field: &'static str, result: Result<(), FieldError>) {
        if let Err(reason) = result {
            self.0.insert(field, reason);
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Reason the field failed, if it did.
    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.0.get(field).copied()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failed fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        self.0.iter().map(|(field, reason)| (*field, *reason))
    }
}

/// Whether `text` looks like `local@domain.tld`.
pub fn is_valid_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SYMBOLS.contains(c));

    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_DOMAIN_SYMBOLS.contains(c));

    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

/// Digits of `text` if there are exactly ten of them.
pub fn phone_digits(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    (digits.len() == 10).then_some(digits)
}

/// Whether `password` has 8+ allowed characters including a letter and a digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
}

fn min_len(text: &str, min: usize) -> Result<(), FieldError> {
    if text.chars().count() >= min {
        Ok(())
    } else {
        Err(FieldError::TooShort { min })
    }
}

fn exact_len(text: &str, expected: usize) -> Result<(), FieldError> {
    if text.chars().count() == expected {
        Ok(())
    } else {
        Err(FieldError::WrongLength { expected })
    }
}

fn required(text: &str) -> Result<(), FieldError> {
    if text.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

fn confirms(value: &str, confirmation: &str) -> Result<(), FieldError> {
    if value == confirmation {
        Ok(())
    } else {
        Err(FieldError::Mismatch)
    }
}

/// Email or phone number used to identify an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    /// Email address, trimmed.
    Email(String),

    /// Ten phone digits.
    Phone(String),
}

impl Contact {
    /// Parse an identifier: anything with `@` must be an email, everything else a phone number.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldError`] describing why the identifier is invalid.
    pub fn parse(identifier: &str) -> Result<Contact, FieldError> {
        let identifier = identifier.trim();

        if identifier.contains('@') {
            if is_valid_email(identifier) {
                Ok(Contact::Email(identifier.to_string()))
            } else {
                Err(FieldError::InvalidEmail)
            }
        } else {
            phone_digits(identifier)
                .map(Contact::Phone)
                .ok_or(FieldError::InvalidContact)
        }
    }

    /// The identifier as sent to the backend.
    pub fn as_str(&self) -> &str {
        match self {
            Contact::Email(value) | Contact::Phone(value) => value,
        }
    }
}

/// Login credentials after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account identifier.
    pub contact: Contact,

    /// Password.
    pub password: String,
}

/// Sign-up details after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    /// Trimmed full name.
    pub name: String,

    /// Account identifier.
    pub contact: Contact,

    /// Password.
    pub password: String,
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email or phone number.
    pub identifier: String,

    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every invalid field.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let contact = Contact::parse(&self.identifier);

        errors.check("identifier", contact.clone().map(|_| ()));
        errors.check("password", min_len(&self.password, 6));

        match contact {
            Ok(contact) => errors.finish(Credentials {
                contact,
                password: self.password.clone(),
            }),
            Err(_) => Err(errors),
        }
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    /// Full name.
    pub name: String,

    /// Email or phone number.
    pub identifier: String,

    /// Password.
    pub password: String,

    /// Password again.
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every invalid field.
    pub fn validate(&self) -> Result<SignUp, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        let contact = Contact::parse(&self.identifier);

        errors.check("name", min_len(name, 3));
        errors.check("identifier", contact.clone().map(|_| ()));

        if !is_strong_password(&self.password) {
            errors.check("password", Err(FieldError::WeakPassword));
        }

        errors.check(
            "confirm_password",
            confirms(&self.password, &self.confirm_password),
        );

        match contact {
            Ok(contact) => errors.finish(SignUp {
                name: name.to_string(),
                contact,
                password: self.password.clone(),
            }),
            Err(_) => Err(errors),
        }
    }
}

/// Partner registration form input.
#[derive(Debug, Clone, Default)]
pub struct PartnerRegistrationForm {
    /// Owner's full name.
    pub owner_name: String,

    /// Owner's email.
    pub email: String,

    /// Owner's phone.
    pub phone: String,

    /// Password.
    pub password: String,

    /// Restaurant name.
    pub restaurant_name: String,

    /// City.
    pub city: String,

    /// Street address.
    pub address: String,

    /// FSSAI food licence number.
    pub fssai: String,
}

impl PartnerRegistrationForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every invalid field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check("owner_name", min_len(self.owner_name.trim(), 3));

        if !is_valid_email(self.email.trim()) {
            errors.check("email", Err(FieldError::InvalidEmail));
        }

        if self.phone.len() != 10 || !self.phone.chars().all(|c| c.is_ascii_digit()) {
            errors.check("phone", Err(FieldError::InvalidPhone));
        }

        errors.check("password", min_len(&self.password, 6));
        errors.check("restaurant_name", min_len(self.restaurant_name.trim(), 3));
        errors.check("city", min_len(self.city.trim(), 2));
        errors.check("address", min_len(self.address.trim(), 10));
        errors.check("fssai", exact_len(&self.fssai, 14));

        errors.finish(())
    }
}

/// Address form input.
#[derive(Debug, Clone, Default)]
pub struct AddressForm {
    /// Address kind.
    pub label: AddressLabel,

    /// Flat, house or floor.
    pub flat_no: String,

    /// Area or locality.
    pub area: String,

    /// City.
    pub city: String,
}

impl AddressForm {
    /// Validate the form into an address ready to save.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every blank field.
    pub fn validate(&self) -> Result<NewAddress, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check("flat_no", required(&self.flat_no));
        errors.check("area", required(&self.area));
        errors.check("city", required(&self.city));

        errors.finish(NewAddress {
            label: self.label,
            flat_no: self.flat_no.trim().to_string(),
            area: self.area.trim().to_string(),
            city: self.city.trim().to_string(),
        })
    }
}

/// Password reset form input.
#[derive(Debug, Clone, Default)]
pub struct PasswordResetForm {
    /// One-time code from the reset email.
    pub otp: String,

    /// New password.
    pub new_password: String,

    /// New password again.
    pub confirm_password: String,
}

impl PasswordResetForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every invalid field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        errors.check("otp", exact_len(self.otp.trim(), 6));
        errors.check("new_password", min_len(&self.new_password, 8));
        errors.check(
            "confirm_password",
            confirms(&self.new_password, &self.confirm_password),
        );

        errors.finish(())
    }
}
