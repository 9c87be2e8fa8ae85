//! Client-side field checks run before a form is submitted.
//!
//! These mirror the server forms so users get feedback early; the server
//! stays authoritative. Every error displays as the message shown under the
//! field.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use thiserror::Error;

use crate::config::ValidationConfig;
use crate::currency::{format_brl, parse_brl, parse_leading_float};
use crate::phone::phone_digits;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Este campo é obrigatório.")]
    Required,
    #[error("Por favor, selecione uma opção.")]
    SelectRequired,
    #[error("Por favor, insira um valor válido.")]
    InvalidNumber,
    #[error("Mínimo de {0} caracteres.")]
    TooShort(usize),
    #[error("Máximo de {0} caracteres.")]
    TooLong(usize),
    #[error("Selecione {0}.")]
    MissingChoice(Choice),
    #[error("O valor é obrigatório.")]
    AmountRequired,
    #[error("O valor deve ser maior que zero.")]
    AmountNotPositive,
    #[error("O valor não pode ser maior que R$ {0}.")]
    AmountTooLarge(String),
    #[error("A data é obrigatória.")]
    DateRequired,
    #[error("Data inválida.")]
    DateInvalid,
    #[error("A data não pode ser no futuro.")]
    DateInFuture,
    #[error("O {field} deve ter no mínimo {min} caracteres.")]
    NameTooShort { field: NameField, min: usize },
    #[error("O {0} deve conter apenas letras, espaços e hífens.")]
    NameInvalidChars(NameField),
    #[error("O telefone deve ter 10 ou 11 dígitos.")]
    PhoneLength,
    #[error("Celular deve ter o dígito 9 após o DDD.")]
    MobileMissingNine,
    #[error("Data de nascimento inválida.")]
    BirthDateInvalid,
    #[error("A data de nascimento deve estar no passado.")]
    BirthDateNotPast,
    #[error("Você deve ter pelo menos {0} anos.")]
    Underage(i32),
    #[error("O nome da categoria é obrigatório.")]
    CategoryNameRequired,
    #[error("O nome deve ter pelo menos {0} caracteres.")]
    CategoryNameTooShort(usize),
    #[error("Selecione uma cor para a categoria.")]
    ColorRequired,
    #[error("Cor inválida. Use o formato #RRGGBB.")]
    ColorInvalid,
}

/// Select fields that must have a value on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    TransactionType,
    Account,
    Category,
    CategoryType,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Choice::TransactionType => "o tipo da transação",
            Choice::Account => "uma conta",
            Choice::Category => "uma categoria",
            Choice::CategoryType => "o tipo da categoria",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    FirstName,
    LastName,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameField::FirstName => "nome",
            NameField::LastName => "sobrenome",
        })
    }
}

/// How a generic form field is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    Number,
    /// Masked BRL input
    Currency,
}

/// What the generic validator needs to know about a field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot<'a> {
    pub value: &'a str,
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl<'a> FieldSnapshot<'a> {
    pub fn text(value: &'a str) -> Self {
        Self {
            value,
            required: false,
            kind: FieldKind::Text,
            min_length: None,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn lengths(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }
}

pub type FieldResult = Result<(), FieldError>;

/// Rules of the generic required-field form. The first failing rule wins.
pub fn validate_field(field: &FieldSnapshot<'_>) -> FieldResult {
    let value = field.value.trim();
    let length = value.chars().count();

    if field.required && value.is_empty() {
        return Err(FieldError::Required);
    }
    match field.kind {
        FieldKind::Select if value.is_empty() => return Err(FieldError::SelectRequired),
        FieldKind::Number => {
            return parse_leading_float(value).map(|_| ()).ok_or(FieldError::InvalidNumber);
        }
        // the mask guarantees a readable number
        FieldKind::Currency => return Ok(()),
        FieldKind::Select | FieldKind::Text => {}
    }
    if let Some(min) = field.min_length.filter(|min| length < *min) {
        return Err(FieldError::TooShort(min));
    }
    if let Some(max) = field.max_length.filter(|max| length > *max) {
        return Err(FieldError::TooLong(max));
    }
    Ok(())
}

/// Submit stays disabled until every required field has some value
pub fn required_fields_filled<'a>(values: impl IntoIterator<Item = &'a str>) -> bool {
    values.into_iter().all(|value| !value.trim().is_empty())
}

pub fn validate_choice(value: &str, choice: Choice) -> FieldResult {
    if value.trim().is_empty() {
        Err(FieldError::MissingChoice(choice))
    } else {
        Ok(())
    }
}

/// Transaction amount; `masked` when the input carries the BRL mask
pub fn validate_amount(raw: &str, masked: bool, config: &ValidationConfig) -> FieldResult {
    if raw.trim().is_empty() {
        return Err(FieldError::AmountRequired);
    }
    let value = if masked {
        Some(parse_brl(raw))
    } else {
        parse_leading_float(raw)
    };
    match value {
        Some(amount) if amount > 0.0 => {
            if amount > config.max_amount {
                Err(FieldError::AmountTooLarge(format_brl(config.max_amount)))
            } else {
                Ok(())
            }
        }
        _ => Err(FieldError::AmountNotPositive),
    }
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Transaction date: required and not after `today`
pub fn validate_transaction_date(raw: &str, today: NaiveDate) -> FieldResult {
    if raw.trim().is_empty() {
        return Err(FieldError::DateRequired);
    }
    let date = parse_iso_date(raw).ok_or(FieldError::DateInvalid)?;
    if date > today {
        return Err(FieldError::DateInFuture);
    }
    Ok(())
}

/// Optional first/last name: letters (Latin-1 accents included), spaces,
/// apostrophes and hyphens
pub fn validate_person_name(raw: &str, field: NameField, config: &ValidationConfig) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() < config.min_name_length {
        return Err(FieldError::NameTooShort {
            field,
            min: config.min_name_length,
        });
    }
    let allowed = |c: char| c.is_ascii_alphabetic() || ('\u{C0}'..='\u{FF}').contains(&c) || c.is_whitespace() || c == '\'' || c == '-';
    if !value.chars().all(allowed) {
        return Err(FieldError::NameInvalidChars(field));
    }
    Ok(())
}

/// Optional phone: 10 digits (landline) or 11 with a leading 9 (mobile)
pub fn validate_phone(raw: &str) -> FieldResult {
    if raw.trim().is_empty() {
        return Ok(());
    }
    let digits = phone_digits(raw);
    if !(10..=11).contains(&digits.len()) {
        return Err(FieldError::PhoneLength);
    }
    if digits.len() == 11 && digits.as_bytes()[2] != b'9' {
        return Err(FieldError::MobileMissingNine);
    }
    Ok(())
}

/// Whole years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Optional birth date: in the past, adult, and plausible
pub fn validate_birth_date(raw: &str, today: NaiveDate, config: &ValidationConfig) -> FieldResult {
    if raw.trim().is_empty() {
        return Ok(());
    }
    let birth = parse_iso_date(raw).ok_or(FieldError::BirthDateInvalid)?;
    if birth >= today {
        return Err(FieldError::BirthDateNotPast);
    }
    let age = age_on(birth, today);
    if age < config.min_age_years {
        return Err(FieldError::Underage(config.min_age_years));
    }
    if age > config.max_age_years {
        return Err(FieldError::BirthDateInvalid);
    }
    Ok(())
}

pub fn validate_category_name(raw: &str, config: &ValidationConfig) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::CategoryNameRequired);
    }
    if value.chars().count() < config.min_name_length {
        return Err(FieldError::CategoryNameTooShort(config.min_name_length));
    }
    Ok(())
}

/// `#RRGGBB`, case-insensitive
pub fn validate_hex_color(raw: &str) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::ColorRequired);
    }
    if crate::color::is_hex_color(value) {
        Ok(())
    } else {
        Err(FieldError::ColorInvalid)
    }
}
