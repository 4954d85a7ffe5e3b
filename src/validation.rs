use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error as ThisError;

use crate::models::TransactionKind;

pub const CPF_LENGTH: usize = 11;
/// Largest amount a single transaction may carry.
pub const TRANSACTION_CEILING: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);
const AMOUNT_SCALE: u32 = 2;
/// Widths of `telefone.ddd` and `telefone.numero`.
pub const DDD_MAX_LEN: usize = 3;
pub const PHONE_NUMBER_MAX_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("CPF inválido. Deve conter exatamente 11 números.")]
    InvalidCpf,
    #[error("O nome do cliente não pode ser vazio.")]
    EmptyName,
    #[error("O campo {0} deve conter apenas números.")]
    NotDigits(&'static str),
    #[error("O campo {field} deve ter no máximo {max} dígitos.")]
    TooLong { field: &'static str, max: usize },
    #[error("Valor inválido: {0}")]
    InvalidAmount(String),
    #[error("O valor deve ser maior que zero.")]
    NonPositiveAmount,
    #[error("O valor excede o limite de 10000.00 por transação.")]
    AmountAboveCeiling,
    #[error("O valor deve ter no máximo 2 casas decimais.")]
    TooManyDecimalPlaces,
    #[error("Número de conta inválido: {0}")]
    InvalidAccountNumber(String),
    #[error("Tipo de transação desconhecido: {0}")]
    UnknownTransactionKind(String),
}

pub fn validate_cpf(cpf: &str) -> Result<&str, ValidationError> {
    if cpf.len() == CPF_LENGTH && cpf.bytes().all(|b| b.is_ascii_digit()) {
        Ok(cpf)
    } else {
        Err(ValidationError::InvalidCpf)
    }
}

/// Returns the name with surrounding whitespace removed.
pub fn validate_name(nome: &str) -> Result<&str, ValidationError> {
    let nome = nome.trim();
    if nome.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(nome)
}

pub fn validate_digits<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(ValidationError::NotDigits(field))
    }
}

fn validate_bounded_digits<'a>(
    field: &'static str,
    value: &'a str,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let value = validate_digits(field, value)?;
    if value.len() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

pub fn validate_ddd(ddd: &str) -> Result<&str, ValidationError> {
    validate_bounded_digits("DDD", ddd, DDD_MAX_LEN)
}

pub fn validate_phone_number(numero: &str) -> Result<&str, ValidationError> {
    validate_bounded_digits("número", numero, PHONE_NUMBER_MAX_LEN)
}

/// Parses a user-typed amount, accepting either `.` or `,` as decimal separator.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let normalized = raw.replace(',', ".");
    let valor = Decimal::from_str(&normalized)
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    validate_amount(valor)
}

pub fn validate_amount(valor: Decimal) -> Result<Decimal, ValidationError> {
    if valor <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if valor > TRANSACTION_CEILING {
        return Err(ValidationError::AmountAboveCeiling);
    }
    if valor.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::TooManyDecimalPlaces);
    }
    Ok(valor)
}

pub fn parse_account_number(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    validate_digits("número da conta", raw)
        .ok()
        .and_then(|digits| digits.parse::<i32>().ok())
        .ok_or_else(|| ValidationError::InvalidAccountNumber(raw.to_string()))
}

pub fn parse_transaction_kind(raw: &str) -> Result<TransactionKind, ValidationError> {
    TransactionKind::from_str(raw.trim())
        .map_err(|_| ValidationError::UnknownTransactionKind(raw.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cpf_must_have_eleven_ascii_digits() {
        assert_eq!(validate_cpf("12345678901"), Ok("12345678901"));
        for bad in ["", "1234567890", "123456789012", "1234567890a", "123.456.789", "１２３４５６７８９０１"] {
            assert_eq!(validate_cpf(bad), Err(ValidationError::InvalidCpf), "{bad}");
        }
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(validate_name("  Ana "), Ok("Ana"));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn phone_fields_are_digits_only() {
        assert_eq!(validate_digits("ddd", "11"), Ok("11"));
        assert_eq!(validate_digits("ddd", ""), Err(ValidationError::NotDigits("ddd")));
        assert_eq!(
            validate_digits("numero", "9999-9999"),
            Err(ValidationError::NotDigits("numero"))
        );
    }

    #[test]
    fn phone_fields_fit_their_columns() {
        assert_eq!(validate_ddd("119"), Ok("119"));
        assert_eq!(
            validate_ddd("1111"),
            Err(ValidationError::TooLong { field: "DDD", max: 3 })
        );
        assert_eq!(validate_phone_number("999999999"), Ok("999999999"));
        assert_eq!(
            validate_phone_number("9999999999"),
            Err(ValidationError::TooLong { field: "número", max: 9 })
        );
        assert_eq!(validate_ddd("1x"), Err(ValidationError::NotDigits("DDD")));
    }

    #[test]
    fn amount_ceiling_is_inclusive() {
        assert_eq!(TRANSACTION_CEILING, dec!(10000.00));
        assert_eq!(validate_amount(dec!(10000.00)), Ok(dec!(10000.00)));
        assert_eq!(
            validate_amount(dec!(10000.01)),
            Err(ValidationError::AmountAboveCeiling)
        );
    }

    #[test]
    fn amount_must_be_positive_with_two_places() {
        assert_eq!(validate_amount(dec!(0)), Err(ValidationError::NonPositiveAmount));
        assert_eq!(validate_amount(dec!(-5)), Err(ValidationError::NonPositiveAmount));
        assert_eq!(
            validate_amount(dec!(1.005)),
            Err(ValidationError::TooManyDecimalPlaces)
        );
        assert_eq!(validate_amount(dec!(1.500)), Ok(dec!(1.500)));
    }

    #[test]
    fn amount_accepts_comma_separator() {
        assert_eq!(parse_amount("100,50"), Ok(dec!(100.50)));
        assert_eq!(parse_amount(" 100.00 "), Ok(dec!(100.00)));
        assert_eq!(
            parse_amount("cem"),
            Err(ValidationError::InvalidAmount("cem".to_string()))
        );
    }

    #[test]
    fn account_number_must_fit_an_integer() {
        assert_eq!(parse_account_number("42"), Ok(42));
        assert!(parse_account_number("").is_err());
        assert!(parse_account_number("-1").is_err());
        assert!(parse_account_number("99999999999").is_err());
    }

    #[test]
    fn transaction_kind_uses_portuguese_labels() {
        assert_eq!(parse_transaction_kind("Depósito"), Ok(TransactionKind::Deposito));
        assert_eq!(
            parse_transaction_kind(" Transferência "),
            Ok(TransactionKind::Transferencia)
        );
        assert_eq!(
            parse_transaction_kind("Pix"),
            Err(ValidationError::UnknownTransactionKind("Pix".to_string()))
        );
    }
}
