use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PhoneRecord {
    pub id: i32,
    pub nome: String,
    pub ddd: String,
    pub numero: String,
}

impl TryFrom<&PgRow> for PhoneRecord {
    type Error = sqlx::Error;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(PhoneRecord {
            id: row.try_get("id")?,
            nome: row.try_get("nome")?,
            ddd: row.try_get("ddd")?,
            numero: row.try_get("numero")?,
        })
    }
}

/// One customer × account × phone combination. Account and phone columns are
/// `None` when the customer has no such row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CustomerView {
    pub cpf: String,
    pub nome: String,
    pub num_agencia: Option<String>,
    pub num_conta: Option<i32>,
    pub ddd: Option<String>,
    pub telefone: Option<String>,
}

impl TryFrom<&PgRow> for CustomerView {
    type Error = sqlx::Error;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(CustomerView {
            cpf: row.try_get("cpf")?,
            nome: row.try_get("nome")?,
            num_agencia: row.try_get("num_agencia")?,
            num_conta: row.try_get("num_conta")?,
            ddd: row.try_get("ddd")?,
            telefone: row.try_get("telefone")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub num_conta: i32,
    pub valor: Decimal,
    pub tipo: String,
    pub data_hora: NaiveDateTime,
}

impl TryFrom<&PgRow> for TransactionRecord {
    type Error = sqlx::Error;

    fn try_from(row: &PgRow) -> Result<Self, Self::Error> {
        Ok(TransactionRecord {
            num_conta: row.try_get("num_conta")?,
            valor: row.try_get("valor")?,
            tipo: row.try_get("tipo")?,
            data_hora: row.try_get("data_hora")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    #[serde(rename = "Débito")]
    Debito,
    #[serde(rename = "Crédito")]
    Credito,
    Saque,
    #[serde(rename = "Depósito")]
    Deposito,
    #[serde(rename = "Transferência")]
    Transferencia,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 5] = [
        TransactionKind::Debito,
        TransactionKind::Credito,
        TransactionKind::Saque,
        TransactionKind::Deposito,
        TransactionKind::Transferencia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debito => "Débito",
            TransactionKind::Credito => "Crédito",
            TransactionKind::Saque => "Saque",
            TransactionKind::Deposito => "Depósito",
            TransactionKind::Transferencia => "Transferência",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

#[derive(Deserialize)]
pub struct NewCustomerForm {
    pub cpf: String,
    pub nome: String,
}

#[derive(Deserialize)]
pub struct CustomerQuery {
    pub cpf: Option<String>,
}

impl CustomerQuery {
    /// A blank CPF means "every customer".
    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_deref().map(str::trim).filter(|cpf| !cpf.is_empty())
    }
}

#[derive(Deserialize)]
pub struct PhoneLookup {
    pub cpf: String,
}

#[derive(Deserialize)]
pub struct PhoneForm {
    pub ddd: String,
    pub numero: String,
}

#[derive(Deserialize)]
pub struct TransactionForm {
    pub num_conta: String,
    pub valor: String,
    pub tipo: String,
}
