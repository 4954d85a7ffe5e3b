use rand::Rng;
use rayon::prelude::*;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::StoreError;
use crate::models::{CustomerView, PhoneRecord, TransactionRecord};
use crate::queries::sql::{
    DELETE_PHONE_QUERY, INSERT_ACCOUNT_QUERY, INSERT_CUSTOMER_QUERY, INSERT_TRANSACTION_QUERY,
    LIST_PHONES_QUERY, PING_QUERY, QUERY_CUSTOMERS_QUERY, UPDATE_PHONE_QUERY,
};
use crate::validation::{
    parse_account_number, parse_transaction_kind, validate_amount, validate_cpf, validate_ddd,
    validate_name, validate_phone_number,
};

/// Branch codes a new account may be opened in.
pub const BRANCH_CODES: [&str; 2] = ["1", "2"];

pub fn pick_branch_code() -> &'static str {
    BRANCH_CODES[rand::rng().random_range(0..BRANCH_CODES.len())]
}

/// Customer, account, phone and transaction records over a Postgres pool.
///
/// Every operation validates its input before touching the database and holds
/// a pooled connection (or one transaction) only for its own duration.
#[derive(Clone)]
pub struct AccountRecordStore {
    connection: PgPool,
}

impl AccountRecordStore {
    pub fn from_pool(connection: PgPool) -> Self {
        Self { connection }
    }

    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let connection = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.database.clone())
            .await
            .map_err(StoreError::Connection)?;
        Ok(Self::from_pool(connection))
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(PING_QUERY)
            .execute(&self.connection)
            .await
            .map_err(StoreError::Connection)?;
        Ok(())
    }

    pub async fn close(&self) {
        self.connection.close().await;
    }

    /// Inserts the customer and its account atomically, returning the branch
    /// code the account was opened in.
    pub async fn create_customer_with_account(
        &self,
        cpf: &str,
        nome: &str,
    ) -> Result<&'static str, StoreError> {
        let cpf = validate_cpf(cpf)?;
        let nome = validate_name(nome)?;
        let agencia = pick_branch_code();

        let mut tx = self.connection.begin().await?;
        let inserted = async {
            sqlx::query(INSERT_CUSTOMER_QUERY)
                .bind(cpf)
                .bind(nome)
                .execute(&mut *tx)
                .await?;
            sqlx::query(INSERT_ACCOUNT_QUERY)
                .bind(cpf)
                .bind(agencia)
                .execute(&mut *tx)
                .await
        }
        .await;
        match inserted {
            Ok(_) => {
                tx.commit().await?;
                info!(cpf, agencia, "customer and account created");
                Ok(agencia)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(cpf, error = %rollback_err, "rollback after failed insert failed");
                }
                Err(err.into())
            }
        }
    }

    pub async fn list_phones_for_customer(&self, cpf: &str) -> Result<Vec<PhoneRecord>, StoreError> {
        let cpf = validate_cpf(cpf)?;
        let rows = sqlx::query(LIST_PHONES_QUERY)
            .bind(cpf)
            .fetch_all(&self.connection)
            .await?;
        let phones = rows
            .par_iter()
            .map(PhoneRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(cpf, count = phones.len(), "phones listed");
        Ok(phones)
    }

    pub async fn update_phone(&self, id: i32, ddd: &str, numero: &str) -> Result<(), StoreError> {
        let ddd = validate_ddd(ddd)?;
        let numero = validate_phone_number(numero)?;
        let updated = sqlx::query(UPDATE_PHONE_QUERY)
            .bind(ddd)
            .bind(numero)
            .bind(id)
            .execute(&self.connection)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!(id, "phone updated");
        Ok(())
    }

    pub async fn delete_phone(&self, id: i32) -> Result<(), StoreError> {
        let deleted = sqlx::query(DELETE_PHONE_QUERY)
            .bind(id)
            .execute(&self.connection)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!(id, "phone deleted");
        Ok(())
    }

    /// Left-joined customer/account/phone rows, for one customer or all of them.
    pub async fn query_customers(&self, cpf: Option<&str>) -> Result<Vec<CustomerView>, StoreError> {
        let cpf = cpf.map(validate_cpf).transpose()?;
        let rows = sqlx::query(QUERY_CUSTOMERS_QUERY)
            .bind(cpf)
            .fetch_all(&self.connection)
            .await?;
        let customers = rows
            .par_iter()
            .map(CustomerView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(cpf = ?cpf, count = customers.len(), "customers queried");
        Ok(customers)
    }

    /// Appends a log entry for the account. Balances are left untouched.
    pub async fn record_transaction(
        &self,
        num_conta: &str,
        valor: Decimal,
        tipo: &str,
    ) -> Result<TransactionRecord, StoreError> {
        let num_conta = parse_account_number(num_conta)?;
        let valor = validate_amount(valor)?;
        let tipo = parse_transaction_kind(tipo)?;
        let row = sqlx::query(INSERT_TRANSACTION_QUERY)
            .bind(num_conta)
            .bind(valor)
            .bind(tipo.as_str())
            .fetch_one(&self.connection)
            .await?;
        let transaction = TransactionRecord::try_from(&row)?;
        info!(num_conta, %valor, %tipo, "transaction recorded");
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use crate::test_support::offline_store;
    use rust_decimal_macros::dec;

    const BAD_CPFS: [&str; 4] = ["", "123", "1234567890x", "123456789012"];

    #[test]
    fn branch_codes_are_one_or_two() {
        for _ in 0..200 {
            assert!(BRANCH_CODES.contains(&pick_branch_code()));
        }
    }

    #[tokio::test]
    async fn malformed_cpf_is_rejected_before_any_query() {
        let store = offline_store();
        for cpf in BAD_CPFS {
            assert!(matches!(
                store.create_customer_with_account(cpf, "Ana").await,
                Err(StoreError::Validation(ValidationError::InvalidCpf))
            ));
            assert!(matches!(
                store.list_phones_for_customer(cpf).await,
                Err(StoreError::Validation(ValidationError::InvalidCpf))
            ));
            assert!(matches!(
                store.query_customers(Some(cpf)).await,
                Err(StoreError::Validation(ValidationError::InvalidCpf))
            ));
        }
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = offline_store();
        assert!(matches!(
            store.create_customer_with_account("12345678901", "  ").await,
            Err(StoreError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn phone_update_requires_digits() {
        let store = offline_store();
        assert!(matches!(
            store.update_phone(1, "1a", "999999999").await,
            Err(StoreError::Validation(ValidationError::NotDigits(_)))
        ));
        assert!(matches!(
            store.update_phone(1, "11", "").await,
            Err(StoreError::Validation(ValidationError::NotDigits(_)))
        ));
    }

    #[tokio::test]
    async fn phone_update_rejects_values_longer_than_the_columns() {
        let store = offline_store();
        assert!(matches!(
            store.update_phone(1, "11111", "999999999").await,
            Err(StoreError::Validation(ValidationError::TooLong { max: 3, .. }))
        ));
        assert!(matches!(
            store.update_phone(1, "11", "9999999999999").await,
            Err(StoreError::Validation(ValidationError::TooLong { max: 9, .. }))
        ));
    }

    #[tokio::test]
    async fn transaction_input_is_checked_first() {
        let store = offline_store();
        assert!(matches!(
            store.record_transaction("1", dec!(10000.01), "Depósito").await,
            Err(StoreError::Validation(ValidationError::AmountAboveCeiling))
        ));
        assert!(matches!(
            store.record_transaction("1", dec!(100.00), "Pix").await,
            Err(StoreError::Validation(ValidationError::UnknownTransactionKind(_)))
        ));
        assert!(matches!(
            store.record_transaction("", dec!(100.00), "Saque").await,
            Err(StoreError::Validation(ValidationError::InvalidAccountNumber(_)))
        ));
    }

    #[tokio::test]
    async fn valid_input_reaches_the_database() {
        let store = offline_store();
        assert!(matches!(
            store.query_customers(None).await,
            Err(StoreError::Connection(_))
        ));
    }
}
