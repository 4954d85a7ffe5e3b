use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::errors::StoreError;
use crate::services::AccountRecordStore;

const MENU: &str = "
        1. INSERIR CLIENTES
        2. EDITAR INFORMAÇÕES
        3. CONSULTAR CLIENTES
        4. EXCLUIR CLIENTES
        5. SAIR
";
const RULE: &str = "--------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Insert,
    Edit,
    Query,
    Delete,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInputError {
    NotANumber,
    Unrecognized,
}

impl FromStr for MenuChoice {
    type Err = MenuInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice: i64 = s.trim().parse().map_err(|_| MenuInputError::NotANumber)?;
        match choice {
            1 => Ok(MenuChoice::Insert),
            2 => Ok(MenuChoice::Edit),
            3 => Ok(MenuChoice::Query),
            4 => Ok(MenuChoice::Delete),
            5 => Ok(MenuChoice::Exit),
            _ => Err(MenuInputError::Unrecognized),
        }
    }
}

/// Line-oriented menu over any reader/writer pair. Returns when the user picks
/// "exit" or the input ends.
pub struct Console<'a, R, W> {
    store: &'a AccountRecordStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(store: &'a AccountRecordStore, input: R, output: W) -> Self {
        Self { store, input, output }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Escolha (1/2/3/4/5): ")? else {
                return Ok(());
            };
            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Insert) => self.insert().await?,
                Ok(MenuChoice::Edit) => self.edit().await?,
                Ok(MenuChoice::Query) => self.query().await?,
                Ok(MenuChoice::Delete) => self.delete().await?,
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Encerrando o programa.")?;
                    return Ok(());
                }
                Err(MenuInputError::Unrecognized) => {
                    writeln!(self.output, "Valor não reconhecido. Tente novamente")?
                }
                Err(MenuInputError::NotANumber) => {
                    writeln!(self.output, "Entrada inválida. Digite apenas números (1-5).")?
                }
            }
        }
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, action: &'static str, err: StoreError) -> io::Result<()> {
        warn!(action, error = %err, "operation failed");
        writeln!(self.output, "\n--- Erro ao {action} ---")?;
        writeln!(self.output, "Detalhe: {err}\n")
    }

    async fn insert(&mut self) -> io::Result<()> {
        let Some(cpf) = self.prompt("Digite o CPF do cliente (apenas numeros): ")? else {
            return Ok(());
        };
        if crate::validation::validate_cpf(&cpf).is_err() {
            return writeln!(self.output, "CPF inválido. Deve ser digitado 11 números.");
        }
        let Some(nome) = self.prompt("Nome do cliente: ")? else {
            return Ok(());
        };
        match self.store.create_customer_with_account(&cpf, &nome).await {
            Ok(agencia) => writeln!(
                self.output,
                "Cliente {} e conta na agência {} inseridos com sucesso!",
                nome.trim(),
                agencia
            ),
            Err(err) => self.report("inserir", err),
        }
    }

    /// Prints the customer's phones. `false` when there is nothing to act on.
    async fn show_phones(&mut self, action: &'static str) -> io::Result<bool> {
        let Some(cpf) = self.prompt("CPF do cliente: ")? else {
            return Ok(false);
        };
        let phones = match self.store.list_phones_for_customer(&cpf).await {
            Ok(phones) => phones,
            Err(StoreError::Validation(_)) => {
                writeln!(self.output, "CPF inválido.")?;
                return Ok(false);
            }
            Err(err) => {
                self.report(action, err)?;
                return Ok(false);
            }
        };
        if phones.is_empty() {
            writeln!(self.output, "Nenhum telefone encontrado para este CPF.")?;
            return Ok(false);
        }
        writeln!(self.output, "Telefones encontrados:")?;
        for phone in &phones {
            writeln!(
                self.output,
                "  ID: {}, Nome: {}, Telefone: ({}) {}",
                phone.id, phone.nome, phone.ddd, phone.numero
            )?;
        }
        Ok(true)
    }

    fn read_id(&mut self, label: &str) -> io::Result<Option<i32>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.parse::<i32>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "ID inválido.")?;
                Ok(None)
            }
        }
    }

    async fn edit(&mut self) -> io::Result<()> {
        writeln!(self.output, "VAMOS EDITAR O NÚMERO DE TELEFONE DO CLIENTE")?;
        if !self.show_phones("editar").await? {
            return Ok(());
        }
        let Some(id) = self.read_id("Digite o id do telefone que será alterado: ")? else {
            return Ok(());
        };
        let Some(ddd) = self.prompt("Digite o novo ddd: ")? else {
            return Ok(());
        };
        let Some(numero) = self.prompt("Digite o novo número: ")? else {
            return Ok(());
        };
        match self.store.update_phone(id, &ddd, &numero).await {
            Ok(()) => writeln!(self.output, "Telefone atualizado com sucesso!"),
            Err(err) => self.report("editar", err),
        }
    }

    async fn query(&mut self) -> io::Result<()> {
        let Some(cpf) =
            self.prompt("Digite o CPF do cliente (ou deixe em branco para buscar todos): ")?
        else {
            return Ok(());
        };
        let filter = Some(cpf.as_str()).filter(|cpf| !cpf.is_empty());
        let customers = match self.store.query_customers(filter).await {
            Ok(customers) => customers,
            Err(StoreError::Validation(_)) => {
                return writeln!(
                    self.output,
                    "CPF inválido. Deve ter 11 números ou estar em branco."
                );
            }
            Err(err) => return self.report("consultar", err),
        };
        writeln!(self.output, "\n(Nome, Agência, Conta, DDD, Telefone)")?;
        writeln!(self.output, "{RULE}")?;
        if customers.is_empty() {
            writeln!(self.output, "Nenhum resultado encontrado.")?;
        }
        for c in &customers {
            writeln!(
                self.output,
                "({}, {}, {}, {}, {})",
                c.nome,
                c.num_agencia.as_deref().unwrap_or("-"),
                c.num_conta.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
                c.ddd.as_deref().unwrap_or("-"),
                c.telefone.as_deref().unwrap_or("-"),
            )?;
        }
        writeln!(self.output, "{RULE}")
    }

    async fn delete(&mut self) -> io::Result<()> {
        writeln!(self.output, "VAMOS EXCLUIR UM TELEFONE DO CLIENTE")?;
        if !self.show_phones("excluir").await? {
            return Ok(());
        }
        let Some(id) = self.read_id("Insira o id do telefone que será excluído: ")? else {
            return Ok(());
        };
        match self.store.delete_phone(id).await {
            Ok(()) => writeln!(self.output, "Telefone excluído com sucesso!"),
            Err(err) => self.report("excluir", err),
        }
    }
}
