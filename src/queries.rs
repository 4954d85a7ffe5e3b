pub mod sql {
    pub const PING_QUERY: &str = "SELECT 1;";
    pub const INSERT_CUSTOMER_QUERY: &str = r#"
      INSERT INTO cliente (cpf, nome)
      VALUES ($1, $2);
    "#;
    pub const INSERT_ACCOUNT_QUERY: &str = r#"
      INSERT INTO conta_bancaria (cpf_cliente, num_agencia, saldo)
      VALUES ($1, $2, 0);
    "#;
    pub const LIST_PHONES_QUERY: &str = r#"
      SELECT t.id, c.nome, t.ddd, t.numero
      FROM cliente c
          JOIN telefone t ON c.cpf = t.cpf_cliente
      WHERE c.cpf = $1
      ORDER BY t.id;
    "#;
    pub const UPDATE_PHONE_QUERY: &str = r#"
      UPDATE telefone
      SET ddd = $1, numero = $2
      WHERE id = $3;
    "#;
    pub const DELETE_PHONE_QUERY: &str = r#"
      DELETE FROM telefone
      WHERE id = $1;
    "#;
    pub const QUERY_CUSTOMERS_QUERY: &str = r#"
      SELECT c.cpf, c.nome, cb.num_agencia, cb.numero AS num_conta, t.ddd, t.numero AS telefone
      FROM cliente c
          LEFT JOIN conta_bancaria cb ON c.cpf = cb.cpf_cliente
          LEFT JOIN telefone t ON c.cpf = t.cpf_cliente
      WHERE $1::varchar IS NULL OR c.cpf = $1::varchar
      ORDER BY c.cpf, cb.numero, t.id;
    "#;
    pub const INSERT_TRANSACTION_QUERY: &str = r#"
      INSERT INTO transacao (num_conta, valor, tipo, data_hora)
      VALUES ($1, $2, $3, NOW())
      RETURNING num_conta, valor, tipo, data_hora;
    "#;
}
