use crate::models::{CustomerView, PhoneRecord, TransactionKind, TransactionRecord};

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
{body}
<p><a href="/">Voltar</a></p>
</body>
</html>"#,
        title = escape(title),
    )
}

fn or_blank(value: Option<&str>) -> String {
    value.map(escape).unwrap_or_default()
}

pub fn index_page() -> String {
    let kinds: String = TransactionKind::ALL
        .iter()
        .map(|kind| format!(r#"<option value="{0}">{0}</option>"#, kind.as_str()))
        .collect();
    let body = format!(
        r#"<h2>Inserir cliente</h2>
<form method="post" action="/clientes">
  <label>CPF <input name="cpf" maxlength="11" required></label>
  <label>Nome <input name="nome" required></label>
  <button type="submit">Inserir</button>
</form>
<h2>Consultar clientes</h2>
<form method="get" action="/clientes">
  <label>CPF (em branco para todos) <input name="cpf" maxlength="11"></label>
  <button type="submit">Consultar</button>
</form>
<h2>Editar ou excluir telefone</h2>
<form method="get" action="/telefones">
  <label>CPF <input name="cpf" maxlength="11" required></label>
  <button type="submit">Buscar telefones</button>
</form>
<h2>Registrar transação</h2>
<form method="post" action="/transacoes">
  <label>Conta <input name="num_conta" required></label>
  <label>Valor <input name="valor" required></label>
  <label>Tipo <select name="tipo">{kinds}</select></label>
  <button type="submit">Registrar</button>
</form>"#
    );
    layout("Cadastro bancário", &body)
}

pub fn customers_page(customers: &[CustomerView]) -> String {
    if customers.is_empty() {
        return layout("Clientes", "<p>Nenhum resultado encontrado.</p>");
    }
    let rows: String = customers
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&c.cpf),
                escape(&c.nome),
                or_blank(c.num_agencia.as_deref()),
                c.num_conta.map(|n| n.to_string()).unwrap_or_default(),
                or_blank(c.ddd.as_deref()),
                or_blank(c.telefone.as_deref()),
            )
        })
        .collect();
    let body = format!(
        "<table>\n<tr><th>CPF</th><th>Nome</th><th>Agência</th><th>Conta</th><th>DDD</th><th>Telefone</th></tr>\n{rows}</table>"
    );
    layout("Clientes", &body)
}

pub fn phones_page(cpf: &str, phones: &[PhoneRecord]) -> String {
    if phones.is_empty() {
        return layout(
            "Telefones",
            "<p>Nenhum telefone encontrado para este CPF.</p>",
        );
    }
    let rows: String = phones
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{id}</td><td>{nome}</td><td>({ddd}) {numero}</td>
<td><form method="post" action="/telefones/{id}/editar">
<input name="ddd" value="{ddd}" size="3" required>
<input name="numero" value="{numero}" required>
<button type="submit">Salvar</button></form></td>
<td><form method="post" action="/telefones/{id}/excluir">
<button type="submit">Excluir</button></form></td></tr>
"#,
                id = p.id,
                nome = escape(&p.nome),
                ddd = escape(&p.ddd),
                numero = escape(&p.numero),
            )
        })
        .collect();
    let body = format!(
        "<p>CPF {}</p>\n<table>\n<tr><th>ID</th><th>Nome</th><th>Telefone</th><th></th><th></th></tr>\n{rows}</table>",
        escape(cpf)
    );
    layout("Telefones", &body)
}

pub fn transaction_page(transaction: &TransactionRecord) -> String {
    let body = format!(
        "<p>{} de {} na conta {} registrado em {}.</p>",
        escape(&transaction.tipo),
        transaction.valor,
        transaction.num_conta,
        transaction.data_hora.format("%d/%m/%Y %H:%M:%S"),
    );
    layout("Transação registrada", &body)
}

pub fn message_page(title: &str, message: &str) -> String {
    layout(title, &format!("<p>{}</p>", escape(message)))
}

pub fn error_page(message: &str) -> String {
    message_page("Erro", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_text_is_escaped() {
        let page = message_page("Ok", "<script>alert('x')</script> & \"y\"");
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;y&quot;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn missing_join_columns_render_blank() {
        let page = customers_page(&[CustomerView {
            cpf: "12345678901".to_string(),
            nome: "Ana".to_string(),
            num_agencia: None,
            num_conta: None,
            ddd: None,
            telefone: None,
        }]);
        assert!(page.contains("<td>12345678901</td><td>Ana</td><td></td><td></td><td></td><td></td>"));
    }

    #[test]
    fn index_lists_every_transaction_kind() {
        let page = index_page();
        for kind in TransactionKind::ALL {
            assert!(page.contains(kind.as_str()));
        }
    }

    #[test]
    fn empty_phone_list_has_a_message() {
        assert!(phones_page("12345678901", &[]).contains("Nenhum telefone encontrado"));
    }
}
