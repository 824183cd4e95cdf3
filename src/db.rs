// Conexão com o banco MySQL usando SQLx e o repositório de imóveis.
use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow, MySqlSslMode};
use sqlx::{Connection, Row};
use tracing::{debug, error, info, warn};

use crate::config::DbConfig;
use crate::error::ApiError;
use crate::models::{COLUNAS, DadosImovel, Imovel, ImovelTupla};
use crate::state::ImovelStore;

// Monta as opções de conexão a partir da configuração.
// Nenhuma conexão é aberta aqui, então um banco fora do ar só aparece
// como erro nas requisições, sem derrubar o servidor.
pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    // Com certificado informado, a conexão exige TLS validando essa CA
    match &config.ssl_ca_path {
        Some(ca) => options.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca(ca),
        None => options,
    }
}

// Implementação de `ImovelStore` sobre o MySQL.
// Cada requisição abre sua própria conexão e a fecha ao terminar.
#[derive(Clone)]
pub struct MySqlStore {
    options: MySqlConnectOptions,
}

impl MySqlStore {
    pub fn new(options: MySqlConnectOptions) -> Self {
        info!(
            "Banco MySQL: {}@{}:{}/{}",
            options.get_username(),
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or("")
        );
        Self { options }
    }

    // Abre uma conexão nova, sem nova tentativa em caso de falha.
    // O erro do driver é registrado como veio.
    async fn conectar(&self) -> Result<MySqlConnection, ApiError> {
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                error!("Erro ao conectar ao banco: {}", e);
                ApiError::Conexao(e)
            })
    }

    async fn listar_onde(&self, coluna: &'static str, valor: &str) -> Result<Vec<Imovel>, ApiError> {
        let mut conn = self.conectar().await?;
        let sql = format!("{} WHERE {} = ?", select_imoveis(), coluna);

        let linhas = sqlx::query(&sql).bind(valor).fetch_all(&mut conn).await;
        fechar(conn).await;
        let linhas = linhas.map_err(erro_consulta)?;

        debug!("{} imóveis com {} = {:?}", linhas.len(), coluna, valor);
        mapear_linhas(&linhas)
    }
}

#[async_trait]
impl ImovelStore for MySqlStore {
    async fn listar(&self) -> Result<Vec<Imovel>, ApiError> {
        let mut conn = self.conectar().await?;

        let linhas = sqlx::query(&select_imoveis()).fetch_all(&mut conn).await;
        fechar(conn).await;

        mapear_linhas(&linhas.map_err(erro_consulta)?)
    }

    async fn buscar(&self, id: i64) -> Result<Option<Imovel>, ApiError> {
        let mut conn = self.conectar().await?;
        let sql = format!("{} WHERE id = ?", select_imoveis());

        let linha = sqlx::query(&sql).bind(id).fetch_optional(&mut conn).await;
        fechar(conn).await;

        linha
            .map_err(erro_consulta)?
            .as_ref()
            .map(mapear_linha)
            .transpose()
            .map_err(erro_consulta)
    }

    async fn inserir(&self, dados: &DadosImovel) -> Result<i64, ApiError> {
        let mut conn = self.conectar().await?;

        let resultado = sqlx::query(
            "INSERT INTO imoveis (logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&dados.logradouro)
        .bind(&dados.tipo_logradouro)
        .bind(&dados.bairro)
        .bind(&dados.cidade)
        .bind(&dados.cep)
        .bind(&dados.tipo)
        .bind(dados.valor)
        .bind(&dados.data_aquisicao)
        .execute(&mut conn)
        .await;
        fechar(conn).await;
        let resultado = resultado.map_err(erro_consulta)?;

        let id = id_para_i64(resultado.last_insert_id(), "id").map_err(erro_consulta)?;
        info!("Imóvel {} inserido", id);
        Ok(id)
    }

    async fn atualizar(&self, id: i64, dados: &DadosImovel) -> Result<(), ApiError> {
        let mut conn = self.conectar().await?;

        let resultado = sqlx::query(
            "UPDATE imoveis SET logradouro = ?, tipo_logradouro = ?, bairro = ?, cidade = ?, \
             cep = ?, tipo = ?, valor = ?, data_aquisicao = ? WHERE id = ?",
        )
        .bind(&dados.logradouro)
        .bind(&dados.tipo_logradouro)
        .bind(&dados.bairro)
        .bind(&dados.cidade)
        .bind(&dados.cep)
        .bind(&dados.tipo)
        .bind(dados.valor)
        .bind(&dados.data_aquisicao)
        .bind(id)
        .execute(&mut conn)
        .await;
        fechar(conn).await;
        let resultado = resultado.map_err(erro_consulta)?;

        info!("Imóvel {} atualizado ({} linhas)", id, resultado.rows_affected());
        Ok(())
    }

    async fn remover(&self, id: i64) -> Result<(), ApiError> {
        let mut conn = self.conectar().await?;

        let resultado = sqlx::query("DELETE FROM imoveis WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await;
        fechar(conn).await;
        let resultado = resultado.map_err(erro_consulta)?;

        info!("Imóvel {} removido ({} linhas)", id, resultado.rows_affected());
        Ok(())
    }

    async fn listar_por_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, ApiError> {
        self.listar_onde("tipo", tipo).await
    }

    async fn listar_por_cidade(&self, cidade: &str) -> Result<Vec<Imovel>, ApiError> {
        self.listar_onde("cidade", cidade).await
    }

    async fn ping(&self) -> Result<(), ApiError> {
        let mut conn = self.conectar().await?;
        let resultado = conn.ping().await;
        fechar(conn).await;
        resultado.map_err(erro_consulta)
    }
}

// Encerra a conexão depois do comando, tenha ele dado certo ou não
async fn fechar(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        warn!("Erro ao fechar conexão: {}", e);
    }
}

// SELECT com as colunas listadas explicitamente, na ordem de `COLUNAS`
fn select_imoveis() -> String {
    format!("SELECT {} FROM imoveis", COLUNAS.join(", "))
}

fn erro_consulta(e: sqlx::Error) -> ApiError {
    error!("Erro ao executar consulta: {}", e);
    ApiError::Consulta(e)
}

fn mapear_linhas(linhas: &[MySqlRow]) -> Result<Vec<Imovel>, ApiError> {
    linhas
        .iter()
        .map(mapear_linha)
        .collect::<Result<_, _>>()
        .map_err(erro_consulta)
}

// Lê cada coluna pelo nome e monta a tupla na ordem fixa da tabela
fn mapear_linha(row: &MySqlRow) -> Result<Imovel, sqlx::Error> {
    let tupla: ImovelTupla = (
        ler_id(row, COLUNAS[0])?,
        row.try_get(COLUNAS[1])?,
        row.try_get(COLUNAS[2])?,
        row.try_get(COLUNAS[3])?,
        row.try_get(COLUNAS[4])?,
        row.try_get(COLUNAS[5])?,
        row.try_get(COLUNAS[6])?,
        ler_valor(row, COLUNAS[7])?,
        ler_data(row, COLUNAS[8])?,
    );
    Ok(Imovel::from(tupla))
}

// INT ou INT UNSIGNED
fn ler_id(row: &MySqlRow, coluna: &str) -> Result<i64, sqlx::Error> {
    row.try_get::<i64, _>(coluna).or_else(|_| {
        let id: u64 = row.try_get(coluna)?;
        id_para_i64(id, coluna)
    })
}

// Ids acima de i64::MAX são erro, nunca truncados
fn id_para_i64(id: u64, coluna: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(id).map_err(|e| sqlx::Error::ColumnDecode {
        index: coluna.to_string(),
        source: Box::new(e),
    })
}

// DOUBLE/FLOAT ou DECIMAL
fn ler_valor(row: &MySqlRow, coluna: &str) -> Result<f64, sqlx::Error> {
    if let Ok(valor) = row.try_get::<f64, _>(coluna) {
        return Ok(valor);
    }

    let decimal: BigDecimal = row.try_get(coluna)?;
    decimal.to_f64().ok_or_else(|| sqlx::Error::ColumnDecode {
        index: coluna.to_string(),
        source: format!("{decimal} não cabe em f64").into(),
    })
}

// VARCHAR ou DATE, sempre devolvido como "AAAA-MM-DD" no segundo caso
fn ler_data(row: &MySqlRow, coluna: &str) -> Result<String, sqlx::Error> {
    if let Ok(texto) = row.try_get::<String, _>(coluna) {
        return Ok(texto);
    }

    let data: NaiveDate = row.try_get(coluna)?;
    Ok(data.format("%Y-%m-%d").to_string())
}
