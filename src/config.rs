// Configuração da aplicação lida das variáveis de ambiente.
// É carregada uma única vez no `main` e repassada para quem precisa dela.
use std::env;
use std::path::PathBuf;

use thiserror::Error;

// Valores padrão quando a variável não existe
const PADRAO_DB_HOST: &str = "localhost";
const PADRAO_DB_NAME: &str = "db_imobiliaria";
const PADRAO_DB_PORT: u16 = 3306;
const PADRAO_APP_HOST: &str = "127.0.0.1";
const PADRAO_APP_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("valor inválido para {chave}: {valor:?}")]
    PortaInvalida { chave: &'static str, valor: String },
}

// Parâmetros de conexão com o MySQL
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    // Certificado da autoridade (CA) para conexão TLS, opcional
    pub ssl_ca_path: Option<PathBuf>,
}

// Endereço onde o servidor HTTP escuta
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Lê a configuração do ambiente do processo (e do arquivo `.env`, se existir).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|chave| env::var(chave).ok())
    }

    /// Monta a configuração a partir de uma função de busca de chaves.
    /// Variáveis vazias contam como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ler = |chave: &str| lookup(chave).filter(|v| !v.is_empty());

        let db = DbConfig {
            host: ler("DB_HOST").unwrap_or_else(|| PADRAO_DB_HOST.to_string()),
            user: ler("DB_USER").unwrap_or_default(),
            password: ler("DB_PASSWORD").unwrap_or_default(),
            database: ler("DB_NAME").unwrap_or_else(|| PADRAO_DB_NAME.to_string()),
            port: ler_porta("DB_PORT", ler("DB_PORT"), PADRAO_DB_PORT)?,
            ssl_ca_path: ler("SSL_CA_PATH").map(PathBuf::from),
        };

        let server = ServerConfig {
            host: ler("APP_HOST").unwrap_or_else(|| PADRAO_APP_HOST.to_string()),
            port: ler_porta("APP_PORT", ler("APP_PORT"), PADRAO_APP_PORT)?,
        };

        Ok(Self { db, server })
    }
}

fn ler_porta(chave: &'static str, valor: Option<String>, padrao: u16) -> Result<u16, ConfigError> {
    match valor {
        None => Ok(padrao),
        Some(valor) => valor
            .trim()
            .parse()
            .map_err(|_| ConfigError::PortaInvalida { chave, valor }),
    }
}
