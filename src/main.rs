// API Imobiliária: CRUD da tabela `imoveis` em MySQL usando Axum e SQLx.

// conexão com o módulo de configuração (variáveis de ambiente)
mod config;
use config::Config;

// conexão com o módulo de banco de dados
mod db;
use db::{MySqlStore, connect_options};

mod error;
mod models;

// conexão com o módulo de rotas HTTP
mod routes;

// conexão com o módulo de estado compartilhado
mod state;
use state::AppState;

use std::process::ExitCode;

//Cors e logs de requisição
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tracing::{error, info};

// Função principal + inicialização assíncrona (tokio)
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .init();

    // A configuração é lida uma única vez e repassada adiante
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuração inválida: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Nenhuma conexão é aberta aqui; cada requisição abre e fecha a sua
    let state = AppState::new(MySqlStore::new(connect_options(&config.db)));

    // Criar uma camada CORS permissiva
    let cors = CorsLayer::new()
        .allow_origin(Any) // Permite qualquer origem
        .allow_methods(Any) // Permite qualquer método (GET, POST, etc.)
        .allow_headers(Any); // Permite qualquer cabeçalho

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Não foi possível escutar em {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Servidor rodando em: http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Servidor encerrado com erro: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
