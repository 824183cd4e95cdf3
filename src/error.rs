// Erros devolvidos pelos handlers HTTP.
// Toda resposta de erro tem o formato { "erro": "<mensagem>" }.
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Banco inacessível ou credenciais recusadas
    #[error("Erro ao conectar ao banco")]
    Conexao(#[source] sqlx::Error),

    #[error("Imóvel não encontrado")]
    NaoEncontrado,

    /// Falha ao executar o comando SQL depois de conectado
    #[error("Erro ao executar consulta")]
    Consulta(#[source] sqlx::Error),

    /// Corpo JSON malformado, campo faltando ou parâmetro de rota inválido
    #[error("{0}")]
    Requisicao(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conexao(_) | ApiError::Consulta(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NaoEncontrado => StatusCode::NOT_FOUND,
            ApiError::Requisicao(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "erro": self.to_string() }))).into_response()
    }
}
