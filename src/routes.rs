// Rotas HTTP da API e seus handlers.
// Cada handler usa o repositório do `AppState` e executa um único comando.
use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::models::{DadosImovel, Imovel, ListaImoveis};
use crate::state::AppState;

// Monta o `Router` com todas as rotas e o estado compartilhado
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/imoveis", get(listar_imoveis).post(adicionar_imovel))
        .route(
            "/imoveis/{id}",
            get(buscar_imovel)
                .put(atualizar_imovel)
                .delete(remover_imovel),
        )
        .route("/imoveis/tipo/{tipo}", get(listar_por_tipo))
        .route("/imoveis/cidade/{cidade}", get(listar_por_cidade))
        .with_state(state)
}

// Rejeições dos extratores viram 400 no formato { "erro": ... }
fn id_da_rota(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::Requisicao(e.body_text()))
}

// Guarda o objeto recebido para devolvê-lo intacto (números e chaves extras
// inclusive) e extrai dele os campos que vão para o banco
fn corpo_json(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(Map<String, Value>, DadosImovel), ApiError> {
    let Json(valor) = payload.map_err(|e| ApiError::Requisicao(e.body_text()))?;

    let Value::Object(objeto) = valor else {
        return Err(ApiError::Requisicao("o corpo deve ser um objeto JSON".to_string()));
    };
    let dados: DadosImovel = serde_json::from_value(Value::Object(objeto.clone()))
        .map_err(|e| ApiError::Requisicao(e.to_string()))?;

    Ok((objeto, dados))
}

fn com_id(mut objeto: Map<String, Value>, id: i64) -> Json<Value> {
    objeto.insert("id".to_string(), json!(id));
    Json(Value::Object(objeto))
}

// GET /
async fn index() -> Json<Value> {
    Json(json!({ "msg": "API Imobiliária rodando" }))
}

// GET /health
async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

// GET /imoveis
async fn listar_imoveis(State(state): State<AppState>) -> Result<Json<ListaImoveis>, ApiError> {
    let imoveis = state.store.listar().await?;
    Ok(Json(ListaImoveis { imoveis }))
}

// GET /imoveis/{id}
// Responde o objeto direto, sem a chave "imoveis"
async fn buscar_imovel(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Imovel>, ApiError> {
    let id = id_da_rota(path)?;

    match state.store.buscar(id).await? {
        Some(imovel) => Ok(Json(imovel)),
        None => Err(ApiError::NaoEncontrado),
    }
}

// POST /imoveis
// Devolve o próprio payload com o id gerado pelo banco
async fn adicionar_imovel(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (objeto, dados) = corpo_json(payload)?;
    let id = state.store.inserir(&dados).await?;

    Ok((StatusCode::CREATED, com_id(objeto, id)))
}

// PUT /imoveis/{id}
// Substitui o registro inteiro; responde 200 mesmo que o id não exista
async fn atualizar_imovel(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = id_da_rota(path)?;
    let (objeto, dados) = corpo_json(payload)?;
    state.store.atualizar(id, &dados).await?;

    Ok(com_id(objeto, id))
}

// DELETE /imoveis/{id}
// 204 sem corpo, exista ou não o registro
async fn remover_imovel(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = id_da_rota(path)?;
    state.store.remover(id).await?;

    info!("DELETE /imoveis/{}", id);
    Ok(StatusCode::NO_CONTENT)
}

// GET /imoveis/tipo/{tipo}
async fn listar_por_tipo(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
) -> Result<Json<ListaImoveis>, ApiError> {
    let mut imoveis = state.store.listar_por_tipo(&tipo).await?;

    // O collation padrão do MySQL ignora maiúsculas; a comparação aqui é exata
    imoveis.retain(|imovel| imovel.dados.tipo == tipo);
    Ok(Json(ListaImoveis { imoveis }))
}

// GET /imoveis/cidade/{cidade}
async fn listar_por_cidade(
    State(state): State<AppState>,
    Path(cidade): Path<String>,
) -> Result<Json<ListaImoveis>, ApiError> {
    let mut imoveis = state.store.listar_por_cidade(&cidade).await?;

    imoveis.retain(|imovel| imovel.dados.cidade == cidade);
    Ok(Json(ListaImoveis { imoveis }))
}
