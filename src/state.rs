// `std::sync::Arc` permite compartilhar o repositório entre todas as
// requisições; clonar o `AppState` só incrementa a contagem de referências.
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{DadosImovel, Imovel};

// Operações sobre a tabela `imoveis`.
// Cada método obtém sua própria conexão e executa um único comando SQL.
// Os handlers só conhecem este trait, o que permite trocar o MySQL por
// uma implementação em memória nos testes.
#[async_trait]
pub trait ImovelStore: Send + Sync {
    async fn listar(&self) -> Result<Vec<Imovel>, ApiError>;

    async fn buscar(&self, id: i64) -> Result<Option<Imovel>, ApiError>;

    // Devolve o id gerado pelo banco
    async fn inserir(&self, dados: &DadosImovel) -> Result<i64, ApiError>;

    // Não verifica se o id existe
    async fn atualizar(&self, id: i64, dados: &DadosImovel) -> Result<(), ApiError>;

    // Não verifica se o id existe
    async fn remover(&self, id: i64) -> Result<(), ApiError>;

    async fn listar_por_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, ApiError>;

    async fn listar_por_cidade(&self, cidade: &str) -> Result<Vec<Imovel>, ApiError>;

    // Verifica se o banco responde
    async fn ping(&self) -> Result<(), ApiError>;
}

// `AppState` agrupa o estado compartilhado da aplicação.
// A configuração já foi consumida na criação do repositório; nada aqui é mutável.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ImovelStore>,
}

impl AppState {
    pub fn new<S: ImovelStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
