// Estruturas para montar e desmontar os JSONs de imóveis
use serde::{Deserialize, Serialize};

// Colunas da tabela `imoveis`, na ordem em que aparecem no JSON.
// As consultas selecionam exatamente esta lista.
pub const COLUNAS: [&str; 9] = [
    "id",
    "logradouro",
    "tipo_logradouro",
    "bairro",
    "cidade",
    "cep",
    "tipo",
    "valor",
    "data_aquisicao",
];

// Uma linha da tabela, com os valores na mesma ordem de `COLUNAS`
pub type ImovelTupla = (i64, String, String, String, String, String, String, f64, String);

// Campos enviados pelo cliente no POST e no PUT (tudo menos o id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DadosImovel {
    pub logradouro: String,
    pub tipo_logradouro: String,
    pub bairro: String,
    pub cidade: String,
    // CEP fica como texto: pode ter hífen e zeros à esquerda
    pub cep: String,
    pub tipo: String,
    pub valor: f64,
    // Data repassada como texto, sem interpretação
    pub data_aquisicao: String,
}

// Imóvel completo, como é devolvido pela API.
// `flatten` mantém o id como primeiro campo seguido dos demais.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imovel {
    pub id: i64,
    #[serde(flatten)]
    pub dados: DadosImovel,
}

// Mapeamento posicional: cada posição da linha vira um campo
impl From<ImovelTupla> for Imovel {
    fn from(linha: ImovelTupla) -> Self {
        let (id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao) =
            linha;
        Self {
            id,
            dados: DadosImovel {
                logradouro,
                tipo_logradouro,
                bairro,
                cidade,
                cep,
                tipo,
                valor,
                data_aquisicao,
            },
        }
    }
}

// Resposta das rotas de listagem: { "imoveis": [...] }
#[derive(Debug, Serialize)]
pub struct ListaImoveis {
    pub imoveis: Vec<Imovel>,
}
