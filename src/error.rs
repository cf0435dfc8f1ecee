use serde::Deserialize;
use thiserror::Error;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered 401. The session has already been cleared.
    #[error("Session expired")]
    Unauthorized,

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Shape of the backend's error bodies. FastAPI uses `detail`, a few
/// endpoints answer with `message`.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-success status from the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        ApiError::Rejected {
            status,
            message: extract_message(body).unwrap_or_default(),
        }
    }

    /// Text to show in a toast. Backend messages are shown verbatim; anything
    /// else falls back to the caller's generic text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Unauthorized => "Sessão expirada, entre novamente".to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(s)) => Some(s),
        // validation errors come back as a list of objects with `msg`
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<String> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()).map(String::from))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => parsed.message,
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Local validation failure. Raised before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Preencha todos os campos do ingrediente")]
    IncompleteIngredient,

    #[error("Quantidade inválida")]
    InvalidQuantity,

    #[error("Dê um nome à receita")]
    MissingRecipeName,

    #[error("O número de porções deve ser pelo menos 1")]
    InvalidPortions,

    #[error("Adicione pelo menos um ingrediente")]
    NoIngredients,

    #[error("Cole um texto para importar")]
    EmptyImportText,

    #[error("Preencha todos os campos")]
    IncompleteItem,

    #[error("Digite um nome para a lista")]
    MissingListName,

    #[error("Selecione pelo menos uma receita")]
    NoRecipesSelected,

    #[error("A lista rápida não pode ser deletada")]
    QuickListNotDeletable,

    #[error("Preencha usuário e senha")]
    MissingCredentials,
}

/// Browser storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Local storage unavailable")]
    Unavailable,

    #[error("Storage write failed for key {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized() {
        assert_eq!(ApiError::from_status(401, "{}"), ApiError::Unauthorized);
    }

    #[test]
    fn test_detail_is_shown_verbatim() {
        let err = ApiError::from_status(400, r#"{"detail": "Não é possível deletar a lista rápida"}"#);
        assert_eq!(
            err.user_message("Erro ao deletar lista"),
            "Não é possível deletar a lista rápida"
        );
    }

    #[test]
    fn test_message_field_is_used() {
        let err = ApiError::from_status(409, r#"{"message": "Receita já existe"}"#);
        assert_eq!(err.user_message("x"), "Receita já existe");
    }

    #[test]
    fn test_validation_detail_list_is_joined() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.user_message("x"), "field required");
    }

    #[test]
    fn test_unparseable_body_uses_fallback() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 500,
                message: String::new()
            }
        );
        assert_eq!(err.user_message("Erro ao salvar receita"), "Erro ao salvar receita");
    }

    #[test]
    fn test_network_error_uses_fallback() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Erro ao carregar receitas"), "Erro ao carregar receitas");
    }
}
