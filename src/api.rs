//! Typed client for the recipe backend.
//!
//! Every call goes through [`ApiClient::send`], which attaches the bearer
//! token, maps non-success statuses to [`ApiError`] and clears the session on
//! a 401. Nothing is retried.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{use_config, AppConfig};
use crate::error::ApiError;
use crate::models::{
    AddRecipeToList, AuthResponse, ImportRequest, LoginRequest, NewShoppingItem,
    NewShoppingList, Recipe, RecipePayload, RegisterRequest, ShoppingItemUpdate, ShoppingList,
};
use crate::session::{use_session, Session};

/// Sections of the home page feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSection {
    Favorites,
    Suggestions,
    Trending,
}

impl FeedSection {
    fn path(self) -> &'static str {
        match self {
            FeedSection::Favorites => "/home/favorites",
            FeedSection::Suggestions => "/home/suggestions",
            FeedSection::Trending => "/home/trending",
        }
    }

    /// Only AI-generated sections can be regenerated.
    fn refresh_path(self) -> Option<&'static str> {
        match self {
            FeedSection::Favorites => None,
            FeedSection::Suggestions => Some("/home/suggestions/refresh"),
            FeedSection::Trending => Some("/home/trending/refresh"),
        }
    }
}

/// `Send + Sync`; pages keep it in a `StoredValue`. A `reqwest::Client` is
/// built per request (on wasm it wraps `fetch`).
#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    session: Session,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Session) -> Self {
        Self { config, session }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = reqwest::Client::new().request(method, self.config.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        self.check(status, body)
    }

    /// Maps a raw response to the body text or an error. A 401 ends the
    /// session before the error reaches the caller.
    pub fn check(&self, status: u16, body: String) -> Result<String, ApiError> {
        if (200..300).contains(&status) {
            return Ok(body);
        }
        let err = ApiError::from_status(status, &body);
        if err == ApiError::Unauthorized {
            self.session.expire();
        } else {
            warn!("Backend answered {}: {}", status, err);
        }
        Err(err)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let body = self.send(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let body = self
            .send(self.request(Method::POST, path).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST whose response body is only a status message.
    async fn post_unit<B: Serialize>(&self, path: &str, payload: Option<&B>) -> Result<(), ApiError> {
        debug!("POST {}", path);
        let builder = self.request(Method::POST, path);
        let builder = match payload {
            Some(p) => builder.json(p),
            None => builder,
        };
        self.send(builder).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", path);
        self.send(self.request(Method::DELETE, path)).await.map(|_| ())
    }

    // -- Auth --

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/register", request).await
    }

    /// Seeds the account with starter content after the first login.
    pub async fn complete_onboarding(&self) -> Result<(), ApiError> {
        self.post_unit::<()>("/onboarding/complete", None).await
    }

    // -- Recipes --

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.get("/recipes").await
    }

    /// The backend has no single-recipe GET; the list is filtered client-side.
    pub async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, ApiError> {
        Ok(self.list_recipes().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        self.post("/recipes", payload).await
    }

    pub async fn update_recipe(&self, id: &str, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        let path = format!("/recipes/{}", id);
        debug!("PUT {}", path);
        let body = self
            .send(self.request(Method::PUT, &path).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/recipes/{}", id)).await
    }

    /// Copies a suggested recipe into the user's own collection.
    pub async fn copy_recipe(&self, id: &str) -> Result<(), ApiError> {
        self.post_unit::<()>(&format!("/recipes/{}/copy", id), None).await
    }

    /// Sends free text to the backend parser and returns the parsed recipe.
    pub async fn import_recipe(&self, text: &str) -> Result<Recipe, ApiError> {
        let request = ImportRequest {
            clipboard_text: text.to_string(),
        };
        self.post("/recipes/import-from-clipboard", &request).await
    }

    pub async fn ingredient_suggestions(&self, query: &str) -> Result<Vec<String>, ApiError> {
        debug!("GET /ingredients/suggestions query={}", query);
        let builder = self
            .request(Method::GET, "/ingredients/suggestions")
            .query(&[("query", query)]);
        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // -- Home feed --

    pub async fn feed(&self, section: FeedSection) -> Result<Vec<Recipe>, ApiError> {
        self.get(section.path()).await
    }

    /// Regenerates a feed section. Favorites cannot be regenerated and are
    /// simply refetched.
    pub async fn refresh_feed(&self, section: FeedSection) -> Result<Vec<Recipe>, ApiError> {
        match section.refresh_path() {
            Some(path) => {
                debug!("POST {}", path);
                let body = self.send(self.request(Method::POST, path)).await?;
                Ok(serde_json::from_str(&body)?)
            }
            None => self.feed(section).await,
        }
    }

    // -- Shopping lists --

    pub async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>, ApiError> {
        self.get("/shopping-lists").await
    }

    pub async fn find_shopping_list(&self, id: &str) -> Result<Option<ShoppingList>, ApiError> {
        Ok(self
            .list_shopping_lists()
            .await?
            .into_iter()
            .find(|l| l.id == id))
    }

    pub async fn create_shopping_list(&self, name: &str) -> Result<ShoppingList, ApiError> {
        let request = NewShoppingList {
            name: name.to_string(),
        };
        self.post("/shopping-lists", &request).await
    }

    pub async fn delete_shopping_list(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/shopping-lists/{}", id)).await
    }

    /// Expands a recipe into list items. Scaling and merging happen server-side.
    pub async fn add_recipe_to_list(
        &self,
        list_id: &str,
        request: &AddRecipeToList,
    ) -> Result<(), ApiError> {
        self.post_unit(&format!("/shopping-lists/{}/add-recipe", list_id), Some(request))
            .await
    }

    /// Adds several recipes one call at a time, stopping at the first failure.
    pub async fn add_recipes_to_list(
        &self,
        list_id: &str,
        requests: &[AddRecipeToList],
    ) -> Result<(), ApiError> {
        for request in requests {
            self.add_recipe_to_list(list_id, request).await?;
        }
        Ok(())
    }

    /// Adds a recipe to the user's quick list. Returns `false` when the
    /// account has no quick list.
    pub async fn add_to_quick_list(&self, recipe_id: &str, portions: u32) -> Result<bool, ApiError> {
        let lists = self.list_shopping_lists().await?;
        let Some(quick) = crate::shopping::find_quick_list(&lists) else {
            warn!("No quick list found for this account");
            return Ok(false);
        };
        let request = AddRecipeToList {
            recipe_id: recipe_id.to_string(),
            portions,
        };
        self.add_recipe_to_list(&quick.id, &request).await?;
        Ok(true)
    }

    pub async fn add_item(&self, list_id: &str, item: &NewShoppingItem) -> Result<(), ApiError> {
        self.post_unit(&format!("/shopping-lists/{}/add-item", list_id), Some(item))
            .await
    }

    pub async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        update: &ShoppingItemUpdate,
    ) -> Result<(), ApiError> {
        let path = format!("/shopping-lists/{}/items/{}", list_id, item_id);
        debug!("PUT {}", path);
        self.send(self.request(Method::PUT, &path).json(update))
            .await
            .map(|_| ())
    }

    pub async fn set_item_bought(
        &self,
        list_id: &str,
        item_id: &str,
        bought: bool,
    ) -> Result<(), ApiError> {
        let update = ShoppingItemUpdate {
            bought: Some(bought),
            ..Default::default()
        };
        self.update_item(list_id, item_id, &update).await
    }

    pub async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/shopping-lists/{}/items/{}", list_id, item_id))
            .await
    }

    pub async fn clear_bought(&self, list_id: &str) -> Result<(), ApiError> {
        self.post_unit::<()>(&format!("/shopping-lists/{}/clear-bought", list_id), None)
            .await
    }
}

/// Client bound to the session and config in context.
pub fn use_api() -> ApiClient {
    ApiClient::new(use_config(), use_session())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use leptos::prelude::Owner;

    use super::*;
    use crate::session::{MemoryStore, StoredSession};

    fn signed_in_client() -> (Owner, ApiClient, Session) {
        let owner = Owner::new();
        owner.set();
        let session = Session::restore(Arc::new(MemoryStore::default()));
        session.login(StoredSession {
            token: "jwt".to_string(),
            name: "Ana".to_string(),
        });
        let client = ApiClient::new(AppConfig::new("http://localhost:8001", "info"), session.clone());
        (owner, client, session)
    }

    #[test]
    fn test_success_passes_body_through() {
        let (_owner, client, session) = signed_in_client();
        let body = client.check(200, "[]".to_string()).unwrap();
        assert_eq!(body, "[]");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let (_owner, client, session) = signed_in_client();
        let err = client
            .check(401, r#"{"detail": "Token inválido"}"#.to_string())
            .unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_rejection_keeps_session() {
        let (_owner, client, session) = signed_in_client();
        let err = client
            .check(404, r#"{"detail": "Lista não encontrada"}"#.to_string())
            .unwrap_err();
        assert_eq!(err.user_message("Erro"), "Lista não encontrada");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_feed_paths() {
        assert_eq!(FeedSection::Trending.path(), "/home/trending");
        assert_eq!(FeedSection::Favorites.refresh_path(), None);
        assert_eq!(
            FeedSection::Suggestions.refresh_path(),
            Some("/home/suggestions/refresh")
        );
    }
}
