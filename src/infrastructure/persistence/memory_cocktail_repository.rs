//! Process-local cocktail repository.
//!
//! Used when no database is configured and by the integration tests. Data is
//! lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::domain::entities::{
    COCKTAIL_NOT_FOUND_MESSAGE, Cocktail, CocktailUpdate, LikeToggle, NewCocktail,
};
use crate::domain::repositories::CocktailRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    last_id: i64,
    cocktails: BTreeMap<i64, Cocktail>,
    /// Members who like each cocktail, keyed by cocktail id.
    likes: BTreeMap<i64, BTreeSet<i64>>,
}

impl Store {
    fn with_like_count(&self, cocktail: &Cocktail) -> Cocktail {
        let like_count = self.likes.get(&cocktail.id).map_or(0, |m| m.len() as i64);
        Cocktail {
            like_count,
            ..cocktail.clone()
        }
    }

    /// Cocktails matching `filter`, newest first. Ids grow monotonically, so
    /// reverse id order is creation order.
    fn newest_first(&self, filter: impl Fn(&Cocktail) -> bool) -> Vec<Cocktail> {
        self.cocktails
            .values()
            .rev()
            .filter(|c| filter(c))
            .map(|c| self.with_like_count(c))
            .collect()
    }
}

/// In-memory [`CocktailRepository`] guarded by a `tokio` read/write lock.
#[derive(Default)]
pub struct InMemoryCocktailRepository {
    store: RwLock<Store>,
}

impl InMemoryCocktailRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CocktailRepository for InMemoryCocktailRepository {
    async fn create(&self, new_cocktail: NewCocktail) -> Result<Cocktail, AppError> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let now = Utc::now();
        let cocktail = Cocktail {
            id: store.last_id,
            member_no: new_cocktail.member_no,
            name: new_cocktail.name,
            description: new_cocktail.description,
            ingredients: new_cocktail.ingredients,
            instructions: new_cocktail.instructions,
            image: new_cocktail.image,
            like_count: 0,
            created_at: now,
            updated_at: now,
        };

        store.cocktails.insert(cocktail.id, cocktail.clone());
        Ok(cocktail)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cocktail>, AppError> {
        let store = self.store.read().await;
        Ok(store.cocktails.get(&id).map(|c| store.with_like_count(c)))
    }

    async fn list_all(&self) -> Result<Vec<Cocktail>, AppError> {
        Ok(self.store.read().await.newest_first(|_| true))
    }

    async fn list_by_member(&self, member_no: i64) -> Result<Vec<Cocktail>, AppError> {
        Ok(self
            .store
            .read()
            .await
            .newest_first(|c| c.member_no == member_no))
    }

    async fn update(&self, id: i64, update: CocktailUpdate) -> Result<Cocktail, AppError> {
        let mut store = self.store.write().await;

        let cocktail = store
            .cocktails
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE))?;

        cocktail.name = update.name;
        cocktail.description = update.description;
        cocktail.ingredients = update.ingredients;
        cocktail.instructions = update.instructions;
        cocktail.image = update.image;
        cocktail.updated_at = Utc::now();

        let updated = cocktail.clone();
        Ok(store.with_like_count(&updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.store.write().await;

        let removed = store.cocktails.remove(&id).is_some();
        store.likes.remove(&id);

        Ok(removed)
    }

    async fn liked_cocktail_ids(&self, member_no: i64) -> Result<Vec<i64>, AppError> {
        let store = self.store.read().await;

        Ok(store
            .likes
            .iter()
            .filter(|(_, members)| members.contains(&member_no))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn toggle_like(&self, id: i64, member_no: i64) -> Result<LikeToggle, AppError> {
        let mut store = self.store.write().await;

        if !store.cocktails.contains_key(&id) {
            return Err(AppError::not_found(COCKTAIL_NOT_FOUND_MESSAGE));
        }

        let members = store.likes.entry(id).or_default();
        let liked = if members.remove(&member_no) {
            false
        } else {
            members.insert(member_no);
            true
        };
        let like_count = members.len() as i64;

        if members.is_empty() {
            store.likes.remove(&id);
        }

        Ok(LikeToggle { liked, like_count })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
