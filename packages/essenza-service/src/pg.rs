use std::sync::Arc;

use color_eyre::Report;
use uuid::Uuid;

use essenza_storage::{
	catalog::{self, ProductQuery},
	db::Db,
	history, matches,
	models::{MatchRecord, PreferenceProfile, Product, ScentFamily, SearchHistoryEntry},
	profiles,
};

use crate::{BoxFuture, CatalogStore, HistoryStore, MatchStore, ProfileStore, Stores};

/// The production store bundle: every trait backed by the same Postgres pool.
pub struct PgStores {
	db: Arc<Db>,
}

impl Stores {
	pub fn postgres(db: Arc<Db>) -> Self {
		let stores = Arc::new(PgStores { db });

		Self {
			catalog: stores.clone(),
			matches: stores.clone(),
			profiles: stores.clone(),
			history: stores,
		}
	}
}

impl CatalogStore for PgStores {
	fn list_families<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<ScentFamily>>> {
		Box::pin(async move { catalog::list_families(&self.db).await.map_err(Report::new) })
	}

	fn family_ids_by_slugs<'a>(
		&'a self,
		slugs: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Uuid>>> {
		Box::pin(async move { catalog::family_ids_by_slugs(&self.db, slugs).await.map_err(Report::new) })
	}

	fn product_ids_by_families<'a>(
		&'a self,
		family_ids: &'a [Uuid],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Uuid>>> {
		Box::pin(async move {
			catalog::product_ids_by_families(&self.db, family_ids).await.map_err(Report::new)
		})
	}

	fn fetch_products<'a>(
		&'a self,
		query: &'a ProductQuery,
	) -> BoxFuture<'a, color_eyre::Result<(Vec<Product>, i64)>> {
		Box::pin(async move { catalog::fetch_products(&self.db, query).await.map_err(Report::new) })
	}

	fn fetch_product<'a>(
		&'a self,
		product_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<Product>>> {
		Box::pin(async move { catalog::fetch_product(&self.db, product_id).await.map_err(Report::new) })
	}
}

impl MatchStore for PgStores {
	fn fetch<'a>(
		&'a self,
		user_id: Uuid,
		product_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<MatchRecord>>> {
		Box::pin(async move {
			matches::fetch_match(&self.db, user_id, product_id).await.map_err(Report::new)
		})
	}

	fn upsert<'a>(&'a self, record: &'a MatchRecord) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { matches::upsert_match(&self.db, record).await.map_err(Report::new) })
	}
}

impl ProfileStore for PgStores {
	fn fetch<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<PreferenceProfile>>> {
		Box::pin(async move { profiles::fetch_profile(&self.db, user_id).await.map_err(Report::new) })
	}
}

impl HistoryStore for PgStores {
	fn record<'a>(&'a self, entry: &'a SearchHistoryEntry) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { history::insert_search(&self.db, entry).await.map_err(Report::new) })
	}
}
