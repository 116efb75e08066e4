pub mod compile;
pub mod execute;
pub mod history;
pub mod matching;
pub mod parse_query;
pub mod pg;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use uuid::Uuid;

pub use compile::CompiledFilter;
pub use execute::{ExecuteResult, Page};
pub use matching::MatchOutcome;
pub use parse_query::ParseOutcome;
pub use search::{BrowseRequest, BrowseResponse, ProductHit, SearchRequest, SearchResponse};

use essenza_config::{Config, LlmProviderConfig};
use essenza_storage::{
	catalog::ProductQuery,
	models::{MatchRecord, PreferenceProfile, Product, ScentFamily, SearchHistoryEntry},
};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn list_families<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<ScentFamily>>>;

	fn family_ids_by_slugs<'a>(
		&'a self,
		slugs: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Uuid>>>;

	fn product_ids_by_families<'a>(
		&'a self,
		family_ids: &'a [Uuid],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Uuid>>>;

	fn fetch_products<'a>(
		&'a self,
		query: &'a ProductQuery,
	) -> BoxFuture<'a, color_eyre::Result<(Vec<Product>, i64)>>;

	fn fetch_product<'a>(
		&'a self,
		product_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<Product>>>;
}

pub trait MatchStore
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		user_id: Uuid,
		product_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<MatchRecord>>>;

	fn upsert<'a>(&'a self, record: &'a MatchRecord) -> BoxFuture<'a, color_eyre::Result<()>>;
}

pub trait ProfileStore
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, color_eyre::Result<Option<PreferenceProfile>>>;
}

pub trait HistoryStore
where
	Self: Send + Sync,
{
	fn record<'a>(&'a self, entry: &'a SearchHistoryEntry) -> BoxFuture<'a, color_eyre::Result<()>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	ProfileIncomplete { user_id: Uuid },
	ProductNotFound { product_id: Uuid },
	Provider { message: String },
	Storage { message: String },
}

#[derive(Clone)]
pub struct Stores {
	pub catalog: Arc<dyn CatalogStore>,
	pub matches: Arc<dyn MatchStore>,
	pub profiles: Arc<dyn ProfileStore>,
	pub history: Arc<dyn HistoryStore>,
}

pub struct EssenzaService {
	pub cfg: Config,
	pub stores: Stores,
	pub completion: Arc<dyn CompletionProvider>,
}

struct DefaultCompletion;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::ProfileIncomplete { user_id } => {
				write!(f, "Preference profile for user {user_id} is incomplete.")
			},
			Self::ProductNotFound { product_id } => {
				write!(f, "Product {product_id} not found or inactive.")
			},
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl CompletionProvider for DefaultCompletion {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(essenza_providers::completion::complete(cfg, messages))
	}
}

impl EssenzaService {
	pub fn new(cfg: Config, stores: Stores) -> Self {
		Self { cfg, stores, completion: Arc::new(DefaultCompletion) }
	}

	pub fn with_completion(
		cfg: Config,
		stores: Stores,
		completion: Arc<dyn CompletionProvider>,
	) -> Self {
		Self { cfg, stores, completion }
	}
}

pub(crate) fn storage_err(err: color_eyre::Report) -> ServiceError {
	ServiceError::Storage { message: err.to_string() }
}

pub(crate) fn provider_err(err: color_eyre::Report) -> ServiceError {
	ServiceError::Provider { message: err.to_string() }
}
