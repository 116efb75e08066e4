use std::sync::Arc;

use essenza_service::{EssenzaService, Stores};
use essenza_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<EssenzaService>,
}
impl AppState {
	pub async fn new(config: essenza_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let stores = Stores::postgres(Arc::new(db));
		let service = EssenzaService::new(config, stores);

		Ok(Self::with_service(Arc::new(service)))
	}

	pub fn with_service(service: Arc<EssenzaService>) -> Self {
		Self { service }
	}
}
