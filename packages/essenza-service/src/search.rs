use serde_json::Value;
use uuid::Uuid;

use essenza_domain::intent::{Gender, ParsedIntent, PriceSort};
use essenza_storage::models::Product;

use crate::{CompiledFilter, EssenzaService, Page, ServiceError, ServiceResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub user_id: Option<Uuid>,
	pub page: Option<u32>,
	pub page_size: Option<u32>,
	/// Storefront brand facet, merged into the compiled filter.
	pub brand_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProductHit {
	pub product_id: Uuid,
	pub sku: String,
	pub name: String,
	pub brand: String,
	pub families: Vec<String>,
	pub gender: String,
	pub concentration: String,
	pub price: i64,
	pub intensity: String,
	pub sillage: String,
	pub longevity: String,
	pub notes: Value,
	pub seasonal: Value,
	pub time_of_day: Value,
}
impl From<Product> for ProductHit {
	fn from(product: Product) -> Self {
		Self {
			product_id: product.product_id,
			sku: product.sku,
			name: product.name,
			brand: product.brand,
			families: product.families,
			gender: product.gender,
			concentration: product.concentration,
			price: product.price,
			intensity: product.intensity,
			sillage: product.sillage,
			longevity: product.longevity,
			notes: product.notes,
			seasonal: product.seasonal,
			time_of_day: product.time_of_day,
		}
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResponse {
	pub products: Vec<ProductHit>,
	pub total: i64,
	pub explanation: String,
	pub intent: ParsedIntent,
	/// True when query parsing fell back to an unfiltered search.
	pub degraded: bool,
}

/// Plain catalog browsing: the storefront's facet filters routed through the
/// same executor as AI search, with no model call involved.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BrowseRequest {
	pub text: Option<String>,
	pub brand_ids: Option<Vec<Uuid>>,
	pub gender: Option<String>,
	pub price_min: Option<i64>,
	pub price_max: Option<i64>,
	pub sort_by_price: Option<PriceSort>,
	pub page: Option<u32>,
	pub page_size: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BrowseResponse {
	pub products: Vec<ProductHit>,
	pub total: i64,
}

impl EssenzaService {
	/// The full AI search pipeline: parse, compile, execute, then record
	/// history best-effort.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(ServiceError::InvalidRequest { message: "query is required.".to_string() });
		}

		let outcome = self.parse_query(query).await;
		let mut filter = self.compile_filter(&outcome.intent).await;

		filter.brand_ids = req.brand_ids.clone();

		let result = self.execute_filter(&filter, self.resolve_page(req.page, req.page_size)).await?;
		let result_ids: Vec<Uuid> = result.products.iter().map(|product| product.product_id).collect();

		self.record_search(req.user_id, query, &outcome.intent, &result_ids).await;

		Ok(SearchResponse {
			products: result.products.into_iter().map(ProductHit::from).collect(),
			total: result.total,
			explanation: outcome.explanation,
			intent: outcome.intent,
			degraded: outcome.degraded,
		})
	}

	pub async fn browse(&self, req: BrowseRequest) -> ServiceResult<BrowseResponse> {
		let gender = match req.gender.as_deref() {
			Some(raw) => Some(
				Gender::parse(raw)
					.ok_or_else(|| ServiceError::InvalidRequest {
						message: format!("Unknown gender filter: {raw}"),
					})?
					.as_str()
					.to_string(),
			),
			None => None,
		};
		let filter = CompiledFilter {
			gender,
			price_min: req.price_min,
			price_max: req.price_max,
			brand_ids: req.brand_ids.clone(),
			text: req.text.clone().filter(|text| !text.trim().is_empty()),
			sort_by_price: req.sort_by_price,
			..Default::default()
		};
		let result = self.execute_filter(&filter, self.resolve_page(req.page, req.page_size)).await?;

		Ok(BrowseResponse {
			products: result.products.into_iter().map(ProductHit::from).collect(),
			total: result.total,
		})
	}

	fn resolve_page(&self, number: Option<u32>, size: Option<u32>) -> Page {
		Page {
			number: number.unwrap_or(1).max(1),
			size: size.unwrap_or(self.cfg.search.page_size).max(1),
		}
	}
}
