use essenza_domain::{intent::PriceSort, suitability};
use essenza_storage::{
	catalog::{ProductQuery, ProductSort},
	models::Product,
};

use crate::{CompiledFilter, EssenzaService, ServiceResult, storage_err};

#[derive(Debug, Clone, Copy)]
pub struct Page {
	/// 1-based page number.
	pub number: u32,
	pub size: u32,
}
impl Page {
	pub fn first(size: u32) -> Self {
		Self { number: 1, size }
	}
}

#[derive(Debug)]
pub struct ExecuteResult {
	pub products: Vec<Product>,
	pub total: i64,
}
impl ExecuteResult {
	fn empty() -> Self {
		Self { products: Vec::new(), total: 0 }
	}
}

impl EssenzaService {
	/// Applies a compiled filter to the catalog. Store-native predicates run
	/// in the store; the day/night threshold runs over the fetched page.
	pub async fn execute_filter(
		&self,
		filter: &CompiledFilter,
		page: Page,
	) -> ServiceResult<ExecuteResult> {
		let catalog = &self.stores.catalog;
		let mut ids = None;

		if let Some(slugs) = &filter.family_slugs {
			let family_ids = catalog.family_ids_by_slugs(slugs).await.map_err(storage_err)?;

			// Zero resolved families means zero products. Falling through
			// here would turn the id list into "no filter" and return the
			// whole catalog.
			if family_ids.is_empty() {
				return Ok(ExecuteResult::empty());
			}

			let product_ids =
				catalog.product_ids_by_families(&family_ids).await.map_err(storage_err)?;

			if product_ids.is_empty() {
				return Ok(ExecuteResult::empty());
			}

			ids = Some(product_ids);
		}

		let sort = match filter.sort_by_price {
			Some(PriceSort::Asc) => ProductSort::PriceAsc,
			Some(PriceSort::Desc) => ProductSort::PriceDesc,
			None => ProductSort::Recency,
		};
		// The store applies LIMIT before the in-memory day/night filter can
		// discard rows, so capped queries over-fetch first and truncate to
		// the exact cap afterwards.
		let (limit, offset) = match filter.limit {
			Some(cap) => ((cap as i64) * (self.cfg.search.overfetch_multiplier as i64), 0),
			None => {
				let size = page.size.max(1);

				(size as i64, ((page.number.max(1) - 1) as i64) * (size as i64))
			},
		};
		let query = ProductQuery {
			ids,
			brand_ids: filter.brand_ids.clone(),
			gender: filter.gender.clone(),
			occasion: filter.occasion.clone(),
			intensity: filter.intensity.clone(),
			climate: filter.climate.clone(),
			event: filter.event.clone(),
			price_min: filter.price_min,
			price_max: filter.price_max,
			text: filter.text.clone(),
			sort,
			limit,
			offset,
		};
		let (mut products, store_total) =
			catalog.fetch_products(&query).await.map_err(storage_err)?;
		let mut total = store_total;

		if let Some(time_of_day) = filter.time_of_day {
			let threshold = self.cfg.search.time_of_day_threshold;

			products.retain(|product| {
				suitability::passes_time_of_day(&product.time_of_day, time_of_day, threshold)
			});

			// The store-side count no longer describes the result set; report
			// the post-filter count and never mix the two.
			total = products.len() as i64;
		}
		if let Some(cap) = filter.limit {
			products.truncate(cap as usize);

			total = products.len() as i64;
		}

		Ok(ExecuteResult { products, total })
	}
}
