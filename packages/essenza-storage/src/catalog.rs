use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{Product, ProductRecord, ScentFamily},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
	PriceAsc,
	PriceDesc,
	Recency,
}

/// Store-native product predicates. Anything the catalog cannot express here
/// (the day/night suitability threshold lives inside a jsonb document) is the
/// caller's problem and runs over the fetched rows.
#[derive(Debug, Clone)]
pub struct ProductQuery {
	pub ids: Option<Vec<Uuid>>,
	pub brand_ids: Option<Vec<Uuid>>,
	pub gender: Option<String>,
	pub occasion: Option<String>,
	pub intensity: Option<String>,
	pub climate: Option<String>,
	pub event: Option<String>,
	pub price_min: Option<i64>,
	pub price_max: Option<i64>,
	pub text: Option<String>,
	pub sort: ProductSort,
	pub limit: i64,
	pub offset: i64,
}
impl Default for ProductQuery {
	fn default() -> Self {
		Self {
			ids: None,
			brand_ids: None,
			gender: None,
			occasion: None,
			intensity: None,
			climate: None,
			event: None,
			price_min: None,
			price_max: None,
			text: None,
			sort: ProductSort::Recency,
			limit: 20,
			offset: 0,
		}
	}
}

pub async fn family_ids_by_slugs(db: &Db, slugs: &[String]) -> Result<Vec<Uuid>> {
	if slugs.is_empty() {
		return Ok(Vec::new());
	}

	let ids = sqlx::query_scalar::<_, Uuid>(
		"SELECT family_id FROM scent_families WHERE slug = ANY($1)",
	)
	.bind(slugs)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

pub async fn product_ids_by_families(db: &Db, family_ids: &[Uuid]) -> Result<Vec<Uuid>> {
	if family_ids.is_empty() {
		return Ok(Vec::new());
	}

	let ids = sqlx::query_scalar::<_, Uuid>(
		"SELECT DISTINCT product_id FROM product_families WHERE family_id = ANY($1)",
	)
	.bind(family_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(ids)
}

pub async fn list_families(db: &Db) -> Result<Vec<ScentFamily>> {
	let families = sqlx::query_as::<_, ScentFamily>(
		"SELECT family_id, name, slug FROM scent_families ORDER BY name",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(families)
}

pub async fn fetch_products(db: &Db, query: &ProductQuery) -> Result<(Vec<Product>, i64)> {
	// An empty id list is an empty match set, never "no filter".
	if matches!(query.ids.as_deref(), Some([])) || matches!(query.brand_ids.as_deref(), Some([])) {
		return Ok((Vec::new(), 0));
	}

	let mut count_builder =
		QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE p.is_active = TRUE");
	push_filters(&mut count_builder, query);
	let total: i64 = count_builder.build_query_scalar().fetch_one(&db.pool).await?;

	let mut builder = QueryBuilder::new(
		"SELECT p.product_id, p.sku, p.name, b.name AS brand, p.gender, p.occasion, p.climate, \
		 p.event, p.concentration, p.price, p.intensity, p.sillage, p.longevity, p.notes, \
		 p.seasonal, p.time_of_day, p.created_at \
		 FROM products p JOIN brands b ON b.brand_id = p.brand_id WHERE p.is_active = TRUE",
	);
	push_filters(&mut builder, query);
	builder.push(match query.sort {
		ProductSort::PriceAsc => " ORDER BY p.price ASC, p.product_id",
		ProductSort::PriceDesc => " ORDER BY p.price DESC, p.product_id",
		ProductSort::Recency => " ORDER BY p.created_at DESC, p.product_id",
	});
	builder.push(" LIMIT ");
	builder.push_bind(query.limit);
	builder.push(" OFFSET ");
	builder.push_bind(query.offset);

	let records: Vec<ProductRecord> = builder.build_query_as().fetch_all(&db.pool).await?;
	let products = attach_families(db, records).await?;

	Ok((products, total))
}

pub async fn fetch_product(db: &Db, product_id: Uuid) -> Result<Option<Product>> {
	let record = sqlx::query_as::<_, ProductRecord>(
		"SELECT p.product_id, p.sku, p.name, b.name AS brand, p.gender, p.occasion, p.climate, \
		 p.event, p.concentration, p.price, p.intensity, p.sillage, p.longevity, p.notes, \
		 p.seasonal, p.time_of_day, p.created_at \
		 FROM products p JOIN brands b ON b.brand_id = p.brand_id \
		 WHERE p.product_id = $1 AND p.is_active = TRUE",
	)
	.bind(product_id)
	.fetch_optional(&db.pool)
	.await?;
	let Some(record) = record else {
		return Ok(None);
	};
	let mut products = attach_families(db, vec![record]).await?;

	Ok(products.pop())
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ProductQuery) {
	if let Some(ids) = &query.ids {
		builder.push(" AND p.product_id = ANY(");
		builder.push_bind(ids.clone());
		builder.push(")");
	}
	if let Some(brand_ids) = &query.brand_ids {
		builder.push(" AND p.brand_id = ANY(");
		builder.push_bind(brand_ids.clone());
		builder.push(")");
	}
	if let Some(gender) = &query.gender {
		builder.push(" AND p.gender = ");
		builder.push_bind(gender.clone());
	}
	if let Some(occasion) = &query.occasion {
		builder.push(" AND p.occasion = ");
		builder.push_bind(occasion.clone());
	}
	if let Some(intensity) = &query.intensity {
		builder.push(" AND p.intensity = ");
		builder.push_bind(intensity.clone());
	}
	if let Some(climate) = &query.climate {
		builder.push(" AND p.climate = ");
		builder.push_bind(climate.clone());
	}
	if let Some(event) = &query.event {
		builder.push(" AND p.event = ");
		builder.push_bind(event.clone());
	}
	if let Some(price_min) = query.price_min {
		builder.push(" AND p.price >= ");
		builder.push_bind(price_min);
	}
	if let Some(price_max) = query.price_max {
		builder.push(" AND p.price <= ");
		builder.push_bind(price_max);
	}
	if let Some(text) = &query.text {
		let pattern = format!("%{}%", text.trim());
		builder.push(" AND (p.name ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR p.sku ILIKE ");
		builder.push_bind(pattern);
		builder.push(")");
	}
}

async fn attach_families(db: &Db, records: Vec<ProductRecord>) -> Result<Vec<Product>> {
	if records.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<Uuid> = records.iter().map(|record| record.product_id).collect();
	let rows: Vec<(Uuid, String)> = sqlx::query_as(
		"SELECT pf.product_id, sf.name FROM product_families pf \
		 JOIN scent_families sf ON sf.family_id = pf.family_id \
		 WHERE pf.product_id = ANY($1) \
		 ORDER BY sf.name",
	)
	.bind(&ids)
	.fetch_all(&db.pool)
	.await?;
	let mut by_product: HashMap<Uuid, Vec<String>> = HashMap::new();

	for (product_id, name) in rows {
		by_product.entry(product_id).or_default().push(name);
	}

	Ok(records
		.into_iter()
		.map(|record| {
			let families = by_product.remove(&record.product_id).unwrap_or_default();

			record.into_product(families)
		})
		.collect())
}
