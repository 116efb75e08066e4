const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS brands (
	brand_id   uuid PRIMARY KEY,
	name       text NOT NULL UNIQUE,
	created_at timestamptz NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS scent_families (
	family_id uuid PRIMARY KEY,
	name      text NOT NULL UNIQUE,
	slug      text NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS products (
	product_id    uuid PRIMARY KEY,
	sku           text NOT NULL UNIQUE,
	name          text NOT NULL,
	brand_id      uuid NOT NULL REFERENCES brands(brand_id),
	gender        text NOT NULL,
	occasion      text,
	climate       text,
	event         text,
	concentration text NOT NULL,
	price         bigint NOT NULL,
	intensity     text NOT NULL,
	sillage       text NOT NULL,
	longevity     text NOT NULL,
	notes         jsonb NOT NULL DEFAULT '{}'::jsonb,
	seasonal      jsonb NOT NULL DEFAULT '{}'::jsonb,
	time_of_day   jsonb NOT NULL DEFAULT '{}'::jsonb,
	is_active     boolean NOT NULL DEFAULT TRUE,
	created_at    timestamptz NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_products_price ON products (price);

CREATE INDEX IF NOT EXISTS idx_products_created_at ON products (created_at DESC);

CREATE TABLE IF NOT EXISTS product_families (
	product_id uuid NOT NULL REFERENCES products(product_id) ON DELETE CASCADE,
	family_id  uuid NOT NULL REFERENCES scent_families(family_id) ON DELETE CASCADE,
	PRIMARY KEY (product_id, family_id)
);

CREATE INDEX IF NOT EXISTS idx_product_families_family ON product_families (family_id);

CREATE TABLE IF NOT EXISTS preference_profiles (
	user_id    uuid PRIMARY KEY,
	families   jsonb NOT NULL DEFAULT '[]'::jsonb,
	intensity  text,
	occasions  jsonb NOT NULL DEFAULT '[]'::jsonb,
	climates   jsonb NOT NULL DEFAULT '[]'::jsonb,
	updated_at timestamptz NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS match_records (
	user_id       uuid NOT NULL,
	product_id    uuid NOT NULL,
	percentage    integer NOT NULL,
	reasons       text,
	calculated_at timestamptz NOT NULL,
	expires_at    timestamptz NOT NULL,
	PRIMARY KEY (user_id, product_id)
);

CREATE TABLE IF NOT EXISTS search_history (
	search_id   uuid PRIMARY KEY,
	user_id     uuid NOT NULL,
	query       text NOT NULL,
	intent      jsonb NOT NULL,
	result_ids  uuid[] NOT NULL DEFAULT '{}',
	searched_at timestamptz NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_search_history_user ON search_history (user_id, searched_at DESC);
";

pub fn schema_sql() -> &'static str {
	SCHEMA
}
