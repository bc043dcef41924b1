use rust_decimal::Decimal;

use super::*;

fn product(id: i64, name: &str, latin: &str, category: (i64, &str), price: Price) -> Product {
    Product {
        id,
        name: name.to_string(),
        latin_name: latin.to_string(),
        price,
        category_id: Some(category.0),
        category_name: category.1.to_string(),
        composition: vec![],
        utilization: vec![],
        image_ref: String::new(),
        description: String::new(),
        created_at: None,
        updated_at: None,
    }
}

fn rupiah(amount: i64) -> Price {
    Price::Amount(Decimal::new(amount, 0))
}

/// Five products; two share the "Jamu Tradisional" category (id 3).
fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Temulawak Instan", "Curcuma xanthorrhiza", (1, "Serbuk"), rupiah(25_000)),
        product(2, "Kunyit Asam", "Curcuma longa", (3, "Jamu Tradisional"), rupiah(12_000)),
        product(3, "Beras Kencur", "Kaempferia galanga", (3, "Jamu Tradisional"), rupiah(10_000)),
        product(4, "Minyak Sereh", "Cymbopogon citratus", (2, "Minyak Atsiri"), Price::Unavailable),
        product(5, "Kapsul Kunyit", "Curcuma longa", (4, "Kapsul"), rupiah(40_000)),
    ]
}

fn ids(results: &[&Product]) -> Vec<i64> {
    results.iter().map(|p| p.id).collect()
}

fn amounts(results: &[&Product]) -> Vec<Option<Decimal>> {
    results.iter().map(|p| p.price.amount()).collect()
}

// -----------------------------------------------------------------------
// parsing
// -----------------------------------------------------------------------

#[test]
fn sort_key_parses_known_values() {
    assert_eq!(SortKey::parse("name"), SortKey::Name);
    assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
    assert_eq!(SortKey::parse("price-high"), SortKey::PriceHigh);
}

#[test]
fn sort_key_unknown_falls_back_to_name() {
    assert_eq!(SortKey::parse("rating"), SortKey::Name);
    assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Name);
}

#[test]
fn category_filter_parses_all_sentinel() {
    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("3"), CategoryFilter::Id("3".to_string()));
    assert_eq!(CategoryFilter::parse("3").to_string(), "3");
}

// -----------------------------------------------------------------------
// search
// -----------------------------------------------------------------------

#[test]
fn empty_search_keeps_everything() {
    let catalog = sample_catalog();
    let results = query(&catalog, &CatalogQuery::new());
    assert_eq!(results.len(), catalog.len());
}

#[test]
fn search_is_case_insensitive_across_name_latin_and_category() {
    let catalog = sample_catalog();
    let results = query(&catalog, &CatalogQuery::new().with_search("KUNYIT"));
    assert_eq!(ids(&results), vec![5, 2]);

    let by_latin = query(&catalog, &CatalogQuery::new().with_search("cymbopogon"));
    assert_eq!(ids(&by_latin), vec![4]);

    let by_category = query(&catalog, &CatalogQuery::new().with_search("tradisional"));
    assert_eq!(ids(&by_category), vec![3, 2]);
}

#[test]
fn search_kunyit_sorted_by_name() {
    let catalog = sample_catalog();
    let q = CatalogQuery::new()
        .with_search("kunyit")
        .with_category(CategoryFilter::All)
        .with_sort(SortKey::Name);
    let results = query(&catalog, &q);

    for p in &results {
        let hit = [&p.name, &p.latin_name, &p.category_name]
            .iter()
            .any(|f| f.to_lowercase().contains("kunyit"));
        assert!(hit, "unexpected match: {}", p.name);
    }
    let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Kapsul Kunyit", "Kunyit Asam"]);
}

#[test]
fn search_with_no_hits_returns_empty() {
    let catalog = sample_catalog();
    let results = query(&catalog, &CatalogQuery::new().with_search("jahe"));
    assert!(results.is_empty());
}

// -----------------------------------------------------------------------
// category filter
// -----------------------------------------------------------------------

#[test]
fn category_filter_returns_exactly_the_shared_category() {
    let catalog = sample_catalog();
    let q = CatalogQuery::new().with_category(CategoryFilter::parse("3"));
    let results = query(&catalog, &q);
    assert_eq!(ids(&results), vec![3, 2]);
    assert!(results.iter().all(|p| p.category_name == "Jamu Tradisional"));
}

#[test]
fn category_filter_composes_with_search() {
    let catalog = sample_catalog();
    let q = CatalogQuery::new()
        .with_search("beras")
        .with_category(CategoryFilter::parse("3"));
    assert_eq!(ids(&query(&catalog, &q)), vec![3]);
}

#[test]
fn category_filter_skips_products_without_category() {
    let mut catalog = sample_catalog();
    catalog[0].category_id = None;
    let q = CatalogQuery::new().with_category(CategoryFilter::parse("1"));
    assert!(query(&catalog, &q).is_empty());
}

#[test]
fn non_numeric_category_filter_matches_nothing() {
    let catalog = sample_catalog();
    let q = CatalogQuery::new().with_category(CategoryFilter::parse("herbs"));
    assert!(query(&catalog, &q).is_empty());
}

// -----------------------------------------------------------------------
// sort
// -----------------------------------------------------------------------

#[test]
fn name_sort_ignores_case() {
    let catalog = vec![
        product(1, "temulawak", "", (1, ""), rupiah(1)),
        product(2, "Beras Kencur", "", (1, ""), rupiah(1)),
        product(3, "jahe Merah", "", (1, ""), rupiah(1)),
    ];
    let results = query(&catalog, &CatalogQuery::new());
    assert_eq!(ids(&results), vec![2, 3, 1]);
}

#[test]
fn name_sort_folds_accents() {
    let catalog = vec![
        product(1, "Zingiber", "", (1, ""), rupiah(1)),
        product(2, "Échinacea", "", (1, ""), rupiah(1)),
        product(3, "Adas", "", (1, ""), rupiah(1)),
        product(4, "ölja", "", (1, ""), rupiah(1)),
    ];
    let results = query(&catalog, &CatalogQuery::new());
    assert_eq!(ids(&results), vec![3, 2, 4, 1]);
}

#[test]
fn accented_and_plain_names_tie_in_input_order() {
    let catalog = vec![
        product(1, "Échinacea", "", (1, ""), rupiah(1)),
        product(2, "echinacea", "", (1, ""), rupiah(1)),
    ];
    let results = query(&catalog, &CatalogQuery::new());
    assert_eq!(ids(&results), vec![1, 2]);
}

#[test]
fn name_sort_is_stable_for_ties() {
    let catalog = vec![
        product(1, "Jamu", "", (1, ""), rupiah(3)),
        product(2, "jamu", "", (1, ""), rupiah(2)),
        product(3, "Jamu", "", (1, ""), rupiah(1)),
    ];
    let results = query(&catalog, &CatalogQuery::new());
    assert_eq!(ids(&results), vec![1, 2, 3]);
}

#[test]
fn price_low_is_non_decreasing_with_unavailable_last() {
    let catalog = sample_catalog();
    let results = query(&catalog, &CatalogQuery::new().with_sort(SortKey::PriceLow));
    assert_eq!(ids(&results), vec![3, 2, 1, 5, 4]);

    let prices: Vec<Decimal> = amounts(&results).into_iter().flatten().collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(results.last().map(|p| p.price), Some(Price::Unavailable));
}

#[test]
fn price_high_is_non_increasing_with_unavailable_last() {
    let catalog = sample_catalog();
    let results = query(&catalog, &CatalogQuery::new().with_sort(SortKey::PriceHigh));
    assert_eq!(ids(&results), vec![5, 1, 2, 3, 4]);

    let prices: Vec<Decimal> = amounts(&results).into_iter().flatten().collect();
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(results.last().map(|p| p.price), Some(Price::Unavailable));
}

#[test]
fn price_sort_keeps_input_order_for_equal_prices() {
    let catalog = vec![
        product(1, "C", "", (1, ""), Price::Unavailable),
        product(2, "B", "", (1, ""), rupiah(5)),
        product(3, "A", "", (1, ""), Price::Unavailable),
        product(4, "D", "", (1, ""), rupiah(5)),
    ];
    let low = query(&catalog, &CatalogQuery::new().with_sort(SortKey::PriceLow));
    assert_eq!(ids(&low), vec![2, 4, 1, 3]);
    let high = query(&catalog, &CatalogQuery::new().with_sort(SortKey::PriceHigh));
    assert_eq!(ids(&high), vec![2, 4, 1, 3]);
}

// -----------------------------------------------------------------------
// limit and purity
// -----------------------------------------------------------------------

#[test]
fn limit_truncates_after_sorting() {
    let catalog = sample_catalog();
    let q = CatalogQuery::new()
        .with_sort(SortKey::PriceHigh)
        .with_limit(Some(2));
    assert_eq!(ids(&query(&catalog, &q)), vec![5, 1]);
}

#[test]
fn result_never_exceeds_catalog_or_limit() {
    let catalog = sample_catalog();
    for limit in [None, Some(0), Some(1), Some(3), Some(10)] {
        for sort in [SortKey::Name, SortKey::PriceLow, SortKey::PriceHigh] {
            for term in ["", "curcuma", "zzz"] {
                let q = CatalogQuery::new()
                    .with_search(term)
                    .with_sort(sort)
                    .with_limit(limit);
                let results = query(&catalog, &q);
                assert!(results.len() <= catalog.len());
                if let Some(limit) = limit {
                    assert!(results.len() <= limit);
                }
            }
        }
    }
}

#[test]
fn query_does_not_mutate_catalog_and_is_repeatable() {
    let catalog = sample_catalog();
    let before = catalog.clone();
    let q = CatalogQuery::new().with_sort(SortKey::PriceLow);

    let first = ids(&query(&catalog, &q));
    let second = ids(&query(&catalog, &q));

    assert_eq!(first, second);
    assert_eq!(catalog, before);
}
