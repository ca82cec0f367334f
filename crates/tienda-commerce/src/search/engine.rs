//! The catalog query engine.
//!
//! Filtering, sorting and pagination always run in this order:
//! scope filter, text filter, stable sort, page slice.

use std::cmp::Ordering;

use crate::catalog::CatalogRecord;
use crate::search::{Pagination, QueryDescriptor, QueryResults, SortDirection, SortKey};

/// Run a query over a snapshot.
///
/// Every input yields a result: an empty snapshot gives zero pages, and a
/// page past the end gives an empty slice (not a clamp).
pub fn run_query<'a>(records: &'a [CatalogRecord], query: &QueryDescriptor) -> QueryResults<'a> {
    let term = query.term.to_lowercase();

    let mut matched: Vec<&CatalogRecord> = records
        .iter()
        .filter(|r| query.scope.matches(r))
        .filter(|r| query.match_fields.matches(r, &term))
        .collect();

    // sort_by is stable, so equal keys keep snapshot order.
    matched.sort_by(|a, b| compare_records(a, b, query.sort, query.direction));

    let pagination = Pagination::new(query.page, query.page_size, matched.len());
    let items: Vec<&CatalogRecord> = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.page_size as usize)
        .collect();

    tracing::debug!(
        term = %query.term,
        sort = query.sort.as_str(),
        page = pagination.page,
        matched = pagination.total_items,
        visible = items.len(),
        "ran catalog query"
    );

    QueryResults { items, pagination }
}

fn compare_records(
    a: &CatalogRecord,
    b: &CatalogRecord,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let ordering = match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Price => a.unit_price.amount_cents.cmp(&b.unit_price.amount_cents),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Locale-aware name comparison for Spanish product names.
///
/// Letters compare case- and accent-insensitively first ("Ñ" sorts after
/// "n"); accents break ties next, then case with lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(primary_weights(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| case_weights(a).cmp(case_weights(b)))
        .then_with(|| a.cmp(b))
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn primary_weights(s: &str) -> impl Iterator<Item = u32> + '_ {
    lowercase(s).map(|c| match c {
        'ñ' => 'n' as u32 * 2 + 1,
        c => fold_accent(c) as u32 * 2,
    })
}

fn case_weights(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::search::{MatchFields, Scope};
    use proptest::prelude::*;

    fn record(id: &str, name: &str, sub: &str, pesos: i64) -> CatalogRecord {
        CatalogRecord::new(id, name, "golosinas", sub, Money::ars(pesos))
    }

    fn names<'a>(results: &QueryResults<'a>) -> Vec<&'a str> {
        results.items.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_compare_names_locale() {
        assert_eq!(compare_names("alfajor", "Bombón"), Ordering::Less);
        assert_eq!(compare_names("Ñoquis", "Nuez"), Ordering::Greater);
        assert_eq!(compare_names("nz", "ña"), Ordering::Less);
        assert_eq!(compare_names("Azúcar", "azucar"), Ordering::Greater);
        assert_eq!(compare_names("cafe", "Cafe"), Ordering::Less);
        assert_eq!(compare_names("Limón", "limon"), Ordering::Greater);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_name_ignores_case_and_accents() {
        let records = vec![
            record("1", "chupetín", "chupetines", 10),
            record("2", "Alfajor", "alfajores", 10),
            record("3", "Bombón", "chocolates", 10),
        ];
        let results = run_query(&records, &QueryDescriptor::catalog());
        assert_eq!(names(&results), vec!["Alfajor", "Bombón", "chupetín"]);
    }

    #[test]
    fn test_sort_by_price_descending() {
        let records = vec![
            record("1", "A", "x", 30),
            record("2", "B", "x", 10),
            record("3", "C", "x", 20),
        ];
        let query = QueryDescriptor::catalog().with_sort(SortKey::Price, SortDirection::Descending);
        assert_eq!(names(&run_query(&records, &query)), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_price_ties_keep_snapshot_order() {
        let records = vec![
            record("1", "Zeta", "x", 10),
            record("2", "Alfa", "x", 10),
            record("3", "Medio", "x", 5),
        ];
        let asc = QueryDescriptor::catalog().with_sort(SortKey::Price, SortDirection::Ascending);
        assert_eq!(names(&run_query(&records, &asc)), vec!["Medio", "Zeta", "Alfa"]);

        let desc = QueryDescriptor::catalog().with_sort(SortKey::Price, SortDirection::Descending);
        assert_eq!(names(&run_query(&records, &desc)), vec!["Zeta", "Alfa", "Medio"]);
    }

    #[test]
    fn test_filters_compose() {
        let records = vec![
            record("1", "Alfajor Triple", "alfajores", 10),
            record("2", "Alfajor Simple", "alfajores", 10),
            record("3", "Chocolate con Alfajor", "chocolates", 10),
            CatalogRecord::new("4", "Alfajor de arroz", "almacen", "arroz", Money::ars(5)),
        ];
        let query = QueryDescriptor::catalog()
            .with_scope(Scope::subcategory("golosinas", "alfajores"))
            .with_term("TRIPLE");

        let results = run_query(&records, &query);
        assert_eq!(names(&results), vec!["Alfajor Triple"]);
        assert_eq!(results.pagination.total_pages, 1);
    }

    #[test]
    fn test_admin_fields_match_category() {
        let records = vec![
            record("1", "Alfajor", "alfajores", 10),
            CatalogRecord::new("2", "Fideos", "almacen", "pastas", Money::ars(5)),
        ];
        let catalog = QueryDescriptor::catalog().with_term("almac");
        assert!(run_query(&records, &catalog).is_empty());

        let admin = QueryDescriptor::admin().with_term("almac");
        assert_eq!(names(&run_query(&records, &admin)), vec!["Fideos"]);

        let custom = QueryDescriptor::catalog()
            .with_term("pastas")
            .with_match_fields(MatchFields::all());
        assert_eq!(run_query(&records, &custom).len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let results = run_query(&[], &QueryDescriptor::catalog());
        assert!(results.is_empty());
        assert_eq!(results.pagination.total_pages, 0);
    }

    #[test]
    fn test_page_slice() {
        let records: Vec<CatalogRecord> = (0..25)
            .map(|i| record(&i.to_string(), &format!("Producto {:02}", i), "x", 10))
            .collect();

        let page2 = run_query(&records, &QueryDescriptor::catalog().with_page(2));
        assert_eq!(page2.len(), 12);
        assert_eq!(page2.items[0].name, "Producto 12");
        assert_eq!(page2.pagination.total_pages, 3);
        assert!(page2.pagination.has_next);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_pages_partition_matches(n in 0usize..60, page_size in 1u32..15) {
            let records: Vec<CatalogRecord> = (0..n)
                .map(|i| record(&format!("p{}", i), &format!("Item {}", n - i), "x", (i % 7) as i64 + 1))
                .collect();
            let query = QueryDescriptor::catalog().with_page_size(page_size);
            let total_pages = run_query(&records, &query).pagination.total_pages;

            let mut seen: Vec<&str> = Vec::new();
            for page in 1..=total_pages {
                let results = run_query(&records, &query.clone().with_page(page));
                prop_assert!(results.len() <= page_size as usize);
                seen.extend(results.items.iter().map(|r| r.id.as_str()));
            }
            prop_assert_eq!(seen.len(), n);
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), n);

            let past = run_query(&records, &query.clone().with_page(total_pages + 1));
            prop_assert!(past.is_empty());
        }
    }
}
