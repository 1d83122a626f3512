//! City repository integration tests against a real SQLite database.

mod common;

use city_api::config::CITY_SORT_SAFELIST;
use city_api::types::ListParams;
use city_api::{AppError, City, CityRepository, Filters, NewCity};
use tokio_test::assert_ok;

fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
    Filters::new(
        ListParams {
            page,
            page_size,
            sort: sort.to_string(),
        },
        CITY_SORT_SAFELIST,
    )
}

async fn seed(repo: &impl CityRepository, cities: &[(&str, &str)]) -> Vec<City> {
    let mut stored = Vec::with_capacity(cities.len());
    for (name, state) in cities {
        stored.push(repo.insert(NewCity::new(*name, *state)).await.unwrap());
    }
    stored
}

fn names(cities: &[City]) -> Vec<&str> {
    cities.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_insert_assigns_id_and_lists_back() {
    let db = common::setup().await;
    let repo = db.store();

    let austin = repo.insert(NewCity::new("Austin", "TX")).await.unwrap();
    assert!(austin.id >= 1);
    assert_eq!(austin.name, "Austin");

    let (cities, metadata) = repo.list(&filters(1, 20, "id")).await.unwrap();
    assert_eq!(cities, vec![austin]);
    assert_eq!(metadata.total_records, 1);
    assert_eq!(metadata.current_page, 1);
    assert_eq!(metadata.first_page, 1);
    assert_eq!(metadata.last_page, 1);
}

#[tokio::test]
async fn test_list_sorted_by_name() {
    let db = common::setup().await;
    let repo = db.store();
    seed(&repo, &[("Dallas", "TX"), ("Austin", "TX"), ("Boston", "MA")]).await;

    let (cities, metadata) = repo.list(&filters(1, 20, "name")).await.unwrap();
    assert_eq!(names(&cities), vec!["Austin", "Boston", "Dallas"]);
    assert_eq!(metadata.total_records, 3);
    assert_eq!(metadata.last_page, 1);

    let (cities, _) = repo.list(&filters(1, 20, "-name")).await.unwrap();
    assert_eq!(names(&cities), vec!["Dallas", "Boston", "Austin"]);
}

#[tokio::test]
async fn test_list_ties_break_on_id() {
    let db = common::setup().await;
    let repo = db.store();
    let stored = seed(&repo, &[("Austin", "TX"), ("Boston", "MA"), ("Dallas", "TX")]).await;

    let (cities, _) = repo.list(&filters(1, 20, "state")).await.unwrap();
    let ids: Vec<i64> = cities.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![stored[1].id, stored[0].id, stored[2].id]);
}

#[tokio::test]
async fn test_list_pages_through_results() {
    let db = common::setup().await;
    let repo = db.store();
    seed(
        &repo,
        &[
            ("Austin", "TX"),
            ("Boston", "MA"),
            ("Chicago", "IL"),
            ("Dallas", "TX"),
            ("El Paso", "TX"),
        ],
    )
    .await;

    let (cities, metadata) = repo.list(&filters(2, 2, "name")).await.unwrap();
    assert_eq!(names(&cities), vec!["Chicago", "Dallas"]);
    assert_eq!(metadata.current_page, 2);
    assert_eq!(metadata.page_size, 2);
    assert_eq!(metadata.last_page, 3);
    assert_eq!(metadata.total_records, 5);

    let (cities, metadata) = repo.list(&filters(3, 2, "name")).await.unwrap();
    assert_eq!(names(&cities), vec!["El Paso"]);
    assert_eq!(metadata.total_records, 5);
}

#[tokio::test]
async fn test_list_past_last_page_is_empty() {
    let db = common::setup().await;
    let repo = db.store();
    seed(&repo, &[("Austin", "TX")]).await;

    let (cities, metadata) = repo.list(&filters(5, 20, "id")).await.unwrap();
    assert!(cities.is_empty());
    assert_eq!(metadata.total_records, 0);
    assert_eq!(metadata.last_page, 0);
}

#[tokio::test]
async fn test_list_empty_table() {
    let db = common::setup().await;
    let repo = db.store();

    let (cities, metadata) = repo.list(&filters(1, 20, "id")).await.unwrap();
    assert!(cities.is_empty());
    assert_eq!(metadata.total_records, 0);
    assert_eq!(metadata.current_page, 0);
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_column() {
    let db = common::setup().await;
    let repo = db.store();

    let err = repo.list(&filters(1, 20, "population")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let db = common::setup().await;
    let repo = db.store();
    let mut city = repo.insert(NewCity::new("Austin", "TX")).await.unwrap();

    city.name = "Houston".to_string();
    assert_ok!(repo.update(&city).await);

    let (cities, _) = repo.list(&filters(1, 20, "id")).await.unwrap();
    assert_eq!(cities, vec![city]);
}

#[tokio::test]
async fn test_update_after_delete_is_edit_conflict() {
    let db = common::setup().await;
    let repo = db.store();
    let city = repo.insert(NewCity::new("Austin", "TX")).await.unwrap();

    assert_ok!(repo.delete(city.id).await);

    let err = repo.update(&city).await.unwrap_err();
    assert!(matches!(err, AppError::EditConflict));
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let db = common::setup().await;
    let repo = db.store();
    let city = repo.insert(NewCity::new("Austin", "TX")).await.unwrap();

    assert_ok!(repo.delete(city.id).await);

    let err = repo.delete(city.id).await.unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound));
}

#[tokio::test]
async fn test_delete_non_positive_id_is_not_found() {
    let db = common::setup().await;
    let repo = db.store();

    for id in [0, -4] {
        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::RecordNotFound));
    }
}
