use carewell::memory::InMemoryStore;
use carewell::prelude::*;
use bson::Uuid;

fn new_home(title: &str, location: &str, owner: &str) -> NewCareHome {
    NewCareHome {
        title: title.into(),
        location: location.into(),
        owner: owner.into(),
        image: format!("{}.jpg", title.to_lowercase().replace(' ', "-")),
        price: "£850/week".into(),
        room: RoomInfo {
            total_rooms: 30,
            room_types: "single en-suite".into(),
        },
        person_in_charge: "J. Winters".into(),
        local_authority: "Leeds City Council".into(),
        admission_min_age: 65,
        performance: Performance {
            caring: "good".into(),
            effective: "good".into(),
            responsive: "good".into(),
            safe: "good".into(),
        },
        logo: None,
        quote: None,
    }
}

fn directory() -> DirectoryService<InMemoryStore> {
    DirectoryService::new(InMemoryStore::new())
}

async fn seed(directory: &DirectoryService<InMemoryStore>, homes: &[(&str, &str, &str)]) -> Vec<CareHome> {
    let mut created = Vec::new();
    for (title, location, owner) in homes {
        created.push(
            directory
                .add_care_home(new_home(title, location, owner))
                .await
                .unwrap(),
        );
    }
    created
}

#[tokio::test]
async fn add_care_home_assigns_id_and_is_retrievable() {
    let directory = directory();

    let home = directory
        .add_care_home(new_home("Oakwood Manor", "Leeds", "Acme"))
        .await
        .unwrap();
    let fetched = directory.get_care_home(home.id).await.unwrap();

    assert_eq!(fetched, home);
}

#[tokio::test]
async fn add_care_home_rejects_empty_required_fields() {
    let directory = directory();

    let err = directory
        .add_care_home(new_home("  ", "Leeds", "Acme"))
        .await
        .unwrap_err();

    assert!(matches!(err, DirectoryError::Validation(_)));
    // Nothing was written.
    let listing = directory
        .list_care_homes(&PageRequest::default(), &CareHomeFilters::default())
        .await
        .unwrap();
    assert_eq!(listing.meta.total, 0);
}

#[tokio::test]
async fn get_missing_care_home_is_not_found() {
    let directory = directory();

    let err = directory.get_care_home(Uuid::new()).await.unwrap_err();

    assert!(matches!(err, DirectoryError::NotFound(_)));
}

#[tokio::test]
async fn default_pagination_serves_page_one_of_ten() {
    let directory = directory();
    for i in 0..15 {
        directory
            .add_care_home(new_home(&format!("Home {i:02}"), "Leeds", "Acme"))
            .await
            .unwrap();
    }

    let listing = directory
        .list_care_homes(&PageRequest::default(), &CareHomeFilters::default())
        .await
        .unwrap();

    assert_eq!(listing.meta.page, 1);
    assert_eq!(listing.meta.limit, 10);
    assert_eq!(listing.meta.total, 15);
    assert_eq!(listing.data.len(), 10);
}

#[tokio::test]
async fn offset_pagination_slices_the_sorted_sequence() {
    let directory = directory();
    seed(
        &directory,
        &[
            ("Elm Court", "Leeds", "Acme"),
            ("Ash Grange", "York", "Acme"),
            ("Cedar House", "Leeds", "Acme"),
            ("Birch Lodge", "York", "Acme"),
            ("Derwent View", "Leeds", "Acme"),
        ],
    )
    .await;

    let page = PageRequest::builder()
        .with_page(2)
        .with_limit(2)
        .with_sort_by("title")
        .with_sort_order(SortOrder::Asc)
        .build();
    assert_eq!(page.offset(), 2);

    let listing = directory
        .list_care_homes(&page, &CareHomeFilters::default())
        .await
        .unwrap();

    let titles: Vec<&str> = listing.data.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Cedar House", "Derwent View"]);
    assert!(listing.data.len() <= page.limit);
    assert_eq!(listing.meta.total, 5);
}

#[tokio::test]
async fn search_term_matches_substring_case_insensitively() {
    let directory = directory();
    seed(
        &directory,
        &[
            ("Oakwood Manor", "Leeds", "Acme"),
            ("Birchwood", "York", "Other"),
        ],
    )
    .await;

    let filters = CareHomeFilters {
        search_term: Some("OAK".into()),
        ..Default::default()
    };
    let listing = directory
        .list_care_homes(&PageRequest::default(), &filters)
        .await
        .unwrap();

    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].title, "Oakwood Manor");
}

#[tokio::test]
async fn search_term_also_matches_location_and_owner() {
    let directory = directory();
    seed(
        &directory,
        &[
            ("Birchwood", "Oakham", "Other"),
            ("Cedar House", "Leeds", "Oakcare Ltd"),
            ("Elm Court", "York", "Other"),
        ],
    )
    .await;

    let filters = CareHomeFilters {
        search_term: Some("oak".into()),
        ..Default::default()
    };
    let listing = directory
        .list_care_homes(&PageRequest::default(), &filters)
        .await
        .unwrap();

    assert_eq!(listing.meta.total, 2);
}

#[tokio::test]
async fn exact_filter_matches_owner_exactly() {
    let directory = directory();
    seed(
        &directory,
        &[
            ("Oakwood Manor", "Leeds", "Acme"),
            ("Birchwood", "York", "acme"),
            ("Cedar House", "Leeds", "Acme Care"),
        ],
    )
    .await;

    let filters = CareHomeFilters {
        owner: Some("Acme".into()),
        ..Default::default()
    };
    let listing = directory
        .list_care_homes(&PageRequest::default(), &filters)
        .await
        .unwrap();

    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].title, "Oakwood Manor");
}

#[tokio::test]
async fn total_reflects_the_active_filter() {
    let directory = directory();
    seed(
        &directory,
        &[
            ("Oakwood Manor", "Leeds", "Acme"),
            ("Birch Lodge", "York", "Acme"),
            ("Cedar House", "Leeds", "Other"),
            ("Elm Court", "York", "Other"),
            ("Ash Grange", "Hull", "Other"),
        ],
    )
    .await;

    let filters = CareHomeFilters {
        owner: Some("Acme".into()),
        ..Default::default()
    };
    let listing = directory
        .list_care_homes(&PageRequest::default(), &filters)
        .await
        .unwrap();

    // 5 homes seeded, 2 matching: total reflects the filter, not the
    // whole collection.
    assert_eq!(listing.meta.total, 2);
    assert_eq!(listing.data.len(), 2);
}

#[tokio::test]
async fn attach_to_missing_home_fails_without_writes() {
    let directory = directory();

    let award = Award::new(Uuid::new(), "Best Dementia Care", "Care Awards UK", 2024);
    let err = directory
        .attach_sub_record(SubRecord::Award(award))
        .await
        .unwrap_err();

    assert!(matches!(err, DirectoryError::NotFound(_)));
    let award_rows = directory
        .store()
        .collection::<Award>()
        .count(None)
        .await
        .unwrap();
    assert_eq!(award_rows, 0);
}

#[tokio::test]
async fn reviews_accumulate_in_call_order_with_standalone_rows() {
    let directory = directory();
    let home = directory
        .add_care_home(new_home("Oakwood Manor", "Leeds", "Acme"))
        .await
        .unwrap();

    let first = Review::new(home.id, "Ann", 5, "Lovely staff");
    let second = Review::new(home.id, "Bob", 4, "Great food");
    directory
        .attach_sub_record(SubRecord::Review(first.clone()))
        .await
        .unwrap();
    directory
        .attach_sub_record(SubRecord::Review(second.clone()))
        .await
        .unwrap();

    let parent = directory.get_care_home(home.id).await.unwrap();
    assert_eq!(parent.reviews, vec![first, second]);

    let review_rows = directory
        .store()
        .collection::<Review>()
        .count(None)
        .await
        .unwrap();
    assert_eq!(review_rows, 2);
}

#[tokio::test]
async fn single_slot_award_overwrites_while_both_rows_persist() {
    let directory = directory();
    let home = directory
        .add_care_home(new_home("Oakwood Manor", "Leeds", "Acme"))
        .await
        .unwrap();

    let first = Award::new(home.id, "Best Dementia Care", "Care Awards UK", 2023);
    let second = Award::new(home.id, "Regional Excellence", "NCF", 2024);
    directory
        .attach_sub_record(SubRecord::Award(first))
        .await
        .unwrap();
    directory
        .attach_sub_record(SubRecord::Award(second.clone()))
        .await
        .unwrap();

    // The embedded slot holds only the latest award.
    let parent = directory.get_care_home(home.id).await.unwrap();
    assert_eq!(parent.award, Some(second));

    // Both standalone rows survive in the award collection.
    let award_rows = directory
        .store()
        .collection::<Award>()
        .count(None)
        .await
        .unwrap();
    assert_eq!(award_rows, 2);
}

#[tokio::test]
async fn failed_standalone_write_rolls_the_parent_back() {
    let directory = directory();
    let home = directory
        .add_care_home(new_home("Oakwood Manor", "Leeds", "Acme"))
        .await
        .unwrap();

    let first = Award::new(home.id, "Best Dementia Care", "Care Awards UK", 2023);
    directory
        .attach_sub_record(SubRecord::Award(first.clone()))
        .await
        .unwrap();

    // Reusing the first award's id makes the standalone insert fail
    // after the parent's embedded slot was already overwritten.
    let mut clashing = Award::new(home.id, "Regional Excellence", "NCF", 2024);
    clashing.id = first.id;
    let err = directory
        .attach_sub_record(SubRecord::Award(clashing))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Store(StoreError::DuplicateRecord(_, _))
    ));

    // The parent was restored to its pre-attach state.
    let parent = directory.get_care_home(home.id).await.unwrap();
    assert_eq!(parent.award, Some(first));

    let award_rows = directory
        .store()
        .collection::<Award>()
        .count(None)
        .await
        .unwrap();
    assert_eq!(award_rows, 1);
}

#[tokio::test]
async fn every_sub_record_kind_attaches_through_one_operation() {
    let directory = directory();
    let home = directory
        .add_care_home(new_home("Oakwood Manor", "Leeds", "Acme"))
        .await
        .unwrap();

    let subs = vec![
        SubRecord::Award(Award::new(home.id, "Best Dementia Care", "Care Awards UK", 2024)),
        SubRecord::Services(CareService::new(
            home.id,
            "Residential and respite care",
            vec!["residential".into(), "respite".into()],
        )),
        SubRecord::Team(CareTeam::new(home.id, "M. Okafor", 32, "Registered nurses on every shift")),
        SubRecord::Facilities(Facility::new(
            home.id,
            vec!["garden".into(), "library".into(), "hair salon".into()],
        )),
        SubRecord::NewsEvent(NewsEvent::new(home.id, "Summer fair", "Open to families", None)),
        SubRecord::Review(Review::new(home.id, "Ann", 5, "Lovely staff")),
    ];

    for sub in subs {
        directory.attach_sub_record(sub).await.unwrap();
    }

    let parent = directory.get_care_home(home.id).await.unwrap();
    assert!(parent.award.is_some());
    assert!(parent.services.is_some());
    assert!(parent.team.is_some());
    assert!(parent.facilities.is_some());
    assert!(parent.news_event.is_some());
    assert_eq!(parent.reviews.len(), 1);
}
