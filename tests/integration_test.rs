use property_finder::config::CoreConfig;
use property_finder::error::ServiceError;
use property_finder::framework::ActorClient;
use property_finder::gatekeeper::Gatekeeper;
use property_finder::lifecycle::ListingSystem;
use property_finder::location_actor::LocationError;
use property_finder::model::{
    LocationCreate, LocationKind, LocationUpdate, Principal, PropertyCreate, PropertyId,
    PropertyImage, PropertyUpdate, ReviewCreate, ReviewUpdate, Role, UserId,
};
use property_finder::policy::{ClientLookup, RequestIdentity};
use property_finder::review_actor::ReviewError;

fn as_user(system: &ListingSystem, id: u64) -> Gatekeeper<RequestIdentity, ClientLookup> {
    system.gatekeeper(RequestIdentity::authenticated(Principal::user(id)))
}

fn listing(title: &str) -> PropertyCreate {
    PropertyCreate::new(UserId(0), title, 950.0, "Rua das Flores 3")
}

fn review_of(property_id: PropertyId, rating: u8) -> ReviewCreate {
    ReviewCreate {
        author_id: UserId(0),
        property_id,
        rating,
        comment: None,
    }
}

/// A → B → C, then the two reparents from the tree scenario.
#[tokio::test]
async fn test_location_reparent_scenario() {
    let system = ListingSystem::new();
    let locations = &system.location_client;

    let a = locations
        .create_location(LocationCreate::new("A", LocationKind::City))
        .await
        .expect("Failed to create A");
    let b = locations
        .create_location(LocationCreate::new("B", LocationKind::District).under(a.id))
        .await
        .expect("Failed to create B");
    let c = locations
        .create_location(LocationCreate::new("C", LocationKind::Neighborhood).under(b.id))
        .await
        .expect("Failed to create C");

    let err = locations.reparent(a.id, c.id).await.unwrap_err();
    assert!(matches!(err, LocationError::InvalidOperation(_)));

    locations.reparent(c.id, a.id).await.expect("Failed to move C");
    let children: Vec<_> = locations
        .list_children(a.id)
        .await
        .expect("Failed to list children")
        .into_iter()
        .map(|location| location.id)
        .collect();
    assert_eq!(children, vec![b.id, c.id]);
    assert_eq!(locations.list_roots().await.unwrap(), vec![a.clone()]);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_location_delete_leaves_orphans() {
    let system = ListingSystem::new();
    let locations = &system.location_client;

    let city = locations
        .create_location(LocationCreate::new("Lisbon", LocationKind::City))
        .await
        .unwrap();
    let district = locations
        .create_location(LocationCreate::new("Baixa", LocationKind::District).under(city.id))
        .await
        .unwrap();
    let hood = locations
        .create_location(LocationCreate::new("Chiado", LocationKind::Neighborhood).under(district.id))
        .await
        .unwrap();

    locations.delete_location(district.id).await.expect("Failed to delete");

    let orphan = locations.get_location(hood.id).await.unwrap().expect("Child was removed");
    assert_eq!(orphan.parent_id, Some(district.id));
    assert_eq!(locations.list_orphans().await.unwrap(), vec![orphan]);
    assert_eq!(locations.list_roots().await.unwrap(), vec![city.clone()]);
    assert_eq!(
        locations.list_children(district.id).await.unwrap_err(),
        LocationError::NotFound(district.id)
    );

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_location_queries() {
    let system = ListingSystem::new();
    let locations = &system.location_client;

    let porto = locations
        .create_location(LocationCreate::new("Porto", LocationKind::City).at(41.1579, -8.6291))
        .await
        .unwrap();
    let ribeira = locations
        .create_location(
            LocationCreate::new("Ribeira", LocationKind::Neighborhood)
                .under(porto.id)
                .at(41.1406, -8.6111),
        )
        .await
        .unwrap();
    locations
        .create_location(LocationCreate::new("Unmapped", LocationKind::parse("village")))
        .await
        .unwrap();

    let updated = locations
        .update_location(
            ribeira.id,
            LocationUpdate {
                description: Some("Riverfront".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.parent_id, Some(porto.id));

    let hoods = locations.neighborhoods_of("Porto").await.unwrap();
    assert_eq!(hoods, vec![updated.clone()]);
    assert_eq!(locations.search_by_name("unmap").await.unwrap().len(), 1);
    assert_eq!(
        locations
            .find_by_kind(LocationKind::Other("village".into()))
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(locations.descendants(porto.id).await.unwrap(), vec![updated.clone()]);
    assert_eq!(locations.ancestors(ribeira.id).await.unwrap(), vec![porto.clone()]);

    // Porto centre to Ribeira is roughly 2.4 km
    let close = locations.nearby(41.1579, -8.6291, 1.0).await.unwrap();
    assert_eq!(close.len(), 1);
    let wider = locations.nearby(41.1579, -8.6291, 5.0).await.unwrap();
    let ids: Vec<_> = wider.iter().map(|hit| hit.location.id).collect();
    assert_eq!(ids, vec![porto.id, ribeira.id]);
    assert!(locations.nearby(41.1579, -8.6291, -1.0).await.unwrap().is_empty());

    let nearest = locations.nearest(41.14, -8.61, 1).await.unwrap();
    assert_eq!(nearest[0].location.id, ribeira.id);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_property_owner_and_admin_paths() {
    let system = ListingSystem::new();
    let owner = as_user(&system, 7);
    let stranger = as_user(&system, 8);
    let admin = system.gatekeeper(RequestIdentity::authenticated(Principal::admin(1)));
    let agent = system.gatekeeper(RequestIdentity::authenticated(Principal::new(UserId(5), Role::Agent)));

    let id = owner.create_property(listing("Loft")).await.expect("Failed to create");
    let stored = system.property_client.get(id).await.unwrap().expect("Property not found");
    assert_eq!(stored.owner_id, UserId(7), "owner comes from the principal");

    let raise = PropertyUpdate {
        price: Some(990.0),
        ..Default::default()
    };
    assert!(matches!(
        stranger.update_property(id, raise.clone()).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        agent.update_property(id, raise.clone()).await,
        Err(ServiceError::Forbidden(_))
    ));

    let updated = owner.update_property(id, raise).await.expect("Owner update failed");
    assert_eq!(updated.price, 990.0);

    let missing = PropertyId(999);
    assert!(matches!(
        owner.delete_property(missing).await,
        Err(ServiceError::NotFound(_))
    ));

    admin.delete_property(id).await.expect("Admin delete failed");
    assert!(system.property_client.get(id).await.unwrap().is_none());

    drop((owner, stranger, admin, agent));
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_review_delete_by_property_owner() {
    let system = ListingSystem::new();
    let owner = as_user(&system, 7);
    let author = as_user(&system, 9);
    let third = as_user(&system, 11);

    let property_id = owner.create_property(listing("Garden flat")).await.unwrap();
    let review_id = author.create_review(review_of(property_id, 5)).await.unwrap();

    assert!(matches!(
        third.delete_review(review_id).await,
        Err(ServiceError::Forbidden(_))
    ));
    assert!(matches!(
        owner
            .update_review(
                review_id,
                ReviewUpdate {
                    rating: Some(1),
                    comment: None,
                }
            )
            .await,
        Err(ServiceError::Forbidden(_))
    ));

    owner.delete_review(review_id).await.expect("Property owner delete failed");
    assert!(system.review_client.get(review_id).await.unwrap().is_none());

    let second = author.create_review(review_of(property_id, 3)).await.unwrap();
    author.delete_review(second).await.expect("Author delete failed");

    drop((owner, author, third));
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_validation_comes_before_policy() {
    let system = ListingSystem::new();
    let owner = as_user(&system, 7);
    let stranger = as_user(&system, 8);
    let anonymous = system.gatekeeper(RequestIdentity::anonymous());

    let id = owner.create_property(listing("Studio")).await.unwrap();
    let bad = PropertyUpdate {
        title: Some("x".repeat(101)),
        ..Default::default()
    };
    assert!(matches!(
        stranger.update_property(id, bad).await,
        Err(ServiceError::Validation(ref v)) if v.field == "title"
    ));
    assert!(matches!(
        anonymous.create_review(review_of(id, 9)).await,
        Err(ServiceError::Validation(ref v)) if v.field == "rating"
    ));
    assert_eq!(
        anonymous.create_review(review_of(id, 4)).await,
        Err(ServiceError::Unauthenticated)
    );
    assert_eq!(
        anonymous.delete_property(id).await,
        Err(ServiceError::Unauthenticated)
    );

    drop((owner, stranger, anonymous));
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_property_delete_cascades_images() {
    let system = ListingSystem::new();
    let owner = as_user(&system, 7);
    let id = owner.create_property(listing("Penthouse")).await.unwrap();

    let properties = &system.property_client;
    properties.add_image(id, PropertyImage::new("a.jpg")).await.unwrap();
    properties.add_image(id, PropertyImage::new("b.jpg")).await.unwrap();
    properties.set_primary_image(id, 1).await.unwrap();
    let images = properties.list_images(id).await.unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[1].primary);

    owner.delete_property(id).await.unwrap();
    assert!(properties.get(id).await.unwrap().is_none());
    assert!(properties.list_images(id).await.is_err());

    drop(owner);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_review_requires_existing_property() {
    let system = ListingSystem::new();
    let err = system
        .review_client
        .create_review(ReviewCreate {
            author_id: UserId(9),
            property_id: PropertyId(42),
            rating: 4,
            comment: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ReviewError::PropertyNotFound(PropertyId(42)));

    system.shutdown().await.expect("Shutdown failed");
}

/// Two callers race to put A under B and B under A; the actor applies one
/// move and refuses the other.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reparents_never_form_a_cycle() {
    let system = ListingSystem::new();
    let locations = &system.location_client;

    for round in 0..25 {
        let a = locations
            .create_location(LocationCreate::new(format!("A{round}"), LocationKind::City))
            .await
            .unwrap();
        let b = locations
            .create_location(LocationCreate::new(format!("B{round}"), LocationKind::City))
            .await
            .unwrap();

        let (first, second) = (locations.clone(), locations.clone());
        let (a_under_b, b_under_a) = tokio::join!(
            tokio::spawn(async move { first.reparent(a.id, b.id).await }),
            tokio::spawn(async move { second.reparent(b.id, a.id).await }),
        );
        let results = [a_under_b.unwrap(), b_under_a.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "round {round}");
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(LocationError::InvalidOperation(_)))));

        let forward = locations.is_ancestor(a.id, b.id).await.unwrap();
        let backward = locations.is_ancestor(b.id, a.id).await.unwrap();
        assert!(forward != backward, "round {round}: exactly one direction holds");
    }

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_out_of_range_config_is_repaired() {
    let system = ListingSystem::with_config(CoreConfig {
        channel_capacity: 0,
        earth_radius_km: -6371.0,
    });
    assert_eq!(system.config().channel_capacity, 1);
    assert_eq!(system.config().earth_radius_km, 6371.0);

    let locations = &system.location_client;
    let paris = locations
        .create_location(
            LocationCreate::new("Paris", LocationKind::City)
                .at(48.85, 2.35)
                .described("Capital"),
        )
        .await
        .unwrap();
    locations
        .create_location(LocationCreate::new("Sydney", LocationKind::City).at(-33.87, 151.21))
        .await
        .unwrap();
    assert_eq!(paris.description.as_deref(), Some("Capital"));

    let hits = locations.nearby(48.85, 2.35, 0.0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location.id, paris.id);
    assert_eq!(hits[0].distance_km, 0.0);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_rejected_create_does_not_consume_an_id() {
    let system = ListingSystem::new();
    let properties = &system.property_client;

    let rejected = properties
        .create_property(PropertyCreate::new(UserId(7), " ", 950.0, "Rua Nova 1"))
        .await;
    assert!(rejected.is_err());

    let id = properties.create_property(listing("Duplex")).await.unwrap();
    assert_eq!(id, PropertyId(1));

    system.shutdown().await.expect("Shutdown failed");
}
