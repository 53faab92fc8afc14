//! Gatekeeper and owner lookup over scripted clients: no actors are running,
//! so anything the gatekeeper forwards without an expectation fails the test.

use property_finder::clients::{PropertyClient, ReviewClient};
use property_finder::error::ServiceError;
use property_finder::framework::mock::{create_mock_client, MockClient};
use property_finder::framework::{FrameworkError, ResourceRequest};
use property_finder::gatekeeper::Gatekeeper;
use property_finder::model::{
    Principal, Property, PropertyCreate, PropertyId, PropertyImage, PropertyUpdate, Review,
    ReviewCreate, ReviewId, UserId,
};
use property_finder::policy::{ClientLookup, OwnedResource, RequestIdentity, ResourceLookup, ResourceRef};
use property_finder::property_actor::PropertyActionResult;

fn property(id: u64, owner: u64) -> Property {
    Property::new(PropertyId(id), UserId(owner), "Townhouse", 2_100.0, "Canal St 4")
}

fn review(id: u64, author: u64, property: u64) -> Review {
    Review {
        id: ReviewId(id),
        owner_id: UserId(author),
        property_id: PropertyId(property),
        rating: 2,
        comment: Some("Noisy at night".into()),
    }
}

fn gatekeeper(
    principal: Principal,
    properties: &MockClient<Property>,
    reviews: &MockClient<Review>,
) -> Gatekeeper<RequestIdentity, ClientLookup> {
    let properties = PropertyClient::new(properties.client());
    let reviews = ReviewClient::new(reviews.client());
    Gatekeeper::new(
        RequestIdentity::authenticated(principal),
        ClientLookup::new(properties.clone(), reviews.clone()),
        properties,
        reviews,
    )
}

#[tokio::test]
async fn test_property_owner_deletes_review_on_their_listing() {
    let mut properties = MockClient::<Property>::new();
    let mut reviews = MockClient::<Review>::new();
    reviews.expect_get(ReviewId(3)).return_ok(Some(review(3, 9, 5)));
    properties.expect_get(PropertyId(5)).return_ok(Some(property(5, 7)));
    reviews.expect_delete(ReviewId(3)).return_ok(());

    let gate = gatekeeper(Principal::user(7), &properties, &reviews);
    gate.delete_review(ReviewId(3)).await.expect("Property owner should be allowed");

    properties.verify();
    reviews.verify();
}

#[tokio::test]
async fn test_denied_update_is_never_forwarded() {
    let mut properties = MockClient::<Property>::new();
    let reviews = MockClient::<Review>::new();
    properties.expect_get(PropertyId(5)).return_ok(Some(property(5, 7)));

    let gate = gatekeeper(Principal::user(8), &properties, &reviews);
    let result = gate
        .update_property(
            PropertyId(5),
            PropertyUpdate {
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    properties.verify();
}

#[tokio::test]
async fn test_unavailable_lookup_is_not_a_denial() {
    let mut properties = MockClient::<Property>::new();
    let reviews = MockClient::<Review>::new();
    properties
        .expect_get(PropertyId(5))
        .return_err(FrameworkError::ActorClosed);

    let gate = gatekeeper(Principal::user(7), &properties, &reviews);
    let result = gate.delete_property(PropertyId(5)).await;

    assert!(matches!(result, Err(ServiceError::Unavailable(_))));
    properties.verify();
}

#[tokio::test]
async fn test_admin_skips_lookup() {
    let mut properties = MockClient::<Property>::new();
    let reviews = MockClient::<Review>::new();
    properties.expect_delete(PropertyId(5)).return_ok(());

    let gate = gatekeeper(Principal::admin(1), &properties, &reviews);
    gate.delete_property(PropertyId(5)).await.expect("Admin should be allowed");

    properties.verify();
}

#[tokio::test]
async fn test_client_lookup_projects_owners() {
    let mut properties = MockClient::<Property>::new();
    let mut reviews = MockClient::<Review>::new();
    properties.expect_get(PropertyId(5)).return_ok(Some(property(5, 7)));
    reviews.expect_get(ReviewId(3)).return_ok(Some(review(3, 9, 5)));
    reviews.expect_get(ReviewId(4)).return_ok(None);

    let lookup = ClientLookup::new(
        PropertyClient::new(properties.client()),
        ReviewClient::new(reviews.client()),
    );

    let owned = lookup
        .find_owner_of(ResourceRef::Property(PropertyId(5)))
        .await
        .unwrap();
    assert_eq!(owned.map(|o| o.owner_id), Some(UserId(7)));

    let owned = lookup
        .find_owner_of(ResourceRef::Review(ReviewId(3)))
        .await
        .unwrap();
    assert_eq!(
        owned,
        Some(OwnedResource {
            target: ResourceRef::Review(ReviewId(3)),
            owner_id: UserId(9),
            property_id: Some(PropertyId(5)),
        })
    );

    assert_eq!(lookup.find_owner_of(ResourceRef::Review(ReviewId(4))).await.unwrap(), None);

    properties.verify();
    reviews.verify();
}

#[tokio::test]
async fn test_create_property_assigns_principal_as_owner() {
    let (client, mut receiver) = create_mock_client::<Property>(10);
    let reviews = MockClient::<Review>::new();
    let properties = PropertyClient::new(client);
    let review_client = ReviewClient::new(reviews.client());
    let gate = Gatekeeper::new(
        RequestIdentity::authenticated(Principal::user(7)),
        ClientLookup::new(properties.clone(), review_client.clone()),
        properties,
        review_client,
    );

    let create_task = tokio::spawn(async move {
        gate.create_property(PropertyCreate::new(UserId(99), "Cottage", 700.0, "Lane 2"))
            .await
    });

    let Some(ResourceRequest::Create { params, respond_to }) = receiver.recv().await else {
        panic!("Expected Create request");
    };
    assert_eq!(params.owner_id, UserId(7));
    respond_to.send(Ok(PropertyId(1))).unwrap();

    assert_eq!(create_task.await.unwrap().unwrap(), PropertyId(1));
}

#[tokio::test]
async fn test_owner_update_is_forwarded() {
    let mut properties = MockClient::<Property>::new();
    let reviews = MockClient::<Review>::new();
    let mut repriced = property(5, 7);
    repriced.price = 1_950.0;
    properties.expect_get(PropertyId(5)).return_ok(Some(property(5, 7)));
    properties.expect_update(PropertyId(5)).return_ok(repriced.clone());

    let gate = gatekeeper(Principal::user(7), &properties, &reviews);
    let updated = gate
        .update_property(
            PropertyId(5),
            PropertyUpdate {
                price: Some(1_950.0),
                ..Default::default()
            },
        )
        .await
        .expect("Owner should be allowed");

    assert_eq!(updated, repriced);
    properties.verify();
}

#[tokio::test]
async fn test_create_review_needs_no_lookup() {
    let properties = MockClient::<Property>::new();
    let mut reviews = MockClient::<Review>::new();
    reviews.expect_create().return_ok(ReviewId(12));

    let gate = gatekeeper(Principal::user(9), &properties, &reviews);
    let id = gate
        .create_review(ReviewCreate {
            author_id: UserId(0),
            property_id: PropertyId(5),
            rating: 4,
            comment: None,
        })
        .await
        .expect("Create failed");

    assert_eq!(id, ReviewId(12));
    reviews.verify();
}

#[tokio::test]
async fn test_add_image_unpacks_position() {
    let mut properties = MockClient::<Property>::new();
    properties
        .expect_action(PropertyId(5))
        .return_ok(PropertyActionResult::AddImage(2));

    let client = PropertyClient::new(properties.client());
    let position = client
        .add_image(PropertyId(5), PropertyImage::new("garden.jpg"))
        .await
        .expect("Add image failed");

    assert_eq!(position, 2);
    properties.verify();
}
