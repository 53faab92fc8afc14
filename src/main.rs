//! Walks through the location tree and the ownership policy against a live
//! [`ListingSystem`].

use property_finder::config::CoreConfig;
use property_finder::error::ServiceError;
use property_finder::lifecycle::{setup_tracing, ListingSystem};
use property_finder::model::{
    LocationCreate, LocationKind, Principal, PropertyCreate, PropertyImage, PropertyUpdate,
    ReviewCreate, UserId,
};
use property_finder::policy::RequestIdentity;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let system = ListingSystem::with_config(CoreConfig::from_env());
    let locations = &system.location_client;

    let span = tracing::info_span!("location_tree");
    async {
        let porto = locations
            .create_location(LocationCreate::new("Porto", LocationKind::City).at(41.1579, -8.6291))
            .await?;
        let bonfim = locations
            .create_location(
                LocationCreate::new("Bonfim", LocationKind::District)
                    .under(porto.id)
                    .at(41.1466, -8.5975),
            )
            .await?;
        let campanha = locations
            .create_location(
                LocationCreate::new("Campanhã", LocationKind::Neighborhood)
                    .under(bonfim.id)
                    .at(41.1486, -8.5856),
            )
            .await?;

        match locations.reparent(porto.id, campanha.id).await {
            Ok(_) => error!("Cycle was accepted"),
            Err(e) => info!(error = %e, "Cycle refused"),
        }
        locations.reparent(campanha.id, porto.id).await?;
        let children = locations.list_children(porto.id).await?;
        info!(count = children.len(), "Porto children after move");

        for hit in locations.nearby(41.15, -8.61, 2.0).await? {
            info!(name = %hit.location.name, distance_km = hit.distance_km, "Nearby");
        }
        Ok::<_, ServiceError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("ownership");
    async {
        let owner = system.gatekeeper(RequestIdentity::authenticated(Principal::user(7)));
        let reviewer = system.gatekeeper(RequestIdentity::authenticated(Principal::user(9)));
        let stranger = system.gatekeeper(RequestIdentity::authenticated(Principal::user(11)));

        let property_id = owner
            .create_property(PropertyCreate::new(UserId(0), "Riverside loft", 1_250.0, "Rua da Alegria 10"))
            .await?;
        system
            .property_client
            .add_image(property_id, PropertyImage::new("https://img.example/loft.jpg"))
            .await?;

        let review_id = reviewer
            .create_review(ReviewCreate {
                author_id: UserId(0),
                property_id,
                rating: 4,
                comment: Some("Great light".to_string()),
            })
            .await?;

        let raise = PropertyUpdate {
            price: Some(1_400.0),
            ..Default::default()
        };
        if let Err(e) = stranger.update_property(property_id, raise).await {
            info!(error = %e, "Stranger denied");
        }

        owner.delete_review(review_id).await?;
        info!(%review_id, "Review removed by the property owner");
        Ok::<_, ServiceError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
