use crate::geo::{GeoPoint, Nearby};
use crate::location_actor::{LocationError, LocationQuery, LocationRequest, Reply};
use crate::model::{Location, LocationCreate, LocationId, LocationKind, LocationUpdate};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the Location actor.
///
/// Location ids that do not exist produce `LocationError::NotFound`, except
/// for `get_location`, which answers `None`, and `is_ancestor`, which answers
/// `false`.
#[derive(Clone)]
pub struct LocationClient {
    sender: mpsc::Sender<LocationRequest>,
}

impl LocationClient {
    pub fn new(sender: mpsc::Sender<LocationRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> LocationRequest,
    ) -> Result<R, LocationError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to)).await.map_err(|_| {
            LocationError::ActorCommunicationError("location actor closed".to_string())
        })?;
        response.await.map_err(|_| {
            LocationError::ActorCommunicationError(
                "location actor dropped response channel".to_string(),
            )
        })?
    }

    async fn query(&self, query: LocationQuery) -> Result<Vec<Location>, LocationError> {
        self.request(|respond_to| LocationRequest::Query { query, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_location(&self, params: LocationCreate) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.request(|respond_to| LocationRequest::Create { params, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_location(&self, id: LocationId) -> Result<Option<Location>, LocationError> {
        self.request(|respond_to| LocationRequest::Get { id, respond_to })
            .await
    }

    /// Changes everything but the parent link.
    #[instrument(skip(self))]
    pub async fn update_location(
        &self,
        id: LocationId,
        update: LocationUpdate,
    ) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.request(|respond_to| LocationRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Moves `id` under `new_parent_id`, refusing moves that would form a cycle.
    #[instrument(skip(self))]
    pub async fn reparent(
        &self,
        id: LocationId,
        new_parent_id: LocationId,
    ) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.request(|respond_to| LocationRequest::Reparent {
            id,
            new_parent_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn detach(&self, id: LocationId) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.request(|respond_to| LocationRequest::Detach { id, respond_to })
            .await
    }

    /// Removes one node; its children become orphans.
    #[instrument(skip(self))]
    pub async fn delete_location(&self, id: LocationId) -> Result<Location, LocationError> {
        debug!("Sending request");
        self.request(|respond_to| LocationRequest::Delete { id, respond_to })
            .await
    }

    pub async fn is_ancestor(
        &self,
        ancestor: LocationId,
        node: LocationId,
    ) -> Result<bool, LocationError> {
        self.request(|respond_to| LocationRequest::IsAncestor {
            ancestor,
            node,
            respond_to,
        })
        .await
    }

    pub async fn list_children(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::Children(id)).await
    }

    pub async fn list_roots(&self) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::Roots).await
    }

    pub async fn list_orphans(&self) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::Orphans).await
    }

    pub async fn ancestors(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::Ancestors(id)).await
    }

    pub async fn descendants(&self, id: LocationId) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::Descendants(id)).await
    }

    pub async fn list_all(&self) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::All).await
    }

    pub async fn find_by_kind(&self, kind: LocationKind) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::ByKind(kind)).await
    }

    pub async fn search_by_name(
        &self,
        fragment: impl Into<String>,
    ) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::NameContains(fragment.into())).await
    }

    pub async fn neighborhoods_of(
        &self,
        city_name: impl Into<String>,
    ) -> Result<Vec<Location>, LocationError> {
        self.query(LocationQuery::NeighborhoodsOf(city_name.into()))
            .await
    }

    /// Located nodes within `radius_km` of the point, closest first.
    #[instrument(skip(self))]
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Nearby>, LocationError> {
        let center = GeoPoint::new(latitude, longitude);
        self.request(|respond_to| LocationRequest::Nearby {
            center,
            radius_km,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        limit: usize,
    ) -> Result<Vec<Nearby>, LocationError> {
        let center = GeoPoint::new(latitude, longitude);
        self.request(|respond_to| LocationRequest::Nearest {
            center,
            limit,
            respond_to,
        })
        .await
    }
}
