use application::service::{
    AvailabilityService, CreateVehicleService, GetVehicleService, UpdateVehicleService,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    AvailabilityRequest, CreateVehicleRequest, GetVehicleRequest, MaintenanceRequest,
    QuoteRequest, UpdateVehicleRequest, VehicleTransformer,
};
use crate::response::{VehiclePresenter, VehicleResponse};

pub trait VehicleRouter {
    fn route_vehicle(self) -> Self;
}

impl VehicleRouter for Router<AppModule> {
    fn route_vehicle(self) -> Self {
        self.route(
            "/vehicles",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), VehiclePresenter)
                    .bypass(|| module.get_all_vehicles())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateVehicleRequest>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/vehicles/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake(GetVehicleRequest::new(id))
                        .handle(|dto| async move { module.get_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(VehicleResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateVehicleRequest>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/vehicles/:id/maintenance",
            put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<MaintenanceRequest>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.set_maintenance(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/vehicles/:id/availability",
            get(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Query(req): Query<AvailabilityRequest>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.check_availability(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/quotes",
            post(
                |State(module): State<AppModule>, Json(req): Json<QuoteRequest>| async move {
                    Controller::new(VehicleTransformer, VehiclePresenter)
                        .intake(req)
                        .handle(|dto| async move { module.quote(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
