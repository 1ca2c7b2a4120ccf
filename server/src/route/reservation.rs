use application::service::{
    CreateReservationService, GenerateContractService, GetContractService,
    GetReservationService, HandoverService, ReturnService, UpdateReservationService,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CancelRequest, ContractTransformer, CreatePendingReservationRequest,
    CreateReservationRequest, GenerateContractRequest, GetContractRequest, GetReservationRequest,
    GetReservationsRequest, HandoverRequest, RescheduleRequest, ReservationContractsRequest,
    ReservationTransformer, ReturnRequest,
};
use crate::response::{
    ContractPresenter, ContractResponse, ReservationPresenter, ReservationResponse,
};

pub trait ReservationRouter {
    fn route_reservation(self) -> Self;
}

impl ReservationRouter for Router<AppModule> {
    fn route_reservation(self) -> Self {
        self.route(
            "/reservations",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetReservationsRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_reservations(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateReservationRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_reservation(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/reservations/pending",
            post(
                |State(module): State<AppModule>,
                 Json(req): Json<CreatePendingReservationRequest>| async move {
                    let token_ttl = *module.config().portal_token_ttl();
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake((req, token_ttl))
                        .handle(|dto| async move { module.create_pending_reservation(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/reservations/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(GetReservationRequest::new(id))
                        .handle(|dto| async move { module.get_reservation(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(ReservationResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<RescheduleRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.reschedule_reservation(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/:id/cancel",
            post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(CancelRequest::new(id))
                        .handle(|dto| async move { module.cancel_reservation(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/:id/handover",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<HandoverRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.hand_over(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/:id/return",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ReturnRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.return_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/:id/contracts",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ContractTransformer, ContractPresenter)
                        .intake(ReservationContractsRequest::new(id))
                        .handle(|dto| async move { module.get_contracts(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ContractTransformer, ContractPresenter)
                        .intake(GenerateContractRequest::new(id))
                        .handle(|dto| async move { module.generate_contract(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/contracts/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ContractTransformer, ContractPresenter)
                        .intake(GetContractRequest::new(id))
                        .handle(|dto| async move { module.get_contract(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(ContractResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
