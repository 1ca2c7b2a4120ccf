use application::service::PortalService;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{LookupPortalRequest, PortalTransformer, SubmitPortalRequest};
use crate::response::PortalPresenter;

pub trait PortalRouter {
    fn route_portal(self) -> Self;
}

impl PortalRouter for Router<AppModule> {
    fn route_portal(self) -> Self {
        self.route(
            "/portal/:token",
            get(
                |State(module): State<AppModule>, Path(token): Path<String>| async move {
                    Controller::new(PortalTransformer, PortalPresenter)
                        .intake(LookupPortalRequest::new(token))
                        .handle(|dto| async move { module.lookup_portal(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Path(token): Path<String>,
                 Json(req): Json<SubmitPortalRequest>| async move {
                    Controller::new(PortalTransformer, PortalPresenter)
                        .intake((token, req))
                        .handle(|dto| async move { module.submit_portal(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
